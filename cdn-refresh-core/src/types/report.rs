//! 刷新结果与汇总报告

use serde::Serialize;

use cdn_refresh_provider::{ProviderError, ProviderKind, RefreshReceipt};

/// 单个分组的刷新结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResult {
    pub group: String,
    pub domains: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RefreshReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 厂商给出的诊断链接
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommend: Option<String>,
}

impl RefreshResult {
    #[must_use]
    pub fn succeeded(
        group: impl Into<String>,
        domains: Vec<String>,
        kind: ProviderKind,
        receipt: RefreshReceipt,
    ) -> Self {
        Self {
            group: group.into(),
            domains,
            kind,
            success: true,
            result: Some(receipt),
            error: None,
            recommend: None,
        }
    }

    #[must_use]
    pub fn failed(
        group: impl Into<String>,
        domains: Vec<String>,
        kind: ProviderKind,
        error: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            domains,
            kind,
            success: false,
            result: None,
            error: Some(error.into()),
            recommend: None,
        }
    }

    /// 由 provider 错误构造失败结果，保留诊断链接
    #[must_use]
    pub fn from_provider_error(
        group: impl Into<String>,
        domains: Vec<String>,
        kind: ProviderKind,
        err: &ProviderError,
    ) -> Self {
        Self {
            recommend: err.recommendation().map(str::to_string),
            ..Self::failed(group, domains, kind, err.to_string())
        }
    }
}

/// 单个 tag 的刷新结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagRefreshResult {
    pub cdn: Vec<RefreshResult>,
    pub dcdn: Vec<RefreshResult>,
}

impl TagRefreshResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cdn.len() + self.dcdn.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 配置解析失败的 tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFailure {
    pub tag: String,
    pub error: String,
}

/// 一次运行的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub cdn_items: Vec<RefreshResult>,
    pub dcdn_items: Vec<RefreshResult>,
    pub failed_tags: Vec<TagFailure>,
}

impl RefreshReport {
    /// 合并单个 tag 的结果
    pub fn extend(&mut self, tag_result: TagRefreshResult) {
        self.cdn_items.extend(tag_result.cdn);
        self.dcdn_items.extend(tag_result.dcdn);
    }

    pub fn record_failed_tag(&mut self, tag: impl Into<String>, error: impl Into<String>) {
        self.failed_tags.push(TagFailure {
            tag: tag.into(),
            error: error.into(),
        });
    }

    fn items(&self) -> impl Iterator<Item = &RefreshResult> {
        self.cdn_items.iter().chain(&self.dcdn_items)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.cdn_items.len() + self.dcdn_items.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.items().filter(|r| r.success).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}
