use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{AccessCredentials, ObjectType, ProviderKind, RefreshReceipt};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
    /// 诊断地址（阿里云 `Recommend` 字段）
    pub recommend: Option<String>,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            recommend: None,
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            recommend: None,
        }
    }

    #[must_use]
    pub fn recommend(mut self, recommend: Option<String>) -> Self {
        self.recommend = recommend.filter(|r| !r.is_empty());
        self
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 本次刷新的对象路径（用于 `DomainNotFound` 等错误）
    pub object_path: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
            recommend: raw.recommend,
        }
    }
}

/// Cache refresh provider.
///
/// One implementation instance serves many credential sets: credentials are passed
/// per call, so a single provider can refresh groups that belong to different accounts.
#[async_trait]
pub trait CacheRefreshProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Product this provider refreshes.
    fn kind(&self) -> ProviderKind;

    /// Submit a refresh for `object_path`.
    ///
    /// `object_path` may hold several paths separated by `\n`. Blank paths and
    /// blank credentials are rejected with [`ProviderError::InvalidParameter`]
    /// before any request is sent.
    async fn refresh(
        &self,
        credentials: &AccessCredentials,
        object_path: &str,
        object_type: ObjectType,
    ) -> Result<RefreshReceipt>;

    /// Refresh a list of domains as one request.
    ///
    /// 默认实现用 `\n` 拼接后调用 `refresh()`。
    async fn refresh_domains(
        &self,
        credentials: &AccessCredentials,
        domains: &[String],
        object_type: ObjectType,
    ) -> Result<RefreshReceipt> {
        let combined = domains.join("\n");
        self.refresh(credentials, &combined, object_type).await
    }
}
