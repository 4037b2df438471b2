//! 缓存刷新编排服务

use std::sync::Arc;

use cdn_refresh_provider::{CacheRefreshProvider, ObjectType, ProviderKind};

use crate::error::ResolverError;
use crate::traits::TagResolver;
use crate::types::{NamedGroup, RefreshReport, RefreshResult, TagRefreshResult};

/// 缓存刷新编排服务
///
/// 逐个 tag 解析配置，再逐个分组调用对应的刷新 provider。
/// 单个 tag 解析失败只跳过该 tag，单个分组刷新失败只记录在该分组的结果里。
pub struct RefreshOrchestrator {
    resolver: Arc<dyn TagResolver>,
    cdn: Arc<dyn CacheRefreshProvider>,
    dcdn: Arc<dyn CacheRefreshProvider>,
}

impl RefreshOrchestrator {
    /// 创建编排服务
    #[must_use]
    pub fn new(
        resolver: Arc<dyn TagResolver>,
        cdn: Arc<dyn CacheRefreshProvider>,
        dcdn: Arc<dyn CacheRefreshProvider>,
    ) -> Self {
        Self {
            resolver,
            cdn,
            dcdn,
        }
    }

    fn provider(&self, kind: ProviderKind) -> &dyn CacheRefreshProvider {
        match kind {
            ProviderKind::Cdn => self.cdn.as_ref(),
            ProviderKind::Dcdn => self.dcdn.as_ref(),
        }
    }

    /// 依次处理所有 tag 并汇总结果
    ///
    /// 不会失败：tag 解析错误记录在 `failed_tags`，分组错误记录在对应结果中。
    pub async fn run(&self, tag_names: &[String], object_type: ObjectType) -> RefreshReport {
        log::info!(
            "Refreshing {} tag(s): {}",
            tag_names.len(),
            tag_names.join(", ")
        );

        let mut report = RefreshReport::default();
        for tag in tag_names {
            match self.process_tag(tag, object_type).await {
                Ok(tag_result) => report.extend(tag_result),
                Err(e) => {
                    log::error!("Tag {tag} failed: {e}");
                    report.record_failed_tag(tag.as_str(), e.to_string());
                }
            }
        }

        log::info!(
            "Refresh finished: {} succeeded, {} failed, {} tag(s) skipped",
            report.succeeded(),
            report.failed(),
            report.failed_tags.len()
        );
        report
    }

    /// 处理单个 tag：先 cdn 分组，再 dcdn 分组
    pub async fn process_tag(
        &self,
        tag_name: &str,
        object_type: ObjectType,
    ) -> Result<TagRefreshResult, ResolverError> {
        log::info!("Processing tag: {tag_name}, refresh type: {object_type}");

        let config = self.resolver.resolve(tag_name).await?;
        if config.is_empty() {
            log::warn!("Tag {tag_name} has no cdn or dcdn groups");
        }

        let mut result = TagRefreshResult::default();
        for group in &config.cdn {
            result
                .cdn
                .push(self.refresh_group(ProviderKind::Cdn, group, object_type).await);
        }
        for group in &config.dcdn {
            result
                .dcdn
                .push(self.refresh_group(ProviderKind::Dcdn, group, object_type).await);
        }

        Ok(result)
    }

    /// 刷新单个分组，错误转为失败结果
    async fn refresh_group(
        &self,
        kind: ProviderKind,
        group: &NamedGroup,
        object_type: ObjectType,
    ) -> RefreshResult {
        if let Some(reason) = group.entry.invalid_reason() {
            log::warn!("[{kind}] Group {} has invalid configuration: {reason}", group.name);
            return RefreshResult::failed(
                group.name.as_str(),
                Vec::new(),
                kind,
                format!("invalid group configuration: {reason}"),
            );
        }

        let Some(config) = group.entry.primary() else {
            log::warn!("[{kind}] Group {} has no configuration entry", group.name);
            return RefreshResult::failed(
                group.name.as_str(),
                Vec::new(),
                kind,
                "group has no configuration entry",
            );
        };

        let ignored = group.entry.ignored_count();
        if ignored > 0 {
            log::warn!(
                "[{kind}] Group {} lists {} configurations, using the first and ignoring {ignored}",
                group.name,
                ignored + 1
            );
        }

        log::info!(
            "[{kind}] Refreshing group {} ({} domain(s))",
            group.name,
            config.domains.len()
        );
        log::debug!("[{kind}] Group {} domains: {:?}", group.name, config.domains);

        match self
            .provider(kind)
            .refresh_domains(&config.access, &config.domains, object_type)
            .await
        {
            Ok(receipt) => {
                log::info!(
                    "[{kind}] Group {} refreshed (task {})",
                    group.name,
                    receipt.refresh_task_id
                );
                RefreshResult::succeeded(group.name.as_str(), config.domains.clone(), kind, receipt)
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[{kind}] Group {} refresh failed: {e}", group.name);
                } else {
                    log::error!("[{kind}] Group {} refresh failed: {e}", group.name);
                }
                RefreshResult::from_provider_error(group.name.as_str(), config.domains.clone(), kind, &e)
            }
        }
    }
}
