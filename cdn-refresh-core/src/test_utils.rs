//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cdn_refresh_provider::{
    AccessCredentials, CacheRefreshProvider, ObjectType, ProviderError, ProviderKind,
    RefreshReceipt,
};
use tokio::sync::Mutex;

use crate::error::ResolverError;
use crate::services::RefreshOrchestrator;
use crate::traits::TagResolver;
use crate::types::{GroupConfig, NamedGroup, TagConfig};

// ===== MockTagResolver =====

pub struct MockTagResolver {
    configs: HashMap<String, Result<TagConfig, ResolverError>>,
    calls: Mutex<Vec<String>>,
}

impl MockTagResolver {
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_config(mut self, tag: &str, config: TagConfig) -> Self {
        self.configs.insert(tag.to_string(), Ok(config));
        self
    }

    #[must_use]
    pub fn with_error(mut self, tag: &str, err: ResolverError) -> Self {
        self.configs.insert(tag.to_string(), Err(err));
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl TagResolver for MockTagResolver {
    async fn resolve(&self, tag_name: &str) -> Result<TagConfig, ResolverError> {
        self.calls.lock().await.push(tag_name.to_string());
        self.configs
            .get(tag_name)
            .cloned()
            .unwrap_or_else(|| {
                Err(ResolverError::Rejected {
                    tag: tag_name.to_string(),
                    message: "tag not found".to_string(),
                })
            })
    }
}

// ===== MockRefreshProvider =====

/// 一次 refresh 调用的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCall {
    pub access_key_id: String,
    pub object_path: String,
    pub object_type: ObjectType,
}

pub struct MockRefreshProvider {
    kind: ProviderKind,
    calls: Mutex<Vec<RefreshCall>>,
    /// 以这些 access key id 调用时返回错误
    failing_keys: HashMap<String, ProviderError>,
}

impl MockRefreshProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            calls: Mutex::new(Vec::new()),
            failing_keys: HashMap::new(),
        }
    }

    #[must_use]
    pub fn failing_for(mut self, access_key_id: &str, err: ProviderError) -> Self {
        self.failing_keys.insert(access_key_id.to_string(), err);
        self
    }

    pub async fn calls(&self) -> Vec<RefreshCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl CacheRefreshProvider for MockRefreshProvider {
    fn id(&self) -> &'static str {
        match self.kind {
            ProviderKind::Cdn => "mock-cdn",
            ProviderKind::Dcdn => "mock-dcdn",
        }
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn refresh(
        &self,
        credentials: &AccessCredentials,
        object_path: &str,
        object_type: ObjectType,
    ) -> cdn_refresh_provider::Result<RefreshReceipt> {
        let mut calls = self.calls.lock().await;
        calls.push(RefreshCall {
            access_key_id: credentials.access_key_id.clone(),
            object_path: object_path.to_string(),
            object_type,
        });

        if let Some(err) = self.failing_keys.get(&credentials.access_key_id) {
            return Err(err.clone());
        }

        Ok(RefreshReceipt {
            request_id: format!("{}-req-{}", self.id(), calls.len()),
            refresh_task_id: calls.len().to_string(),
        })
    }
}

// ===== 工厂方法 =====

pub fn group(name: &str, access_key_id: &str, domains: &[&str]) -> NamedGroup {
    NamedGroup::new(
        name,
        GroupConfig::new(
            AccessCredentials::new(access_key_id, "secret"),
            domains.iter().map(|d| (*d).to_string()).collect(),
        ),
    )
}

pub struct TestHarness {
    pub orchestrator: RefreshOrchestrator,
    pub resolver: Arc<MockTagResolver>,
    pub cdn: Arc<MockRefreshProvider>,
    pub dcdn: Arc<MockRefreshProvider>,
}

pub fn create_test_orchestrator(
    resolver: MockTagResolver,
    cdn: MockRefreshProvider,
    dcdn: MockRefreshProvider,
) -> TestHarness {
    let resolver = Arc::new(resolver);
    let cdn = Arc::new(cdn);
    let dcdn = Arc::new(dcdn);
    let orchestrator = RefreshOrchestrator::new(resolver.clone(), cdn.clone(), dcdn.clone());
    TestHarness {
        orchestrator,
        resolver,
        cdn,
        dcdn,
    }
}

pub fn test_providers() -> (MockRefreshProvider, MockRefreshProvider) {
    (
        MockRefreshProvider::new(ProviderKind::Cdn),
        MockRefreshProvider::new(ProviderKind::Dcdn),
    )
}
