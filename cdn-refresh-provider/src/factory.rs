//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::AliyunProvider;
use crate::traits::CacheRefreshProvider;
use crate::types::ProviderKind;

/// Creates a [`CacheRefreshProvider`] for the given product with default settings.
///
/// The returned provider is wrapped in `Arc<dyn CacheRefreshProvider>` for easy sharing.
///
/// # Examples
///
/// ```rust,no_run
/// use cdn_refresh_provider::{create_provider, CacheRefreshProvider, ProviderKind};
///
/// let cdn = create_provider(ProviderKind::Cdn).unwrap();
/// assert_eq!(cdn.id(), "aliyun-cdn");
/// ```
pub fn create_provider(kind: ProviderKind) -> Result<Arc<dyn CacheRefreshProvider>> {
    create_provider_with_retries(kind, None)
}

/// Like [`create_provider`], overriding the transient-failure retry count.
pub fn create_provider_with_retries(
    kind: ProviderKind,
    max_retries: Option<u32>,
) -> Result<Arc<dyn CacheRefreshProvider>> {
    let mut builder = AliyunProvider::builder(kind);
    if let Some(retries) = max_retries {
        builder = builder.max_retries(retries);
    }
    Ok(Arc::new(builder.build()?))
}
