//! Tag resolver abstract Trait

use async_trait::async_trait;

use crate::error::ResolverError;
use crate::types::TagConfig;

/// Tag Resolver Trait
///
/// Looks up the CDN / DCDN group configuration registered under a tag name.
/// The default implementation is [`HttpTagResolver`](crate::resolver::HttpTagResolver).
#[async_trait]
pub trait TagResolver: Send + Sync {
    /// Resolve a tag name
    ///
    /// # Arguments
    /// * `tag_name` - Trimmed, non-empty tag name
    async fn resolve(&self, tag_name: &str) -> Result<TagConfig, ResolverError>;
}
