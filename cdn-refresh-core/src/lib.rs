//! CDN Refresh Core Library
//!
//! Provides the business logic for tag-driven cache refresh:
//! - Run configuration from environment variables (`RefreshConfig`)
//! - Tag configuration lookup (`TagResolver`, `HttpTagResolver`)
//! - Per-group refresh orchestration with error isolation (`RefreshOrchestrator`)
//!
//! Vendor calls go through the `CacheRefreshProvider` trait from `cdn-refresh-provider`,
//! so the orchestrator can be driven by any resolver / provider implementation.

pub mod config;
pub mod error;
pub mod resolver;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::RefreshConfig;
pub use error::{ConfigError, CoreError, CoreResult, ResolverError};
pub use resolver::HttpTagResolver;
pub use services::RefreshOrchestrator;
pub use traits::{CacheRefreshProvider, TagResolver};
