//! # cdn-refresh-provider
//!
//! Cache refresh (purge) provider abstraction for CDN products.
//!
//! ## Supported Providers
//!
//! | Product | [`ProviderKind`] | API | Auth Method |
//! |---------|------------------|-----|-------------|
//! | [Aliyun CDN](https://www.aliyun.com/product/cdn) | `Cdn` | `RefreshObjectCaches` (2018-05-10) | HMAC-SHA256 (V3) |
//! | [Aliyun DCDN](https://www.aliyun.com/product/dcdn) | `Dcdn` | `RefreshDcdnObjectCaches` (2018-01-15) | HMAC-SHA256 (V3) |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for static builds and cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cdn_refresh_provider::{
//!     create_provider, AccessCredentials, CacheRefreshProvider, ObjectType, ProviderKind,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderKind::Cdn)?;
//!     let credentials = AccessCredentials::new("your-access-key-id", "your-access-key-secret");
//!
//!     let domains = vec![
//!         "https://static.example.com/".to_string(),
//!         "https://img.example.com/".to_string(),
//!     ];
//!     let receipt = provider
//!         .refresh_domains(&credentials, &domains, ObjectType::Directory)
//!         .await?;
//!     println!("refresh task: {}", receipt.refresh_task_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Errors decoded from a vendor error body keep the vendor's diagnostic link,
//! available through [`ProviderError::recommendation`].
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::{create_provider, create_provider_with_retries};

pub use traits::CacheRefreshProvider;

pub use types::{
    AccessCredentials, CredentialValidationError, ObjectType, ProviderKind, RefreshReceipt,
};

pub use utils::log_sanitizer;

pub use providers::{AliyunProvider, AliyunProviderBuilder};
