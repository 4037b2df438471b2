//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cdn_refresh_provider::ProviderError;

/// Configuration error. Fatal: the process exits with status 1.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ConfigError {
    /// Tag name variable absent or blank
    #[error("{var} must not be empty")]
    MissingTagNames { var: String },

    /// Tag name variable contains only separators and whitespace
    #[error("malformed tag names: '{0}'")]
    MalformedTagNames(String),

    /// Unsupported refresh object type
    #[error("invalid {var}: {detail}")]
    InvalidObjectType { var: String, detail: String },

    /// API URL that cannot be parsed
    #[error("invalid {var} '{value}': {detail}")]
    InvalidUrl {
        var: String,
        value: String,
        detail: String,
    },

    /// Non-numeric value where a number is expected
    #[error("invalid {var} '{value}': expected a non-negative integer")]
    InvalidNumber { var: String, value: String },
}

/// Tag lookup error. The tag is skipped, other tags proceed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ResolverError {
    /// Transport-level failure (connection refused, DNS, TLS, ...)
    #[error("network error requesting {url}: {detail}")]
    Network { url: String, detail: String },

    /// Request timed out
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Body is not the expected envelope / `data` is not a tag configuration
    #[error("invalid tag configuration response: {0}")]
    Parse(String),

    /// API answered with a non-success code
    #[error("tag '{tag}' rejected: {message}")]
    Rejected { tag: String, message: String },

    /// API reported success but returned no configuration
    #[error("no configuration returned for tag '{tag}'")]
    EmptyConfig { tag: String },
}

impl ResolverError {
    /// Whether the tag simply does not exist on the configuration API.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::EmptyConfig { .. })
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tag resolver error
    #[error("Tag resolver error: {0}")]
    Resolver(#[from] ResolverError),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, unknown tag, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Resolver(e) => e.is_not_found(),
            Self::Provider(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
