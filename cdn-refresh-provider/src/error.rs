use serde::{Deserialize, Serialize};

/// Unified error type for all cache refresh provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. Variants mapped from a vendor error body also carry the
/// vendor's diagnostic `recommend` link when one was returned.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided access key is invalid, disabled, or the signature was rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Raw error message from the provider API, if available.
        raw_message: Option<String>,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// A request parameter is invalid (empty object path, malformed URL, etc.).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// The account's daily refresh quota has been exhausted.
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not a transient condition.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Raw error message from the provider API, if available.
        raw_message: Option<String>,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or `Throttling*` codes).
    ///
    /// This is a transient error. Unlike [`QuotaExceeded`](Self::QuotaExceeded),
    /// the request should succeed after waiting.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Raw error message from the provider API, if available.
        raw_message: Option<String>,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// A domain in the object path is not accelerated by this account.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Domain (or object path) that was not found.
        domain: String,
        /// Raw error message from the provider API, if available.
        raw_message: Option<String>,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// The domain exists but is offline, stopped, or under review.
    DomainOffline {
        /// Provider that produced the error.
        provider: String,
        /// Domain (or object path) that is offline.
        domain: String,
        /// Raw error message from the provider API, if available.
        raw_message: Option<String>,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Raw error message from the provider API, if available.
        raw_message: Option<String>,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize request parameters.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
        /// Vendor diagnostic link, if available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommend: Option<String>,
    },
}

impl ProviderError {
    /// 是否为预期行为（配置错误、域名不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
                | Self::DomainOffline { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// Vendor diagnostic recommendation (usually a troubleshooting URL), if any.
    #[must_use]
    pub fn recommendation(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { recommend, .. }
            | Self::InvalidParameter { recommend, .. }
            | Self::QuotaExceeded { recommend, .. }
            | Self::RateLimited { recommend, .. }
            | Self::DomainNotFound { recommend, .. }
            | Self::DomainOffline { recommend, .. }
            | Self::PermissionDenied { recommend, .. }
            | Self::Unknown { recommend, .. } => recommend.as_deref(),
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
                ..
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
                ..
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded {
                provider,
                raw_message,
                ..
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Refresh quota exceeded: {msg}")
                } else {
                    write!(f, "[{provider}] Refresh quota exceeded")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
                ..
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::DomainOffline {
                provider,
                domain,
                raw_message,
                ..
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' is offline: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' is offline")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
                ..
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_code,
                raw_message,
                ..
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] {code}: {raw_message}")
                } else {
                    write!(f, "[{provider}] {raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
