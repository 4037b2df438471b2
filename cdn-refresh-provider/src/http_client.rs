//! Generic HTTP client tools
//!
//! Sending, logging, transient-failure retry and body reading shared by every provider.
//! Providers build and sign their own `RequestBuilder`; this module only executes it.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound for a server-provided `Retry-After` wait.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// Status code and body text of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// 502/503/504: the gateway or the vendor backend is temporarily unavailable.
    pub fn is_gateway_error(&self) -> bool {
        matches!(self.status, 502..=504)
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`]. Every other status, including
    /// 4xx and gateway 5xx, is returned to the caller, which owns vendor error-body
    /// parsing.
    ///
    /// # Arguments
    /// * `request_builder` - signed request (URL, headers, body)
    /// * `provider_name` - Provider name (for logging and errors)
    /// * `label` - method + URL or action, for logging
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        label: &str,
    ) -> Result<HttpResponse, ProviderError> {
        log::debug!("[{provider_name}] {label}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Retry-After 必须在读取 body 之前提取
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
                recommend: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        Ok(HttpResponse { status, body })
    }

    /// Parse a JSON response body, logging the (truncated) raw text on failure.
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!("[{provider_name}] Raw response: {}", truncate_for_log(body));
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request with retries on transient failures.
    ///
    /// # Retry strategy
    /// - Only [`is_retryable`] errors and 502/503/504 responses are retried
    /// - A gateway response on the last attempt is returned as-is, so the caller
    ///   still sees the vendor error body
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (capped at 10 seconds),
    ///   or the server's `Retry-After` (capped at 30 seconds)
    /// - `max_retries == 0` sends exactly once
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        label: &str,
        max_retries: u32,
    ) -> Result<HttpResponse, ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, provider_name, label).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder 只能使用一次，需要 clone
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, provider_name, label).await;
            };

            match Self::execute_request(req, provider_name, label).await {
                Ok(resp) if attempt < max_retries && resp.is_gateway_error() => {
                    let delay = backoff_delay(attempt);
                    log::warn!(
                        "[{}] Gateway error HTTP {} (attempt {}/{}), retrying in {:.1}s",
                        provider_name,
                        resp.status,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Network errors, timeouts and throttling are transient; everything else
/// (bad credentials, quota, unknown domains) would fail the same way again.
pub(crate) fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // 防止 2^attempt 溢出
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
