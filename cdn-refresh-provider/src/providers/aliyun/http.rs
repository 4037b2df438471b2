//! 阿里云 OpenAPI 请求 (RPC 风格)

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::AccessCredentials;
use crate::utils::log_sanitizer::{mask_secret, truncate_for_log};

use super::types::AliyunErrorBody;
use super::{AliyunProvider, EMPTY_BODY_SHA256, serialize_to_query_string};

impl AliyunProvider {
    /// 执行阿里云 API 请求（参数通过 query string 传递，body 为空）
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        credentials: &AccessCredentials,
        action: &str,
        params: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let query_string = serialize_to_query_string(params, self.provider_name())?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        let authorization = self.sign(credentials, action, &query_string, &timestamp, &nonce);

        let url = if query_string.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/?{query_string}", self.base_url)
        };

        log::debug!(
            "[{}] {action} with key {}",
            self.provider_name(),
            mask_secret(&credentials.access_key_id)
        );

        let request = self
            .client
            .post(&url)
            .header("Host", &self.host)
            .header("x-acs-action", action)
            .header("x-acs-version", self.product.version)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization);

        let response = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            &format!("POST {} (Action: {action})", self.base_url),
            self.max_retries,
        )
        .await?;

        // 业务错误: 4xx/5xx 或 200 但带 Code 字段
        if let Some(err) = self.extract_api_error(&response.body, ctx) {
            return Err(err);
        }

        if response.is_error() {
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!(
                    "HTTP {}: {}",
                    response.status,
                    truncate_for_log(&response.body)
                ),
            });
        }

        HttpUtils::parse_json(&response.body, self.provider_name())
    }

    /// 从响应体中识别阿里云错误结构 `{Code, Message, Recommend}`
    fn extract_api_error(&self, body: &str, ctx: ErrorContext) -> Option<ProviderError> {
        let parsed: AliyunErrorBody = serde_json::from_str(body).ok()?;

        let raw = match (parsed.code, parsed.message) {
            (Some(code), Some(message)) => RawApiError::with_code(code, message),
            (Some(code), None) => RawApiError::with_code(code.clone(), code),
            (None, Some(message)) => RawApiError::new(message),
            _ => return None,
        }
        .recommend(parsed.recommend);

        let err = self.map_error(raw, ctx);
        if err.is_expected() {
            log::warn!("API error: {err}");
        } else {
            log::error!("API error: {err}");
        }
        if let Some(recommend) = err.recommendation() {
            log::warn!("[{}] Diagnosis: {recommend}", self.provider_name());
        }
        Some(err)
    }
}
