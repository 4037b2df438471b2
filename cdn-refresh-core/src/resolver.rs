//! HTTP tag 配置接口
//!
//! `GET {api_url}?tag_name=<tag>`，响应格式 `{"code": 1, "data": {...}, "msg": "..."}`，
//! `code == 1` 表示成功。

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use cdn_refresh_provider::log_sanitizer::truncate_for_log;

use crate::error::ResolverError;
use crate::traits::TagResolver;
use crate::types::TagConfig;

/// 连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 接口成功码
const SUCCESS_CODE: i64 = 1;

/// 基于 HTTP 接口的 [`TagResolver`] 实现
#[derive(Debug, Clone)]
pub struct HttpTagResolver {
    client: Client,
    api_url: String,
}

impl HttpTagResolver {
    /// 使用默认超时创建
    pub fn new(api_url: impl Into<String>) -> Result<Self, ResolverError> {
        let api_url = api_url.into();
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ResolverError::Network {
                url: api_url.clone(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client, api_url })
    }

    /// 使用外部提供的 client 创建
    #[must_use]
    pub fn with_client(api_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn transport_error(&self, err: &reqwest::Error) -> ResolverError {
        if err.is_timeout() {
            ResolverError::Timeout {
                url: self.api_url.clone(),
            }
        } else {
            ResolverError::Network {
                url: self.api_url.clone(),
                detail: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl TagResolver for HttpTagResolver {
    async fn resolve(&self, tag_name: &str) -> Result<TagConfig, ResolverError> {
        log::info!("Fetching configuration for tag: {tag_name}");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("tag_name", tag_name)])
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        log::debug!(
            "Tag API response: status={}, body={}",
            status.as_u16(),
            truncate_for_log(&body)
        );

        if !status.is_success() {
            return Err(ResolverError::HttpStatus {
                status: status.as_u16(),
                body: truncate_for_log(&body),
            });
        }

        parse_envelope(tag_name, &body)
    }
}

// ============ 响应解析 ============

#[derive(Deserialize)]
struct EnvelopeHead {
    #[serde(default)]
    code: serde_json::Value,
    #[serde(default)]
    msg: serde_json::Value,
}

#[derive(Deserialize)]
struct EnvelopeData {
    #[serde(default, deserialize_with = "deserialize_data")]
    data: Option<TagConfig>,
}

/// 解析接口响应体
///
/// 先读取 `code` / `msg`，成功时再解析 `data`，失败响应中的 `data` 不参与解析。
pub fn parse_envelope(tag_name: &str, body: &str) -> Result<TagConfig, ResolverError> {
    let head: EnvelopeHead = serde_json::from_str(body)
        .map_err(|e| ResolverError::Parse(format!("{e}: {}", truncate_for_log(body))))?;

    if head.code.as_i64() != Some(SUCCESS_CODE) {
        let message = match head.msg {
            serde_json::Value::String(s) if !s.is_empty() => s,
            serde_json::Value::Null | serde_json::Value::String(_) => "unknown error".to_string(),
            other => other.to_string(),
        };
        return Err(ResolverError::Rejected {
            tag: tag_name.to_string(),
            message,
        });
    }

    let envelope: EnvelopeData =
        serde_json::from_str(body).map_err(|e| ResolverError::Parse(e.to_string()))?;

    envelope.data.ok_or_else(|| ResolverError::EmptyConfig {
        tag: tag_name.to_string(),
    })
}

/// `data`: `null` 视为无配置，`[]` 视为空配置
fn deserialize_data<'de, D>(deserializer: D) -> Result<Option<TagConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DataVisitor)
}

struct DataVisitor;

impl<'de> Visitor<'de> for DataVisitor {
    type Value = Option<TagConfig>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a tag configuration object")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        TagConfig::deserialize(MapAccessDeserializer::new(map)).map(Some)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_type(de::Unexpected::Seq, &self));
        }
        Ok(Some(TagConfig::default()))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }
}
