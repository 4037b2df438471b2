//! 阿里云 API 类型定义和辅助函数

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{ProviderError, Result};
use crate::types::RefreshReceipt;

// ============ RFC3986 URL 编码 ============

/// RFC3986 URL 编码
pub fn url_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                result.push(c);
            }
            _ => {
                let mut buf = [0_u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    let _ = write!(result, "%{byte:02X}");
                }
            }
        }
    }
    result
}

/// 将扁平的请求结构体序列化为排序后的 query string (规范化请求与 URL 共用)
///
/// 只接受由标量字段组成的对象，`null` 字段省略。
pub fn serialize_to_query_string<T: Serialize>(params: &T, provider: &str) -> Result<String> {
    let serialization_error = |detail: String| ProviderError::SerializationError {
        provider: provider.to_string(),
        detail,
    };

    let value = serde_json::to_value(params).map_err(|e| serialization_error(e.to_string()))?;
    let serde_json::Value::Object(fields) = value else {
        return Err(serialization_error(
            "request parameters must serialize to an object".to_string(),
        ));
    };

    let mut pairs = BTreeMap::new();
    for (key, value) in fields {
        let value = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => continue,
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(serialization_error(format!(
                    "nested request parameter is not supported: {key}"
                )));
            }
        };
        pairs.insert(key, value);
    }

    Ok(pairs
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

// ============ 刷新接口 ============

/// `RefreshObjectCaches` / `RefreshDcdnObjectCaches` 请求参数（两者一致）
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshObjectCachesRequest<'a> {
    pub object_path: &'a str,
    pub object_type: &'static str,
    pub force: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshObjectCachesResponse {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub refresh_task_id: String,
}

impl From<RefreshObjectCachesResponse> for RefreshReceipt {
    fn from(resp: RefreshObjectCachesResponse) -> Self {
        Self {
            request_id: resp.request_id,
            refresh_task_id: resp.refresh_task_id,
        }
    }
}

// ============ 错误响应 ============

/// 阿里云 OpenAPI 错误体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliyunErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub recommend: Option<String>,
}
