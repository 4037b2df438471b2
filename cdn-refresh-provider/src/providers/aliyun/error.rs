//! 阿里云错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AliyunProvider;

/// 阿里云 CDN / DCDN 错误码映射
/// 参考: <https://api.aliyun.com/document/Cdn/2018-05-10/errorCode>
///      <https://api.aliyun.com/document/dcdn/2018-01-15/errorCode>
impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        self.product.provider_name
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let recommend = raw.recommend.clone();

        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "InvalidAccessKeyId"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature",
            ) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
                recommend,
            },

            // ============ 权限 ============
            Some(
                "Forbidden"
                | "Forbidden.RAM"
                | "Forbidden.NoPermission"
                | "NoPermission"
                | "InvalidDomain.NotBelongToUser"
                | "Forbidden.DomainNotBelongToUser",
            ) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
                recommend,
            },

            // ============ 刷新配额 ============
            Some(
                "QuotaExceeded.Refresh"
                | "QuotaExceeded"
                | "RefreshQuota.Exceeded"
                | "Exceed.RefreshQuota",
            ) => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
                recommend,
            },

            // ============ 频率限流（可重试） ============
            Some("Throttling" | "Throttling.User" | "Throttling.Api" | "ServiceUnavailable") => {
                ProviderError::RateLimited {
                    provider,
                    retry_after: None,
                    raw_message: Some(raw.message),
                    recommend,
                }
            }

            // ============ 域名不存在 ============
            Some("InvalidDomain.NotFound" | "DomainNotExist" | "InvalidDomainName.NotFound") => {
                ProviderError::DomainNotFound {
                    provider,
                    domain: context.object_path.unwrap_or_default(),
                    raw_message: Some(raw.message),
                    recommend,
                }
            }

            // ============ 域名已停用/审核中 ============
            Some(
                "InvalidDomain.Offline"
                | "DomainOffline"
                | "InvalidDomain.Configuring"
                | "InvalidDomain.Checking"
                | "DomainInProtectedStatus",
            ) => ProviderError::DomainOffline {
                provider,
                domain: context.object_path.unwrap_or_default(),
                raw_message: Some(raw.message),
                recommend,
            },

            // ============ 参数无效 ============
            Some(
                "InvalidObjectPath.Malformed"
                | "InvalidObjectPath.ExceedLimit"
                | "MissingObjectPath"
                | "InvalidObjectPath.NoHost",
            ) => ProviderError::InvalidParameter {
                provider,
                param: "ObjectPath".to_string(),
                detail: raw.message,
                recommend,
            },
            Some("InvalidObjectType.Malformed" | "InvalidObjectType.ValueNotSupported") => {
                ProviderError::InvalidParameter {
                    provider,
                    param: "ObjectType".to_string(),
                    detail: raw.message,
                    recommend,
                }
            }

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderKind;

    fn cdn() -> AliyunProvider {
        AliyunProvider::new(ProviderKind::Cdn).unwrap()
    }

    fn ctx(path: &str) -> ErrorContext {
        ErrorContext {
            object_path: Some(path.to_string()),
        }
    }

    #[test]
    fn provider_name_follows_product() {
        assert_eq!(cdn().provider_name(), "aliyun-cdn");
        assert_eq!(
            AliyunProvider::new(ProviderKind::Dcdn).unwrap().provider_name(),
            "aliyun-dcdn"
        );
    }

    #[test]
    fn signature_mismatch_is_invalid_credentials() {
        let err = cdn().map_error(
            RawApiError::with_code("SignatureDoesNotMatch", "bad signature"),
            ErrorContext::default(),
        );
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn domain_not_found_carries_object_path() {
        let err = cdn().map_error(
            RawApiError::with_code("InvalidDomain.NotFound", "The domain does not exist."),
            ctx("static.example.com/"),
        );
        match err {
            ProviderError::DomainNotFound { domain, .. } => {
                assert_eq!(domain, "static.example.com/");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn throttling_is_rate_limited() {
        let err = cdn().map_error(
            RawApiError::with_code("Throttling.User", "Request was denied due to user flow control."),
            ErrorContext::default(),
        );
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[test]
    fn unknown_code_keeps_recommend() {
        let raw = RawApiError::with_code("InternalError", "boom")
            .recommend(Some("https://api.aliyun.com/troubleshoot?q=InternalError".to_string()));
        let err = cdn().map_error(raw, ErrorContext::default());
        assert!(matches!(err, ProviderError::Unknown { .. }));
        assert_eq!(
            err.recommendation(),
            Some("https://api.aliyun.com/troubleshoot?q=InternalError")
        );
    }

    #[test]
    fn empty_recommend_is_dropped() {
        let raw = RawApiError::with_code("Forbidden.RAM", "denied").recommend(Some(String::new()));
        let err = cdn().map_error(raw, ErrorContext::default());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
        assert_eq!(err.recommendation(), None);
    }
}
