//! 阿里云 CacheRefreshProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{CacheRefreshProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{AccessCredentials, ObjectType, ProviderKind, RefreshReceipt};

use super::{AliyunProvider, RefreshObjectCachesRequest, RefreshObjectCachesResponse};

impl AliyunProvider {
    /// 请求前的本地校验，失败时不发出网络请求
    fn check_refresh_input(
        &self,
        credentials: &AccessCredentials,
        object_path: &str,
    ) -> Result<()> {
        credentials
            .validate()
            .map_err(|e| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "credentials".to_string(),
                detail: e.to_string(),
                recommend: None,
            })?;

        if object_path.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ObjectPath".to_string(),
                detail: "refresh path must not be empty".to_string(),
                recommend: None,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CacheRefreshProvider for AliyunProvider {
    fn id(&self) -> &'static str {
        self.product.provider_name
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn refresh(
        &self,
        credentials: &AccessCredentials,
        object_path: &str,
        object_type: ObjectType,
    ) -> Result<RefreshReceipt> {
        self.check_refresh_input(credentials, object_path)?;

        let req = RefreshObjectCachesRequest {
            object_path,
            object_type: object_type.as_str(),
            force: self.force,
        };
        let ctx = ErrorContext {
            object_path: Some(object_path.to_string()),
        };

        let response: RefreshObjectCachesResponse = self
            .request(credentials, self.product.refresh_action, &req, ctx)
            .await?;

        log::info!(
            "[{}] Refresh submitted: task {} (request {})",
            self.provider_name(),
            response.refresh_task_id,
            response.request_id
        );

        Ok(response.into())
    }
}
