//! 类型定义模块

mod report;
mod tag_config;

pub use report::{RefreshReport, RefreshResult, TagFailure, TagRefreshResult};
pub use tag_config::{GroupConfig, GroupEntry, NamedGroup, TagConfig};

// Re-export provider 库的公共类型
pub use cdn_refresh_provider::{
    AccessCredentials, CredentialValidationError, ObjectType, ProviderKind, RefreshReceipt,
};
