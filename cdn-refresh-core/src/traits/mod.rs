//! 外部依赖抽象 trait 定义

mod tag_resolver;

pub use tag_resolver::TagResolver;

// Re-export provider 库的刷新 trait
pub use cdn_refresh_provider::CacheRefreshProvider;
