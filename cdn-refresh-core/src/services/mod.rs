//! 业务逻辑服务层

mod refresh_orchestrator;

pub use refresh_orchestrator::RefreshOrchestrator;
