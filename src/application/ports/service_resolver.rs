//! Service Resolver Port - 服务发现抽象
//!
//! 把逻辑服务名（如 `currency-exchange`）解析为可访问的网络地址，
//! 具体实现在 infrastructure/memory 层（InMemoryServiceRegistry）

use thiserror::Error;

/// 服务解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("No available instance for service: {0}")]
    NoInstances(String),
}

/// 已解析的服务实例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub service_name: String,
    /// 实例基础 URL，不带结尾斜杠，如 `http://localhost:8000`
    pub base_url: String,
}

/// Service Resolver Port
pub trait ServiceResolverPort: Send + Sync {
    /// 为一次调用选择服务实例
    fn resolve(&self, service_name: &str) -> Result<ServiceInstance, ResolveError>;
}
