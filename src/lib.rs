//! Currency Mesh - 货币换算微服务示例
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Conversion Context: 换算结果与汇率报价
//! - Routing Context: 网关路径匹配与重写
//!
//! 应用层 (application/):
//! - Ports: RestClient, CurrencyExchangeProxy, ServiceResolver
//! - Commands: 换算命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 换算服务与 API 网关的入口
//! - Memory: 服务注册表内存实现
//! - Adapters: 汇率出站客户端、网关上游转发

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
