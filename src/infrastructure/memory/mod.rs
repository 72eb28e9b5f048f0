//! Memory Layer - In-Memory State Management
//!
//! 实现 ServiceResolverPort，维护逻辑服务名到实例地址的内存注册表

mod service_registry;

pub use service_registry::InMemoryServiceRegistry;
