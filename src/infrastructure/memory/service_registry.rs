//! In-Memory Service Registry Implementation
//!
//! 逻辑服务名 → 实例地址列表，同一服务的多个实例轮询选取

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::application::ports::{ResolveError, ServiceInstance, ServiceResolverPort};

#[derive(Debug, Default)]
struct ServiceEntry {
    instances: Vec<String>,
    cursor: AtomicUsize,
}

/// 内存服务注册表
pub struct InMemoryServiceRegistry {
    services: DashMap<String, ServiceEntry>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// 从 服务名 → 实例列表 构建注册表
    pub fn from_services<I, S, U>(services: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<U>)>,
        S: Into<String>,
        U: Into<String>,
    {
        let registry = Self::new();
        for (service, instances) in services {
            let service = service.into();
            // 允许注册一个空列表，解析时报 NoInstances
            registry.services.entry(service.clone()).or_default();
            for base_url in instances {
                registry.register(&service, base_url);
            }
        }
        registry
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册一个服务实例，重复注册忽略
    pub fn register(&self, service: &str, base_url: impl Into<String>) {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut entry = self.services.entry(service.to_string()).or_default();
        if !entry.instances.contains(&base_url) {
            tracing::info!(service = %service, base_url = %base_url, "Service instance registered");
            entry.instances.push(base_url);
        }
    }

    /// 注销一个服务实例
    pub fn deregister(&self, service: &str, base_url: &str) -> bool {
        let base_url = base_url.trim_end_matches('/');
        match self.services.get_mut(service) {
            Some(mut entry) => {
                let before = entry.instances.len();
                entry.instances.retain(|url| url != base_url);
                let removed = entry.instances.len() != before;
                if removed {
                    tracing::info!(service = %service, base_url = %base_url, "Service instance deregistered");
                }
                removed
            }
            None => false,
        }
    }

    /// 服务当前的全部实例
    pub fn instances(&self, service: &str) -> Vec<String> {
        self.services
            .get(service)
            .map(|entry| entry.instances.clone())
            .unwrap_or_default()
    }

    pub fn services(&self) -> Vec<String> {
        self.services.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for InMemoryServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceResolverPort for InMemoryServiceRegistry {
    fn resolve(&self, service_name: &str) -> Result<ServiceInstance, ResolveError> {
        let entry = self
            .services
            .get(service_name)
            .ok_or_else(|| ResolveError::UnknownService(service_name.to_string()))?;

        if entry.instances.is_empty() {
            return Err(ResolveError::NoInstances(service_name.to_string()));
        }

        let index = entry.cursor.fetch_add(1, Ordering::Relaxed) % entry.instances.len();
        let base_url = entry.instances[index].clone();

        tracing::debug!(service = %service_name, base_url = %base_url, "Service resolved");

        Ok(ServiceInstance {
            service_name: service_name.to_string(),
            base_url,
        })
    }
}
