//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use reqwest::Url;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `MESH_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `MESH_GATEWAY__SERVER__PORT=8765`
/// - `MESH_CONVERSION__SERVER__PORT=8100`
/// - `MESH_CONVERSION__EXCHANGE_SERVICE=currency-exchange`
/// - `MESH_LOG__LEVEL=debug`
///
/// 路由表和注册表是列表/映射，只能在配置文件中覆盖
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），列表/映射类默认值由 serde default 提供
    builder = builder
        .set_default("gateway.server.host", "0.0.0.0")?
        .set_default("gateway.server.port", 8765)?
        .set_default("gateway.max_body_bytes", 10 * 1024 * 1024)?
        .set_default("conversion.server.host", "0.0.0.0")?
        .set_default("conversion.server.port", 8100)?
        .set_default("conversion.exchange_service", "currency-exchange")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: MESH_GATEWAY__SERVER__PORT=9000
    builder = builder.add_source(
        Environment::with_prefix("MESH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.gateway.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Gateway port cannot be 0".to_string(),
        ));
    }

    if config.conversion.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Conversion port cannot be 0".to_string(),
        ));
    }

    if config.conversion.exchange_service.is_empty() {
        return Err(ConfigError::ValidationError(
            "Exchange service name cannot be empty".to_string(),
        ));
    }

    // 路由：模式、目标、重写正则都必须可用
    config
        .gateway
        .route_table()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    for (service, instances) in &config.registry.services {
        for base_url in instances {
            let valid = Url::parse(base_url)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid instance url for service {}: {}",
                    service, base_url
                )));
            }
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Gateway: {}", config.gateway.server.addr());
    tracing::info!("Gateway Max Body: {} bytes", config.gateway.max_body_bytes);
    for route in &config.gateway.routes {
        match &route.rewrite_path {
            Some(rewrite) => tracing::info!(
                "Route {}: {} -> {} (rewrite {} => {})",
                route.id,
                route.path,
                route.uri,
                rewrite.regex,
                rewrite.replacement
            ),
            None => tracing::info!("Route {}: {} -> {}", route.id, route.path, route.uri),
        }
    }
    tracing::info!("Conversion: {}", config.conversion.server.addr());
    tracing::info!("Exchange Service: {}", config.conversion.exchange_service);
    for (service, instances) in &config.registry.services {
        tracing::info!("Registry {}: {:?}", service, instances);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
