//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::routing::{RewritePath, RouteDefinition, RouteError, RouteTable};

/// 应用主配置
///
/// 网关与换算服务共用一份配置，各自读取自己的段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// API 网关配置
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// 换算服务配置
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// 服务注册表配置
    #[serde(default)]
    pub registry: RegistryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 监听配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// API 网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_server")]
    pub server: ServerConfig,

    /// 转发请求体上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// 路由规则，按声明顺序匹配
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

fn default_gateway_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: 8765,
    }
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new(
            "currency-exchange",
            "/currency-exchange/**",
            "lb://currency-exchange",
        ),
        RouteConfig::new(
            "currency-conversion",
            "/currency-conversion/**",
            "lb://currency-conversion",
        ),
        RouteConfig::new(
            "currency-conversion-feign",
            "/currency-conversion-feign/**",
            "lb://currency-conversion",
        ),
        RouteConfig {
            rewrite_path: Some(RewritePathConfig {
                regex: "/currency-conversion-new/(?<segment>.*)".to_string(),
                replacement: "/currency-conversion-feign/${segment}".to_string(),
            }),
            ..RouteConfig::new(
                "currency-conversion-new",
                "/currency-conversion-new/**",
                "lb://currency-conversion",
            )
        },
    ]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: default_gateway_server(),
            max_body_bytes: default_max_body_bytes(),
            routes: default_routes(),
        }
    }
}

impl GatewayConfig {
    /// 构建有序路由表
    pub fn route_table(&self) -> Result<RouteTable, RouteError> {
        self.routes
            .iter()
            .map(RouteConfig::to_definition)
            .collect::<Result<Vec<_>, _>>()
            .map(RouteTable::new)
    }
}

/// 单条路由配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    pub id: String,

    /// 路径模式，如 `/currency-exchange/**`
    pub path: String,

    /// 目标，`lb://service` 或 `http://host:port`
    pub uri: String,

    /// 可选的路径重写
    #[serde(default)]
    pub rewrite_path: Option<RewritePathConfig>,
}

impl RouteConfig {
    pub fn new(id: &str, path: &str, uri: &str) -> Self {
        Self {
            id: id.to_string(),
            path: path.to_string(),
            uri: uri.to_string(),
            rewrite_path: None,
        }
    }

    fn to_definition(&self) -> Result<RouteDefinition, RouteError> {
        let route = RouteDefinition::new(self.id.clone(), &self.path, &self.uri)?;
        match &self.rewrite_path {
            Some(rewrite) => Ok(route.with_rewrite(RewritePath::new(
                &rewrite.regex,
                rewrite.replacement.clone(),
            )?)),
            None => Ok(route),
        }
    }
}

/// 路径重写配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewritePathConfig {
    pub regex: String,
    pub replacement: String,
}

/// 换算服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    #[serde(default = "default_conversion_server")]
    pub server: ServerConfig,

    /// 汇率服务的逻辑名
    #[serde(default = "default_exchange_service")]
    pub exchange_service: String,
}

fn default_conversion_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: 8100,
    }
}

fn default_exchange_service() -> String {
    crate::infrastructure::adapters::CURRENCY_EXCHANGE_SERVICE.to_string()
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            server: default_conversion_server(),
            exchange_service: default_exchange_service(),
        }
    }
}

/// 服务注册表配置
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// 逻辑服务名 → 实例基础 URL 列表
    #[serde(default = "default_services")]
    pub services: BTreeMap<String, Vec<String>>,
}

fn default_services() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "currency-exchange".to_string(),
            vec!["http://localhost:8000".to_string()],
        ),
        (
            "currency-conversion".to_string(),
            vec!["http://localhost:8100".to_string()],
        ),
    ])
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
