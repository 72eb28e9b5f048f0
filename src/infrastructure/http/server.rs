//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置，两个进程共用

use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::access_log_middleware;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: &'static str,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(name: &'static str, host: impl Into<String>, port: u16) -> Self {
        Self {
            name,
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    routes: Router,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器，`routes` 已绑定状态
    pub fn new(config: ServerConfig, routes: Router) -> Self {
        Self { config, routes }
    }

    /// 在路由外包一层日志与 CORS
    pub fn build_router(routes: Router) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(std::time::Duration::from_secs(3600));

        routes
            .layer(middleware::from_fn(access_log_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr();
        let router = Self::build_router(self.routes);

        info!(
            service = self.config.name,
            "Starting HTTP server on {} (with graceful shutdown)", addr
        );

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}
