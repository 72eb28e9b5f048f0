//! API Gateway
//!
//! 按路径前缀把请求转发到汇率服务或换算服务

use std::sync::Arc;

use currency_mesh::config::{load_config, print_config};
use currency_mesh::infrastructure::adapters::{build_http_client, UpstreamForwarder};
use currency_mesh::infrastructure::http::{
    create_gateway_routes, GatewayState, HttpServer, ServerConfig,
};
use currency_mesh::infrastructure::{init_tracing, InMemoryServiceRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("API Gateway");
    print_config(&config);

    let route_table = config.gateway.route_table()?;
    for route in route_table.routes() {
        tracing::debug!(
            route_id = %route.id(),
            pattern = %route.pattern(),
            target = %route.target(),
            "Route loaded"
        );
    }
    let registry = InMemoryServiceRegistry::from_services(config.registry.services.clone()).arc();
    tracing::info!(
        routes = route_table.len(),
        services = ?registry.services(),
        "Gateway routing ready"
    );

    let forwarder = UpstreamForwarder::new(build_http_client()?, config.gateway.max_body_bytes);
    let state = Arc::new(GatewayState::new(route_table, registry, forwarder));

    let server_config = ServerConfig::new(
        "api-gateway",
        &config.gateway.server.host,
        config.gateway.server.port,
    );
    let server = HttpServer::new(server_config, create_gateway_routes(state));

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}
