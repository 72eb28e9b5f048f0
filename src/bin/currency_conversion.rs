//! Currency Conversion Service
//!
//! 通过通用客户端或声明式客户端调用汇率服务，计算换算结果

use std::sync::Arc;

use currency_mesh::application::CalculateConversionHandler;
use currency_mesh::config::{load_config, print_config};
use currency_mesh::infrastructure::adapters::{
    build_http_client, HttpCurrencyExchangeProxy, LoadBalancedRestClient,
};
use currency_mesh::infrastructure::http::{
    create_conversion_routes, ConversionState, HttpServer, ServerConfig,
};
use currency_mesh::infrastructure::{init_tracing, InMemoryServiceRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Currency Conversion Service");
    print_config(&config);

    // 服务注册表
    let registry = InMemoryServiceRegistry::from_services(config.registry.services.clone()).arc();

    // 进程共享的 HTTP 客户端，两种客户端形态共用
    let http_client = build_http_client()?;
    let rest_client = Arc::new(LoadBalancedRestClient::new(http_client, registry));
    let exchange_proxy = Arc::new(HttpCurrencyExchangeProxy::new(
        rest_client.clone(),
        &config.conversion.exchange_service,
    ));

    let conversion_handler = CalculateConversionHandler::new(
        rest_client,
        exchange_proxy,
        config.conversion.exchange_service.clone(),
    );
    let state = Arc::new(ConversionState::new(conversion_handler));

    let server_config = ServerConfig::new(
        "currency-conversion",
        &config.conversion.server.host,
        config.conversion.server.port,
    );
    let server = HttpServer::new(server_config, create_conversion_routes(state));

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
