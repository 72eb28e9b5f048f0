//! HTTP Routes
//!
//! Currency Conversion Service:
//! - /currency-conversion/from/:from/to/:to/quantity/:quantity        GET  通用客户端换算
//! - /currency-conversion-feign/from/:from/to/:to/quantity/:quantity  GET  声明式客户端换算
//! - /ping                                                            GET  存活检查
//!
//! API Gateway:
//! - /ping  GET  存活检查
//! - 其余路径按路由表转发

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::{ConversionState, GatewayState};

/// 换算服务路由
pub fn create_conversion_routes(state: Arc<ConversionState>) -> Router {
    Router::new()
        .route("/ping", get(handlers::conversion_ping))
        .route(
            "/currency-conversion/from/:from/to/:to/quantity/:quantity",
            get(handlers::calculate_currency_conversion),
        )
        .route(
            "/currency-conversion-feign/from/:from/to/:to/quantity/:quantity",
            get(handlers::calculate_currency_conversion_feign),
        )
        .with_state(state)
}

/// 网关路由
pub fn create_gateway_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/ping", get(handlers::gateway_ping))
        .fallback(handlers::forward_request)
        .with_state(state)
}
