//! Ping Handler
//!
//! 存活检查，网关不会转发该路径

use axum::Json;
use serde::Serialize;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

fn pong(service: &'static str) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        service,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 网关存活检查
pub async fn gateway_ping() -> Json<PingResponse> {
    pong("api-gateway")
}

/// 换算服务存活检查
pub async fn conversion_ping() -> Json<PingResponse> {
    pong("currency-conversion")
}
