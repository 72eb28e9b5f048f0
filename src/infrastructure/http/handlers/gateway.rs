//! Gateway HTTP Handler
//!
//! 所有未被本地路由处理的请求进入这里：匹配路由表，解析上游，转发

use axum::{
    extract::{Request, State},
    response::Response,
};
use std::sync::Arc;

use crate::domain::routing::RouteTarget;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::GatewayState;

/// 按路由表转发请求
pub async fn forward_request(
    State(state): State<Arc<GatewayState>>,
    request: Request,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    let matched = state
        .route_table
        .route(&path)
        .ok_or_else(|| ApiError::NotFound(format!("No route matches {}", path)))?;

    let base_url = match &matched.target {
        RouteTarget::LoadBalanced(service) => state.resolver.resolve(service)?.base_url,
        RouteTarget::Direct(url) => url.clone(),
    };

    tracing::debug!(
        route_id = %matched.route_id,
        target = %matched.target,
        path = %path,
        forward_path = %matched.path,
        base_url = %base_url,
        "Route matched"
    );

    let response = state
        .forwarder
        .forward(request, &base_url, &matched.path)
        .await?;

    Ok(response)
}
