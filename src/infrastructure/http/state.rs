//! Application State
//!
//! 两个进程各自的 axum 状态，端口在 main 中显式构造后注入

use std::sync::Arc;

use crate::application::{CalculateConversionHandler, ServiceResolverPort};
use crate::domain::routing::RouteTable;
use crate::infrastructure::adapters::UpstreamForwarder;

/// 换算服务状态
pub struct ConversionState {
    pub conversion_handler: CalculateConversionHandler,
}

impl ConversionState {
    pub fn new(conversion_handler: CalculateConversionHandler) -> Self {
        Self { conversion_handler }
    }
}

/// 网关状态
pub struct GatewayState {
    pub route_table: RouteTable,
    pub resolver: Arc<dyn ServiceResolverPort>,
    pub forwarder: UpstreamForwarder,
}

impl GatewayState {
    pub fn new(
        route_table: RouteTable,
        resolver: Arc<dyn ServiceResolverPort>,
        forwarder: UpstreamForwarder,
    ) -> Self {
        Self {
            route_table,
            resolver,
            forwarder,
        }
    }
}
