//! HTTP Layer - 两个进程的 RESTful 入口
//!
//! - 换算服务：换算接口
//! - API 网关：路由表转发

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{create_conversion_routes, create_gateway_routes};
pub use server::{HttpServer, ServerConfig};
pub use state::{ConversionState, GatewayState};
