//! Routing Context - Domain Errors

use thiserror::Error;

/// 路由定义错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid path pattern: {0}")]
    InvalidPattern(String),

    #[error("Unsupported path pattern: {0}")]
    UnsupportedPattern(String),

    #[error("Invalid route uri: {0}")]
    InvalidUri(String),

    #[error("Invalid rewrite regex: {0}")]
    InvalidRewrite(String),
}
