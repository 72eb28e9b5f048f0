//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{ExchangeClientError, ResolveError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl From<ExchangeClientError> for ApplicationError {
    fn from(err: ExchangeClientError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<ResolveError> for ApplicationError {
    fn from(err: ResolveError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
