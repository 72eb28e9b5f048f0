//! Rest Client Port - 通用 HTTP 客户端抽象
//!
//! 调用方提供完整 URI 模板和变量表，返回带状态码和响应头的 ResponseEntity

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use thiserror::Error;

use super::ResolveError;

/// 出站调用错误
#[derive(Debug, Error)]
pub enum ExchangeClientError {
    #[error("Invalid uri: {0}")]
    InvalidUri(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Upstream returned an empty body")]
    EmptyBody,
}

/// HTTP 响应实体
#[derive(Debug, Clone)]
pub struct ResponseEntity<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// 空响应体为 None
    pub body: Option<T>,
}

impl ResponseEntity<Vec<u8>> {
    /// 将原始响应体解码为 JSON
    pub fn into_json<T: DeserializeOwned>(self) -> Result<ResponseEntity<T>, ExchangeClientError> {
        let body = match self.body {
            Some(bytes) if !bytes.is_empty() => Some(
                serde_json::from_slice(&bytes)
                    .map_err(|e| ExchangeClientError::InvalidResponse(e.to_string()))?,
            ),
            _ => None,
        };

        Ok(ResponseEntity {
            status: self.status,
            headers: self.headers,
            body,
        })
    }
}

impl<T> ResponseEntity<T> {
    /// 取出响应体，空响应体视为错误
    pub fn into_body(self) -> Result<T, ExchangeClientError> {
        self.body.ok_or(ExchangeClientError::EmptyBody)
    }
}

/// Rest Client Port
///
/// URI 模板中的 `lb://service` 主机名由服务注册表解析
#[async_trait]
pub trait RestClientPort: Send + Sync {
    /// 发送 GET 请求，非 2xx 状态返回 `UpstreamStatus`
    async fn get(
        &self,
        uri_template: &str,
        uri_variables: &HashMap<String, String>,
    ) -> Result<ResponseEntity<Vec<u8>>, ExchangeClientError>;
}
