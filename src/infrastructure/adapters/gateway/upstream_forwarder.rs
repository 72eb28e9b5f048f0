//! Upstream Forwarder - 网关请求转发
//!
//! 将入站请求原样转发到上游实例，响应体以流的方式返回

use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use http::header::{CONNECTION, CONTENT_LENGTH, HOST};
use http::{HeaderMap, HeaderName, HeaderValue};
use http_body_util::LengthLimitError;
use reqwest::{Client, Url};
use std::error::Error as _;
use thiserror::Error;

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// 逐跳头，不能跨代理转发
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// 转发错误
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Invalid upstream url: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

/// 移除逐跳头，包括 `Connection` 中声明的头
pub fn strip_hop_by_hop_headers(headers: &mut HeaderMap) {
    let declared: Vec<HeaderName> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in declared {
        headers.remove(name);
    }
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// 拼接上游 URL：实例地址 + 转发路径 + 原始查询串
pub fn upstream_url(base_url: &str, path: &str, query: Option<&str>) -> Result<Url, ForwardError> {
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), path);
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }
    Url::parse(&url).map_err(|e| ForwardError::InvalidUrl(format!("{}: {}", url, e)))
}

/// 上游转发器
pub struct UpstreamForwarder {
    client: Client,
    max_body_bytes: usize,
}

impl UpstreamForwarder {
    pub fn new(client: Client, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }

    /// 转发请求到 `base_url` + `path`
    pub async fn forward(
        &self,
        request: Request,
        base_url: &str,
        path: &str,
    ) -> Result<Response, ForwardError> {
        let (parts, body) = request.into_parts();
        let url = upstream_url(base_url, path, parts.uri.query())?;

        let declared_length = parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared_length.is_some_and(|len| len > self.max_body_bytes) {
            return Err(ForwardError::BodyTooLarge {
                limit: self.max_body_bytes,
            });
        }

        // 分块上传没有 Content-Length，只能在读取时发现超限
        let body = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|e| {
                if e.source().is_some_and(|s| s.is::<LengthLimitError>()) {
                    ForwardError::BodyTooLarge {
                        limit: self.max_body_bytes,
                    }
                } else {
                    ForwardError::BodyRead(e.to_string())
                }
            })?;

        let mut headers = parts.headers.clone();
        strip_hop_by_hop_headers(&mut headers);
        headers.remove(HOST);
        headers.remove(CONTENT_LENGTH);
        if let Some(host) = parts.headers.get(HOST) {
            headers.insert(X_FORWARDED_HOST, host.clone());
        }
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("http"));

        tracing::debug!(
            method = %parts.method,
            url = %url,
            body_size = body.len(),
            "Forwarding request upstream"
        );

        let mut builder = self
            .client
            .request(parts.method.clone(), url.clone())
            .headers(headers);
        if !body.is_empty() {
            builder = builder.body(body);
        }

        let upstream = builder
            .send()
            .await
            .map_err(|e| ForwardError::Upstream(format!("{}: {}", url, e)))?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop_headers(&mut response_headers);

        tracing::info!(
            method = %parts.method,
            url = %url,
            status = %status.as_u16(),
            "Upstream responded"
        );

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;

        Ok(response)
    }
}
