//! Load-Balanced Rest Client - 通用出站 HTTP 客户端
//!
//! 实现 RestClientPort：展开 URI 模板，`lb://service` 主机经服务注册表解析，
//! 通过进程内共享的 reqwest::Client 发起请求

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{
    ExchangeClientError, ResponseEntity, RestClientPort, ServiceResolverPort,
};

const LOAD_BALANCED_SCHEME: &str = "lb://";

/// 构建进程共享的 HTTP 客户端
///
/// 不设置超时和重试，沿用 reqwest 默认行为
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// 展开 URI 模板中的 `{name}` 变量，变量值按 URI 组件编码
pub fn expand_uri_template(
    template: &str,
    uri_variables: &HashMap<String, String>,
) -> Result<String, ExchangeClientError> {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        expanded.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            ExchangeClientError::InvalidUri(format!("Unclosed variable in {}", template))
        })?;

        let name = &after[..end];
        let value = uri_variables.get(name).ok_or_else(|| {
            ExchangeClientError::InvalidUri(format!(
                "Missing uri variable '{}' for {}",
                name, template
            ))
        })?;
        expanded.push_str(&urlencoding::encode(value));

        rest = &after[end + 1..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// 负载均衡 Rest 客户端
pub struct LoadBalancedRestClient {
    client: Client,
    resolver: Arc<dyn ServiceResolverPort>,
}

impl LoadBalancedRestClient {
    pub fn new(client: Client, resolver: Arc<dyn ServiceResolverPort>) -> Self {
        Self { client, resolver }
    }

    /// 将 `lb://service/path` 替换为实例地址
    fn resolve_uri(&self, uri: &str) -> Result<Url, ExchangeClientError> {
        let absolute = match uri.strip_prefix(LOAD_BALANCED_SCHEME) {
            Some(rest) => {
                let (service, path) = match rest.find('/') {
                    Some(index) => rest.split_at(index),
                    None => (rest, ""),
                };
                let instance = self.resolver.resolve(service)?;
                format!("{}{}", instance.base_url, path)
            }
            None => uri.to_string(),
        };

        let url = Url::parse(&absolute)
            .map_err(|e| ExchangeClientError::InvalidUri(format!("{}: {}", absolute, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ExchangeClientError::InvalidUri(format!(
                "Unsupported scheme '{}' in {}",
                scheme, absolute
            ))),
        }
    }
}

#[async_trait]
impl RestClientPort for LoadBalancedRestClient {
    async fn get(
        &self,
        uri_template: &str,
        uri_variables: &HashMap<String, String>,
    ) -> Result<ResponseEntity<Vec<u8>>, ExchangeClientError> {
        let uri = expand_uri_template(uri_template, uri_variables)?;
        let url = self.resolve_uri(&uri)?;

        tracing::debug!(url = %url, "Sending GET request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_connect() {
                ExchangeClientError::NetworkError(format!("Cannot connect to {}: {}", url, e))
            } else {
                ExchangeClientError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeClientError::UpstreamStatus { status, body });
        }

        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExchangeClientError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        tracing::info!(
            url = %url,
            status = %status,
            body_size = bytes.len(),
            "GET request completed"
        );

        Ok(ResponseEntity {
            status,
            headers,
            body: (!bytes.is_empty()).then(|| bytes.to_vec()),
        })
    }
}
