#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::util::ServiceExt;

use currency_mesh::application::CalculateConversionHandler;
use currency_mesh::infrastructure::adapters::{
    build_http_client, HttpCurrencyExchangeProxy, LoadBalancedRestClient,
};
use currency_mesh::infrastructure::http::{create_conversion_routes, ConversionState};
use currency_mesh::infrastructure::InMemoryServiceRegistry;

/// 在随机端口上运行的 axum 服务
pub struct TestServer {
    pub base_url: String,
    join: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");

        let join = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server error");
        });

        Self {
            base_url: format!("http://{}", addr),
            join,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// 一个没有进程监听的地址
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Clone)]
struct ExchangeState {
    hits: Arc<AtomicUsize>,
}

async fn exchange_value(
    State(state): State<ExchangeState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if from == "ERR" {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "id": 10001,
        "from": from,
        "to": to,
        "conversionMultiple": 65,
        "environment": "8000 instance-id"
    })))
}

/// 模拟汇率服务，固定返回 65 的汇率
pub struct MockExchange {
    pub server: TestServer,
    pub hits: Arc<AtomicUsize>,
}

impl MockExchange {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/currency-exchange/from/:from/to/:to", get(exchange_value))
            .with_state(ExchangeState { hits: hits.clone() });

        Self {
            server: TestServer::start(app).await,
            hits,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// 换算服务路由，汇率服务解析到 `exchange_base_url`
pub fn conversion_app(exchange_base_url: &str) -> Router {
    let registry = Arc::new(InMemoryServiceRegistry::from_services([(
        "currency-exchange",
        vec![exchange_base_url.to_string()],
    )]));
    let rest_client = Arc::new(LoadBalancedRestClient::new(
        build_http_client().expect("http client"),
        registry,
    ));
    let exchange_proxy = Arc::new(HttpCurrencyExchangeProxy::new(
        rest_client.clone(),
        "currency-exchange",
    ));
    let handler = CalculateConversionHandler::new(rest_client, exchange_proxy, "currency-exchange");

    create_conversion_routes(Arc::new(ConversionState::new(handler)))
}

/// 通过 oneshot 发送请求，返回状态码与响应体
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.expect("oneshot");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, body.to_vec())
}

pub async fn get_path(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}
