mod common;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use futures_util::stream;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use currency_mesh::config::GatewayConfig;
use currency_mesh::infrastructure::adapters::{build_http_client, UpstreamForwarder};
use currency_mesh::infrastructure::http::{create_gateway_routes, GatewayState};
use currency_mesh::infrastructure::InMemoryServiceRegistry;

use common::{conversion_app, get_path, refused_base_url, send, MockExchange, TestServer};

/// 回显上游：返回它实际收到的方法、路径、查询串和请求体
async fn echo(State(service): State<&'static str>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    if parts.uri.path().ends_with("/teapot") {
        return StatusCode::IM_A_TEAPOT.into_response();
    }

    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "service": service,
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "body": String::from_utf8_lossy(&body),
        "forwardedHost": header("x-forwarded-host"),
        "connection": header("connection"),
    }))
    .into_response()
}

async fn echo_server(service: &'static str) -> TestServer {
    TestServer::start(Router::new().fallback(echo).with_state(service)).await
}

fn gateway_app(services: &[(&str, &str)]) -> Router {
    let mut registry_services: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (service, base_url) in services {
        registry_services
            .entry(service.to_string())
            .or_default()
            .push(base_url.to_string());
    }

    let route_table = GatewayConfig::default().route_table().unwrap();
    let registry = Arc::new(InMemoryServiceRegistry::from_services(registry_services));
    let forwarder = UpstreamForwarder::new(build_http_client().unwrap(), 1024);

    create_gateway_routes(Arc::new(GatewayState::new(route_table, registry, forwarder)))
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_exchange_route_forwards_unmodified() {
    let exchange = echo_server("currency-exchange").await;
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[
        ("currency-exchange", exchange.base_url.as_str()),
        ("currency-conversion", conversion.base_url.as_str()),
    ]);

    let (status, body) = get_path(app, "/currency-exchange/from/USD/to/INR").await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["service"], "currency-exchange");
    assert_eq!(body["path"], "/currency-exchange/from/USD/to/INR");
}

#[tokio::test]
async fn test_conversion_routes_forward_unmodified() {
    let exchange = echo_server("currency-exchange").await;
    let conversion = echo_server("currency-conversion").await;

    for path in [
        "/currency-conversion/from/USD/to/INR/quantity/10",
        "/currency-conversion-feign/from/USD/to/INR/quantity/10",
    ] {
        let app = gateway_app(&[
            ("currency-exchange", exchange.base_url.as_str()),
            ("currency-conversion", conversion.base_url.as_str()),
        ]);
        let (status, body) = get_path(app, path).await;

        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["service"], "currency-conversion");
        assert_eq!(body["path"], path);
    }
}

#[tokio::test]
async fn test_new_route_rewrites_path_and_keeps_query() {
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[("currency-conversion", conversion.base_url.as_str())]);

    let (status, body) = get_path(
        app,
        "/currency-conversion-new/from/USD/to/INR/quantity/10?trace=1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["service"], "currency-conversion");
    assert_eq!(
        body["path"],
        "/currency-conversion-feign/from/USD/to/INR/quantity/10"
    );
    assert_eq!(body["query"], "trace=1");
}

#[tokio::test]
async fn test_forwards_method_body_and_headers() {
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[("currency-conversion", conversion.base_url.as_str())]);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/currency-conversion/batch")
        .header("host", "gateway.local:8765")
        .header("connection", "keep-alive")
        .body(Body::from("USD,INR,10"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["body"], "USD,INR,10");
    assert_eq!(body["forwardedHost"], "gateway.local:8765");
    assert_ne!(body["connection"], "keep-alive");
}

#[tokio::test]
async fn test_upstream_status_passes_through() {
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[("currency-conversion", conversion.base_url.as_str())]);

    let (status, _) = get_path(app, "/currency-conversion/teapot").await;
    assert_eq!(status, StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn test_unmatched_path_is_not_found() {
    let app = gateway_app(&[]);
    let (status, _) = get_path(app, "/limits").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_instance_is_unavailable() {
    let app = gateway_app(&[]);
    let (status, _) = get_path(app, "/currency-exchange/from/USD/to/INR").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let base_url = refused_base_url().await;
    let app = gateway_app(&[("currency-exchange", base_url.as_str())]);

    let (status, _) = get_path(app, "/currency-exchange/from/USD/to/INR").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[("currency-conversion", conversion.base_url.as_str())]);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/currency-conversion/batch")
        .header("content-length", "4096")
        .body(Body::from(vec![b'x'; 4096]))
        .unwrap();
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_oversized_chunked_body_is_rejected() {
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[("currency-conversion", conversion.base_url.as_str())]);

    // 无 Content-Length，8 x 512 字节超过 1024 上限
    let chunks = stream::iter(
        (0..8).map(|_| Ok::<_, std::io::Error>(Bytes::from(vec![b'x'; 512]))),
    );
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/currency-conversion/batch")
        .body(Body::from_stream(chunks))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(&body)["errno"], 413);
}

#[tokio::test]
async fn test_chunked_body_within_limit_is_forwarded() {
    let conversion = echo_server("currency-conversion").await;
    let app = gateway_app(&[("currency-conversion", conversion.base_url.as_str())]);

    let chunks = stream::iter(
        ["USD,", "INR,", "10"].map(|chunk| Ok::<_, std::io::Error>(Bytes::from(chunk))),
    );
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/currency-conversion/batch")
        .body(Body::from_stream(chunks))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["body"], "USD,INR,10");
}

#[tokio::test]
async fn test_gateway_ping_is_local() {
    let app = gateway_app(&[]);
    let (status, body) = get_path(app, "/ping").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["service"], "api-gateway");
}

#[tokio::test]
async fn test_end_to_end_through_gateway() {
    let exchange = MockExchange::start().await;
    let conversion = TestServer::start(conversion_app(exchange.base_url())).await;
    let app = gateway_app(&[
        ("currency-exchange", exchange.base_url()),
        ("currency-conversion", conversion.base_url.as_str()),
    ]);

    let (status, body) = get_path(
        app,
        "/currency-conversion-new/from/USD/to/INR/quantity/10",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["totalCalculatedAmount"], json!(650));
    assert_eq!(body["environment"], "8000 instance-id feign");
    assert_eq!(exchange.hits(), 1);
}
