use std::time::Duration;

use axum::{Json, Router, routing::post};
use dynamic_link_redirect::domain::{ExchangeError, LinkExchange};
use dynamic_link_redirect::infrastructure::exchange::HttpLinkExchange;
use serde_json::{Value, json};

/// Starts a stand-in exchange service and returns its endpoint URL.
async fn spawn_exchange(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/v1/exchangeShortLink")
}

async fn known_link(Json(body): Json<Value>) -> Json<Value> {
    if body["requestedLink"] == "https://app.example.com/abc" {
        Json(json!({
            "longLink": "https://long.example.com/?ofl=https%3A%2F%2Fx.com&apn=com.example.app"
        }))
    } else {
        Json(json!({ "longLink": "" }))
    }
}

fn client(endpoint: String) -> HttpLinkExchange {
    HttpLinkExchange::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_exchange_resolves_known_link() {
    let endpoint =
        spawn_exchange(Router::new().route("/v1/exchangeShortLink", post(known_link))).await;

    let link = client(endpoint)
        .resolve_long_link("https://app.example.com/abc")
        .await
        .unwrap()
        .expect("long link");

    assert_eq!(link.get("ofl"), Some("https://x.com"));
    assert_eq!(link.get("apn"), Some("com.example.app"));
}

#[tokio::test]
async fn test_exchange_empty_long_link_is_none() {
    let endpoint =
        spawn_exchange(Router::new().route("/v1/exchangeShortLink", post(known_link))).await;

    let link = client(endpoint)
        .resolve_long_link("https://app.example.com/unknown")
        .await
        .unwrap();

    assert!(link.is_none());
}

#[tokio::test]
async fn test_exchange_malformed_body_is_decode_error() {
    let endpoint = spawn_exchange(
        Router::new().route("/v1/exchangeShortLink", post(|| async { "not json" })),
    )
    .await;

    let result = client(endpoint)
        .resolve_long_link("https://app.example.com/abc")
        .await;

    assert!(matches!(result, Err(ExchangeError::Decode(_))));
}

#[tokio::test]
async fn test_exchange_relative_long_link_is_rejected() {
    let endpoint = spawn_exchange(Router::new().route(
        "/v1/exchangeShortLink",
        post(|| async { Json(json!({ "longLink": "/relative?ofl=x" })) }),
    ))
    .await;

    let result = client(endpoint)
        .resolve_long_link("https://app.example.com/abc")
        .await;

    assert!(matches!(result, Err(ExchangeError::InvalidLongLink { .. })));
}

#[tokio::test]
async fn test_exchange_unreachable_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(format!("http://{addr}/v1/exchangeShortLink"))
        .resolve_long_link("https://app.example.com/abc")
        .await;

    assert!(matches!(result, Err(ExchangeError::Http(_))));
}

#[tokio::test]
async fn test_exchange_timeout_is_http_error() {
    let endpoint = spawn_exchange(Router::new().route(
        "/v1/exchangeShortLink",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({ "longLink": "https://long.example.com/?ofl=x" }))
        }),
    ))
    .await;

    let exchange = HttpLinkExchange::new(endpoint, Duration::from_secs(1)).unwrap();
    let started = tokio::time::Instant::now();

    let result = exchange
        .resolve_long_link("https://app.example.com/abc")
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    match result {
        Err(ExchangeError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}
