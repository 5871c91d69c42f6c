mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::{DESKTOP_UA, StubExchange, create_test_state, make_server, test_config};
use dynamic_link_redirect::routes::app_router;
use tower::ServiceExt;

fn exchange() -> StubExchange {
    StubExchange::default().with_link(
        "http://app.example.com/abc",
        "https://long.example.com/?ofl=https%3A%2F%2Fx.com",
    )
}

#[tokio::test]
async fn test_trailing_slash_resolves_like_bare_path() {
    let app = app_router(create_test_state(test_config("hyphenated"), exchange()));

    let request = Request::builder()
        .uri("/abc/")
        .header(header::HOST, "app.example.com")
        .header(header::USER_AGENT, DESKTOP_UA)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://x.com");
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = make_server(test_config("hyphenated"), exchange());

    let response = server
        .method(Method::OPTIONS, "/abc")
        .add_header("Origin", "https://web.example.com")
        .add_header("Access-Control-Request-Method", "GET")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.header("access-control-max-age"), "300");
}

#[tokio::test]
async fn test_cors_header_on_redirect() {
    let server = make_server(test_config("hyphenated"), exchange());

    let response = server
        .get("/abc")
        .add_header("Host", "app.example.com")
        .add_header("User-Agent", DESKTOP_UA)
        .add_header("Origin", "https://web.example.com")
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("access-control-allow-origin"), "*");
}
