use axum::body::Body;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use tower::Service;

use crate::tests::helper;

fn create_mapping_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/mappings")
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, token);
    }

    builder
        .body(Body::from(
            r#"{ "url": "https://www.example.com/", "alias": "gopher" }"#,
        ))
        .unwrap()
}

#[tokio::test]
async fn test_api_requires_token_when_configured() {
    let mut app = helper::setup_test_app_with_token("sesame");

    let response = app.call(create_mapping_request(None)).await.unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    let response = app
        .call(create_mapping_request(Some("wrong")))
        .await
        .unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    let response = app
        .call(create_mapping_request(Some("sesame")))
        .await
        .unwrap();
    assert_eq!(StatusCode::CREATED, response.status());
}

#[tokio::test]
async fn test_redirect_stays_public_with_token() {
    let mut app = helper::setup_test_app_with_token("sesame");

    let response = app
        .call(create_mapping_request(Some("sesame")))
        .await
        .unwrap();
    assert_eq!(StatusCode::CREATED, response.status());

    // no Authorization header needed for the redirect
    let (status_code, location, _) = helper::root(&mut app, "gopher").await;
    assert_eq!(StatusCode::TEMPORARY_REDIRECT, status_code);
    assert_eq!(Some("https://www.example.com/".to_string()), location);
}

#[tokio::test]
async fn test_api_open_without_token() {
    let mut app = helper::setup_test_app();

    let response = app.call(create_mapping_request(None)).await.unwrap();
    assert_eq!(StatusCode::CREATED, response.status());
}
