use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_missing_content_type() {
    let mut app = helper::setup_test_app();

    let (status_code, error) = helper::maybe_create_mapping_with_raw_body(
        &mut app,
        r#"{ "url": "https://www.example.com/" }"#,
        false,
    )
    .await;

    assert_eq!(StatusCode::BAD_REQUEST, status_code);

    let error = error.unwrap();
    assert_eq!("Missing `application/json` content type", error.error);
    assert_eq!(None, error.description);
}

#[tokio::test]
async fn test_syntax_error() {
    let mut app = helper::setup_test_app();

    let (status_code, error) =
        helper::maybe_create_mapping_with_raw_body(&mut app, r#"{ "url": "#, true).await;

    assert_eq!(StatusCode::BAD_REQUEST, status_code);

    let error = error.unwrap();
    assert_eq!("JSON syntax error", error.error);
    assert!(error.description.is_some());
}

#[tokio::test]
async fn test_data_error() {
    let mut app = helper::setup_test_app();

    let (status_code, error) =
        helper::maybe_create_mapping_with_raw_body(&mut app, r#"{ "url": 42 }"#, true).await;

    assert_eq!(StatusCode::BAD_REQUEST, status_code);

    let error = error.unwrap();
    assert_eq!("Data error", error.error);
    assert!(error.description.is_some());
}
