use axum::http::StatusCode;

use crate::alias;
use crate::tests::helper;

#[tokio::test]
async fn test_create_with_custom_alias() {
    let mut app = helper::setup_test_app();

    let url = "https://www.example.com/";

    let (status_code, mapping, _) =
        helper::maybe_create_mapping(&mut app, url, Some("some-easy-name")).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let mapping = mapping.unwrap();
    assert_eq!(1, mapping.id);
    assert_eq!("some-easy-name", mapping.alias);
    assert_eq!(url, mapping.url);

    // reachable right away
    let (status_code, location, _) = helper::root(&mut app, "some-easy-name").await;
    assert_eq!(StatusCode::TEMPORARY_REDIRECT, status_code);
    assert_eq!(Some(url.to_string()), location);
}

#[tokio::test]
async fn test_create_with_generated_alias() {
    let mut app = helper::setup_test_app();

    let url = "https://www.example.com/";

    let (status_code, mapping, _) = helper::maybe_create_mapping(&mut app, url, None).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let mapping = mapping.unwrap();
    assert_eq!(1, mapping.id);
    assert_eq!(alias::DEFAULT_LENGTH, mapping.alias.len());
    assert!(
        mapping
            .alias
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
    );

    let (status_code, location, _) = helper::root(&mut app, &mapping.alias).await;
    assert_eq!(StatusCode::TEMPORARY_REDIRECT, status_code);
    assert_eq!(Some(url.to_string()), location);
}

#[tokio::test]
async fn test_create_with_empty_alias_generates_one() {
    let mut app = helper::setup_test_app();

    let (status_code, mapping, _) =
        helper::maybe_create_mapping(&mut app, "https://www.example.com/", Some("")).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let mapping = mapping.unwrap();
    assert_eq!(alias::DEFAULT_LENGTH, mapping.alias.len());
}

#[tokio::test]
async fn test_create_with_taken_alias() {
    let mut app = helper::setup_test_app();

    let (status_code, _, _) =
        helper::maybe_create_mapping(&mut app, "https://www.example.com/a", Some("taken")).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let (status_code, mapping, error) =
        helper::maybe_create_mapping(&mut app, "https://www.example.com/b", Some("taken")).await;
    assert_eq!(StatusCode::CONFLICT, status_code);
    assert!(mapping.is_none());
    assert_eq!(Some("Alias already exists".to_string()), error);

    // the first mapping is unchanged
    let (status_code, location, _) = helper::root(&mut app, "taken").await;
    assert_eq!(StatusCode::TEMPORARY_REDIRECT, status_code);
    assert_eq!(Some("https://www.example.com/a".to_string()), location);
}

#[tokio::test]
async fn test_create_with_invalid_url() {
    let mut app = helper::setup_test_app();

    let (status_code, mapping, error) =
        helper::maybe_create_mapping(&mut app, "not a url", Some("some-easy-name")).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(mapping.is_none());
    assert!(error.is_some());
}

#[tokio::test]
async fn test_create_with_invalid_alias() {
    let mut app = helper::setup_test_app();

    let (status_code, _, error) =
        helper::maybe_create_mapping(&mut app, "https://www.example.com/", Some("with?query"))
            .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some(r#"Alias can not contain "?""#.to_string()), error);
}
