//! HTTP duplicate oracle against the fake library

use library_forms::{
    models::FieldKey,
    services::{DuplicateOracle, DuplicateQuery, HttpDuplicateOracle},
    AppError,
};

use crate::support::{catalog, spawn_fake_library};

fn query(field: FieldKey, value: &str, current_id: Option<&str>) -> DuplicateQuery {
    DuplicateQuery {
        field,
        value: value.to_string(),
        current_id: current_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_detects_duplicate_for_new_record() {
    let server = spawn_fake_library(catalog()).await;
    let oracle = HttpDuplicateOracle::new(&server.config().oracle).unwrap();

    assert!(oracle
        .check_duplicate(query(FieldKey::Isbn, "9780441013593", None))
        .await
        .unwrap());
    assert!(!oracle
        .check_duplicate(query(FieldKey::Isbn, "9780000000000", None))
        .await
        .unwrap());

    let seen = server.seen();
    assert_eq!(seen[0]["currentId"], "");
}

#[tokio::test]
async fn test_edit_mode_excludes_own_record() {
    let server = spawn_fake_library(catalog()).await;
    let oracle = HttpDuplicateOracle::new(&server.config().oracle).unwrap();

    let own = [
        (FieldKey::Name, "Sokha Chan"),
        (FieldKey::Email, "sokha@example.org"),
        (FieldKey::Phone, "012345678"),
    ];
    for (field, value) in own {
        assert!(!oracle
            .check_duplicate(query(field, value, Some("42")))
            .await
            .unwrap());
    }
    assert!(server.seen().iter().all(|q| q["currentId"] == "42"));

    // Another record editing to a taken value is still a duplicate
    assert!(oracle
        .check_duplicate(query(FieldKey::Email, "sokha@example.org", Some("9")))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_value_is_url_encoded() {
    let server = spawn_fake_library(catalog()).await;
    let oracle = HttpDuplicateOracle::new(&server.config().oracle).unwrap();

    assert!(oracle
        .check_duplicate(query(FieldKey::Title, "War & Peace", None))
        .await
        .unwrap());
    assert_eq!(server.seen()[0]["value"], "War & Peace");
}

#[tokio::test]
async fn test_server_error_and_garbage_are_transient() {
    let server = spawn_fake_library(catalog()).await;
    let oracle = HttpDuplicateOracle::new(&server.config().oracle).unwrap();

    let err = oracle
        .check_duplicate(query(FieldKey::Title, "boom", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::OracleStatus(500)));
    assert!(err.is_transient());

    let err = oracle
        .check_duplicate(query(FieldKey::Title, "garbled", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unreachable_server_is_transient() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let oracle =
        HttpDuplicateOracle::with_client(reqwest::Client::new(), &format!("http://{}", addr))
            .unwrap();
    let err = oracle
        .check_duplicate(query(FieldKey::Name, "Dara", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert!(err.is_transient());
}
