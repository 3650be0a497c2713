//! Fake library server answering the duplicate check endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use library_forms::config::{AppConfig, OracleConfig};

/// Existing record value: (resource, field, value, id)
pub type Record = (&'static str, &'static str, &'static str, &'static str);

#[derive(Default)]
pub struct FakeLibrary {
    records: Vec<Record>,
    /// Query strings received, in order
    pub seen: Mutex<Vec<HashMap<String, String>>>,
}

pub struct FakeServer {
    pub base_url: String,
    pub library: Arc<FakeLibrary>,
}

impl FakeServer {
    pub fn config(&self) -> AppConfig {
        AppConfig {
            oracle: OracleConfig {
                base_url: self.base_url.clone(),
                timeout_ms: 2000,
            },
            ..AppConfig::default()
        }
    }

    pub fn seen(&self) -> Vec<HashMap<String, String>> {
        self.library.seen.lock().unwrap().clone()
    }
}

async fn validate(
    State(library): State<Arc<FakeLibrary>>,
    Path((resource, check)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    library.seen.lock().unwrap().push(params.clone());

    let Some(field) = check.strip_prefix("validate-") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let value = params.get("value").cloned().unwrap_or_default();
    let current_id = params.get("currentId").cloned().unwrap_or_default();

    match value.as_str() {
        "boom" => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbled" => return "maybe".into_response(),
        _ => {}
    }

    let duplicate = library.records.iter().any(|(r, f, v, id)| {
        *r == resource && *f == field && *v == value && *id != current_id
    });
    Json(duplicate).into_response()
}

pub async fn spawn_fake_library(records: Vec<Record>) -> FakeServer {
    let library = Arc::new(FakeLibrary {
        records,
        ..FakeLibrary::default()
    });

    let app = Router::new()
        .route("/:resource/api/:check", get(validate))
        .with_state(Arc::clone(&library));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake library");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake library crashed");
    });

    FakeServer {
        base_url: format!("http://{}/", addr),
        library,
    }
}

pub fn catalog() -> Vec<Record> {
    vec![
        ("books", "title", "Dune", "7"),
        ("books", "isbn", "9780441013593", "7"),
        ("books", "libraryCode", "FIC-HER-01", "7"),
        ("books", "title", "War & Peace", "42"),
        ("members", "name", "Sokha Chan", "42"),
        ("members", "email", "sokha@example.org", "42"),
        ("members", "phone", "012345678", "42"),
    ]
}
