#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;
use trivia_api::configuration::{DatabaseSettings, QuizOrder};
use trivia_api::db::{self, seed};
use trivia_api::server::app::{build_router, AppState};

pub const CORS_ORIGIN: &str = "http://localhost:3000";

pub struct TestApp {
    // Holds the database file until the test ends.
    _dir: TempDir,
    pub pool: SqlitePool,
    pub router: Router,
}

/// App over a fresh database loaded with the bundled seed data.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(QuizOrder::Sequential).await
}

pub async fn spawn_app_with(order: QuizOrder) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let settings = DatabaseSettings {
        path: dir.path().join("trivia.db"),
        max_connections: 1,
    };
    let pool = db::establish_connection(&settings).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    let seed_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("seed");
    seed::import_data(&pool, &seed_dir).await.unwrap();

    let router = build_router(AppState::new(pool.clone(), order), CORS_ORIGIN).unwrap();
    TestApp {
        _dir: dir,
        pool,
        router,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        let response = self.send(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, None).await
    }
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}
