use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use lp_api::{config::ApiConfig, router, state::ApiState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Builds an `ApiState` backed by a fresh, migrated in-memory database
pub struct TestStateBuilder {
    database_url: String,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
        }
    }

    pub async fn build(self) -> anyhow::Result<ApiState> {
        // A single connection keeps every query on the same in-memory database
        let pool = lp_db::create_pool(&self.database_url, 1).await?;
        lp_db::ensure_db_and_migrate(&self.database_url, &pool).await?;

        Ok(ApiState::new(pool))
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration read from the given variables, defaults elsewhere
pub fn test_config(vars: &[(&str, &str)]) -> ApiConfig {
    envy::from_iter(
        vars.iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string())),
    )
    .expect("Failed to build test config")
}

/// Full application with its middleware stack, plus direct pool access for fixtures
pub async fn test_app() -> (TestClient, SqlitePool) {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to build test state");
    let pool = state.pool.clone();

    // Local recorder; nothing is installed globally
    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();
    let app = router::app(state, &test_config(&[]), metrics_handle);

    (TestClient::new(app), pool)
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, Body::empty(), false).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, Body::empty(), false).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let body = serde_json::to_string(body).expect("Failed to serialize body");
        self.send("POST", uri, Body::from(body), true).await
    }

    pub async fn put_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let body = serde_json::to_string(body).expect("Failed to serialize body");
        self.send("PUT", uri, Body::from(body), true).await
    }

    /// Send a raw, possibly malformed, JSON body
    pub async fn send_raw_json(&self, method: &str, uri: &str, body: &'static str) -> TestResponse {
        self.send(method, uri, Body::from(body), true).await
    }

    async fn send(&self, method: &str, uri: &str, body: Body, is_json: bool) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if is_json {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder.body(body).expect("Failed to build request");

        self.request(request).await
    }

    /// POST a JSON body and return the created id
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let response = self.post_json(uri, &body).await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["id"]
            .as_i64()
            .expect("Create response should carry an id")
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// Assert the status and the `{"error": ...}` body
    pub fn assert_error(&self, expected: StatusCode, message: &str) {
        self.assert_status(expected);
        assert_eq!(self.json::<Value>(), json!({ "error": message }));
    }
}

/// Fixture builders going through the HTTP surface
pub mod fixtures {
    use serde_json::json;

    use super::TestClient;

    pub async fn word(client: &TestClient, english: &str, portuguese: &str) -> i64 {
        client
            .create(
                "/api/words",
                json!({ "english": english, "portuguese": portuguese, "parts": "noun" }),
            )
            .await
    }

    pub async fn group(client: &TestClient, name: &str) -> i64 {
        client
            .create("/api/groups", json!({ "name": name, "description": "" }))
            .await
    }

    pub async fn link(client: &TestClient, word_id: i64, group_id: i64) -> i64 {
        client
            .create(
                "/api/words_groups",
                json!({ "word_id": word_id, "group_id": group_id }),
            )
            .await
    }

    /// Activity plus a session started at `created_at`; returns the session id
    pub async fn session(client: &TestClient, group_id: i64, created_at: &str) -> i64 {
        let activity_id = client
            .create(
                "/api/study_activities",
                json!({ "group_id": group_id, "name": "Flashcards" }),
            )
            .await;
        client
            .create(
                "/api/study_sessions",
                json!({
                    "group_id": group_id,
                    "study_activity_id": activity_id,
                    "created_at": created_at,
                }),
            )
            .await
    }

    pub async fn review(
        client: &TestClient,
        session_id: i64,
        word_id: i64,
        is_correct: bool,
        created_at: &str,
    ) -> i64 {
        client
            .create(
                "/api/word_review_items",
                json!({
                    "word_id": word_id,
                    "study_session_id": session_id,
                    "is_correct": is_correct,
                    "created_at": created_at,
                }),
            )
            .await
    }
}
