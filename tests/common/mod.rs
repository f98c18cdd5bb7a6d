//! Common test utilities and helpers
//!
//! Builds a full application over an in-memory database and a temporary
//! storage directory, and drives it with `tower::ServiceExt::oneshot`.
//! The `TempDir` handle must be kept alive for the app's lifetime, so the
//! fixture hands it back alongside the router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use xfgate::auth::sessions::{SessionKeys, SESSION_TTL_SECS};
use xfgate::files::storage::FileStorage;
use xfgate::routes::create_router;
use xfgate::server::AppState;
use xfgate::whitelist;

pub const TEST_SECRET: &str = "test-secret-key";

/// A fully assembled application plus the handles tests need to reach
/// behind the HTTP surface.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub keys: Arc<SessionKeys>,
    storage_dir: TempDir,
}

impl TestApp {
    /// Build an app with the default 10 MiB upload limit.
    pub async fn spawn() -> Self {
        Self::spawn_with_limit(10 * 1024 * 1024).await
    }

    /// Build an app with a custom upload limit (for 413 tests).
    pub async fn spawn_with_limit(max_upload_bytes: usize) -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("failed to create in-memory test pool");

        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("failed to run migrations");

        let storage_dir = tempfile::tempdir().expect("failed to create storage dir");
        let storage = FileStorage::new(storage_dir.path().to_path_buf());
        storage.ensure_root().await.expect("failed to init storage");

        let keys = Arc::new(SessionKeys::new(TEST_SECRET, SESSION_TTL_SECS));

        let state = AppState {
            pool: pool.clone(),
            session_keys: keys.clone(),
            storage,
            max_upload_bytes,
        };

        Self {
            router: create_router(state),
            pool,
            keys,
            storage_dir,
        }
    }

    /// Send a JSON request and decode the JSON response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Send a multipart upload with a single `file` field.
    pub async fn upload(
        &self,
        filename: &str,
        content: &[u8],
        token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let boundary = "xfgate-test-boundary";

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            );

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .expect("upload request failed");

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    /// Whitelist an email directly against the store (bypasses the
    /// authenticated endpoint so tests can bootstrap their first account).
    pub async fn whitelist_email(&self, email: &str) {
        whitelist::store::add_entry(&self.pool, email)
            .await
            .expect("failed to whitelist email");
    }

    /// Sign up, whitelist and log in a user; returns the session token.
    pub async fn signed_in_user(&self, email: &str, password: &str) -> String {
        let (status, _) = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed for {email}");

        self.whitelist_email(email).await;

        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {email}");

        body["token"].as_str().expect("no token in login").to_string()
    }
}
