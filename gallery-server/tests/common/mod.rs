#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use gallery_server::email::{EmailError, InquiryMailer};
use gallery_server::util::hash_password;
use gallery_server::{AppState, Config, api, db::DbService};
use http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::InquiryForm;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "gallerist@example.com";
pub const ADMIN_PASSWORD: &str = "atlantis-rising";
pub const PAYMENT_BASE: &str = "https://buy.stripe.com/test_example";

pub fn config(admin_password_hash: String) -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        http_port: 0,
        environment: "development".into(),
        jwt_secret: "integration-test-secret".into(),
        admin_email: ADMIN_EMAIL.into(),
        admin_password_hash,
        emailjs_service_id: "service_test".into(),
        emailjs_template_id: "template_test".into(),
        emailjs_public_key: "public_test".into(),
        emailjs_endpoint: "http://127.0.0.1:9/unused".into(),
        payment_link_base: PAYMENT_BASE.into(),
        currency_symbol: "$".into(),
        log_level: "debug".into(),
        log_dir: None,
    }
}

/// Mailer that records what it was asked to send
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<InquiryForm>>,
}

#[async_trait]
impl InquiryMailer for RecordingMailer {
    async fn send_form(
        &self,
        _service_id: &str,
        _template_id: &str,
        form: &InquiryForm,
        _public_key: &str,
    ) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(form.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.unwrap();
        let hash = hash_password(ADMIN_PASSWORD).unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::from_parts(db.pool, &config(hash), mailer.clone());
        Self { state, mailer }
    }

    pub fn app(&self) -> Router {
        api::build_app(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request("GET", uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request("POST", uri, token, Some(body))).await
    }

    pub async fn login(&self) -> String {
        let res = self
            .post(
                "/api/admin/login",
                None,
                serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login failed: {}", res.body);
        res.body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Insert a painting row directly, bypassing the admin form
    pub async fn seed_painting(&self, id: i64, title: &str, created_at: i64) {
        sqlx::query(
            r#"
            INSERT INTO paintings (id, title, artist, description, price, dimensions, medium, year, created_at)
            VALUES (?, ?, 'Marina Cole', 'Seed', 2400, '24" x 36"', 'Oil on canvas', '2024', ?)
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(created_at)
        .execute(&self.state.pool)
        .await
        .unwrap();
    }

    pub async fn seed_image(&self, painting_id: i64, url: &str, sort_order: i64) {
        sqlx::query("INSERT INTO painting_images (painting_id, url, sort_order) VALUES (?, ?, ?)")
            .bind(painting_id)
            .bind(url)
            .bind(sort_order)
            .execute(&self.state.pool)
            .await
            .unwrap();
    }

    pub async fn count(&self, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .unwrap();
        n
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn painting_form(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "artist": "Test",
        "description": "Coral at dusk",
        "price": "500",
        "dimensions": "20\" x 20\"",
        "medium": "Watercolor",
        "year": "2024",
        "imageUrls": ["https://img.example/reef.jpg"],
        "pdfReport": ""
    })
}
