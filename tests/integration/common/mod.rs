//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - An application wired to in-memory stores
//! - User fixtures with bearer tokens
//! - Request helpers returning status and JSON body

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wayfare_accounts::{AccountsState, CapturingDelivery, InMemoryAccountRepository};
use wayfare_app::{build_router, build_state, Collaborators};
use wayfare_auth::{TokenCodec, UserStore};
use wayfare_common::{Config, InMemoryExpiringStore};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused/wayfare_test".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_ttl_seconds: 3600,
        reset_code_ttl_seconds: 900,
        bcrypt_cost: 4,
        rust_log: "wayfare=debug".to_string(),
        port: 0,
    }
}

/// Test application backed by in-memory stores
pub struct TestApp {
    pub state: AccountsState,
    pub router: Router,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub delivery: Arc<CapturingDelivery>,
}

impl TestApp {
    pub fn new() -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        Self::with_user_store(accounts.clone(), accounts)
    }

    /// Resolve identities through `users` instead of the account repository.
    pub fn with_user_store(
        accounts: Arc<InMemoryAccountRepository>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let delivery = Arc::new(CapturingDelivery::new());
        let state = build_state(
            &test_config(),
            Collaborators {
                accounts: accounts.clone(),
                users,
                reset_codes: Arc::new(InMemoryExpiringStore::new()),
                delivery: delivery.clone(),
            },
        )
        .expect("test config is valid");

        Self {
            router: build_router(state.clone()),
            state,
            accounts,
            delivery,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        self.state.auth.codec()
    }

    /// Send a request with a raw Authorization header value.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    /// Send a request authenticated with `token` as a bearer credential.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let header = token.map(|t| format!("Bearer {t}"));
        self.send_raw(method, uri, header.as_deref(), body).await
    }

    pub async fn me(&self, authorization: Option<&str>) -> (StatusCode, Value) {
        self.send_raw(Method::GET, "/api/auth/me", authorization, None)
            .await
    }
}

/// A signed-up user and the token issued at signup
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl UserFixture {
    pub async fn user(app: &TestApp) -> Self {
        let id = Uuid::new_v4();
        let email = format!("traveller_{}@wayfare.test", id.simple());
        let password = "correct-horse-battery".to_string();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({"name": "Test Traveller", "email": email, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

        Self {
            id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
            email,
            password,
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Signed-up user whose stored role is `admin`.
    pub async fn admin(app: &TestApp) -> Self {
        let fixture = Self::user(app).await;
        assert!(app.accounts.set_raw_role(fixture.id, "admin"));
        fixture
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
