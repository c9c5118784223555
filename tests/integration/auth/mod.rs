//! Authentication and authorization integration tests
//!
//! Exercises the gate's rejection contract over HTTP: every rejection is a
//! fixed `{success:false,message}` body and the handler never runs.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
};
use chrono::Duration;
use serde_json::json;
use uuid::Uuid;
use wayfare_accounts::InMemoryAccountRepository;
use wayfare_auth::{AuthConfig, AuthError, AuthUser, InMemoryUserStore, TokenCodec};

use crate::common::{message, TestApp, UserFixture};

const NO_TOKEN: &str = "No token, authorization denied";
const NOT_VALID: &str = "Token is not valid";
const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";

fn role_uri(id: Uuid) -> String {
    format!("/api/admin/users/{id}/role")
}

/// Create `Parts` from an HTTP request with optional authorization header.
fn make_parts(auth_header: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder();
    if let Some(value) = auth_header {
        builder = builder.header(AUTHORIZATION, value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();
    parts
}

mod test_missing_credentials {
    use super::*;

    #[tokio::test]
    async fn test_absent_empty_and_whitespace_headers() {
        let app = TestApp::new();

        let (status, body) = app.me(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "message": NO_TOKEN}));

        for header in ["", "   ", "Bearer", "Bearer ", "Bearer    "] {
            let (status, body) = app.me(Some(header)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header {header:?}");
            assert_eq!(message(&body), NO_TOKEN, "header {header:?}");
        }
    }

    #[tokio::test]
    async fn test_missing_token_on_admin_route_does_not_touch_target() {
        let app = TestApp::new();
        let target = UserFixture::user(&app).await;

        let (status, body) = app
            .send_raw(
                Method::PATCH,
                &role_uri(target.id),
                Some("Bearer "),
                Some(json!({"role": "admin"})),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), NO_TOKEN);
        assert_eq!(app.accounts.get(target.id).unwrap().role, "user");
    }
}

mod test_invalid_credentials {
    use super::*;

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let forger = TokenCodec::new(&AuthConfig::new(
            "a-completely-different-secret-0123456789",
            Duration::hours(1),
        ))
        .unwrap();
        let forged = forger.issue_default(user.id).unwrap();

        let (status, body) = app.me(Some(&format!("Bearer {forged}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "message": NOT_VALID}));
        let text = body.to_string().to_lowercase();
        assert!(!text.contains("signature"));
        assert!(!text.contains("jwt"));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let expired = app.codec().issue(user.id, Duration::seconds(-1)).unwrap();
        let (status, body) = app.me(Some(&format!("Bearer {expired}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), NOT_VALID);
    }

    #[tokio::test]
    async fn test_garbage_and_corrupted_tokens() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let mut corrupted = user.token.clone().into_bytes();
        let idx = corrupted.len() - 10;
        corrupted[idx] = if corrupted[idx] == b'A' { b'B' } else { b'A' };
        let corrupted = String::from_utf8(corrupted).unwrap();

        for token in ["not-a-token", "a.b.c", corrupted.as_str()] {
            let (status, body) = app.me(Some(&format!("Bearer {token}"))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "token {token}");
            assert_eq!(message(&body), NOT_VALID, "token {token}");
        }
    }

    #[tokio::test]
    async fn test_unsigned_claims_are_invalid() {
        let app = TestApp::new();
        let (status, body) = app.me(Some("Bearer eyJhbGciOiJIUzI1NiJ9.e30.x")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), NOT_VALID);
    }
}

mod test_identity_resolution {
    use super::*;

    #[tokio::test]
    async fn test_raw_and_bearer_forms_accepted() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        for header in [
            user.token.clone(),
            user.bearer(),
            format!("bearer {}", user.token),
            format!("  Bearer   {}  ", user.token),
        ] {
            let (status, body) = app.me(Some(&header)).await;
            assert_eq!(status, StatusCode::OK, "header {header:?}");
            assert_eq!(body["user"]["id"], user.id.to_string());
        }
    }

    #[tokio::test]
    async fn test_deleted_user_is_not_found() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;
        app.accounts.remove(user.id);

        let (status, body) = app.me(Some(&user.bearer())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "message": "User not found"}));
    }

    #[tokio::test]
    async fn test_identity_never_contains_password_hash() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;
        let hash = app.accounts.get(user.id).unwrap().password_hash;

        let mut parts = make_parts(Some(&user.bearer()));
        let AuthUser(identity) = AuthUser::from_request_parts(&mut parts, &app.state)
            .await
            .unwrap();

        let serialized = serde_json::to_string(&identity.user).unwrap();
        assert!(!serialized.contains(&hash));
        assert!(!serialized.contains("password"));
    }

    #[tokio::test]
    async fn test_store_outage_is_server_error() {
        let users = Arc::new(InMemoryUserStore::new());
        users.set_failing(true);
        let app = TestApp::with_user_store(Arc::new(InMemoryAccountRepository::new()), users);
        let user = UserFixture::user(&app).await;

        let (status, body) = app.me(Some(&user.bearer())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"success": false, "message": "Server error"}));
    }

    #[tokio::test]
    async fn test_extractor_reports_typed_errors() {
        let app = TestApp::new();

        let mut parts = make_parts(None);
        let result = AuthUser::from_request_parts(&mut parts, &app.state).await;
        assert!(matches!(result, Err(AuthError::Missing)));

        let mut parts = make_parts(Some("Bearer nope"));
        let result = AuthUser::from_request_parts(&mut parts, &app.state).await;
        assert!(matches!(result, Err(AuthError::Invalid)));
    }
}

mod test_role_policy {
    use super::*;

    #[tokio::test]
    async fn test_user_role_is_forbidden_from_admin_route() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let (status, body) = app
            .send(
                Method::PATCH,
                &role_uri(user.id),
                Some(&user.token),
                Some(json!({"role": "admin"})),
            )
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"success": false, "message": ACCESS_DENIED}));
        assert_eq!(app.accounts.get(user.id).unwrap().role, "user");
    }

    #[tokio::test]
    async fn test_role_comparison_is_case_sensitive() {
        let app = TestApp::new();
        let shouty = UserFixture::user(&app).await;
        app.accounts.set_raw_role(shouty.id, "ADMIN");

        let (status, body) = app
            .send(
                Method::PATCH,
                &role_uri(shouty.id),
                Some(&shouty.token),
                Some(json!({"role": "admin"})),
            )
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message(&body), ACCESS_DENIED);
    }

    #[tokio::test]
    async fn test_admin_role_is_allowed() {
        let app = TestApp::new();
        let admin = UserFixture::admin(&app).await;
        let user = UserFixture::user(&app).await;

        let (status, body) = app
            .send(
                Method::PATCH,
                &role_uri(user.id),
                Some(&admin.token),
                Some(json!({"role": "admin"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "admin");
    }
}
