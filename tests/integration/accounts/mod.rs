//! Account flow integration tests
//!
//! Signup, login, profile introspection and password reset through the
//! composed router.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{message, TestApp, UserFixture};

mod test_signup_and_login {
    use super::*;

    #[tokio::test]
    async fn test_signup_token_authenticates_immediately() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let (status, body) = app.me(Some(&user.bearer())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], user.email);
        assert_eq!(body["user"]["role"], "user");
    }

    #[tokio::test]
    async fn test_login_with_mixed_case_email() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": user.email.to_uppercase(), "password": user.password})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert_eq!(app.codec().verify(token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({"name": "Copycat", "email": user.email, "password": "whatever-123"})),
            )
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(message(&body), "User already exists");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "missing-password@wayfare.test"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
}

mod test_password_reset {
    use super::*;

    #[tokio::test]
    async fn test_full_reset_flow() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;

        let (status, _) = app
            .send(
                Method::POST,
                "/api/auth/forgot-password",
                None,
                Some(json!({ "email": user.email })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let code = app.delivery.last_code_for(&user.email).unwrap();
        let (status, _) = app
            .send(
                Method::POST,
                "/api/auth/reset-password",
                None,
                Some(json!({"email": user.email, "code": code, "new_password": "brand-new-pass"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (old_status, _) = app
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": user.email, "password": user.password})),
            )
            .await;
        let (new_status, _) = app
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": user.email, "password": "brand-new-pass"})),
            )
            .await;
        assert_eq!(old_status, StatusCode::UNAUTHORIZED);
        assert_eq!(new_status, StatusCode::OK);

        // Credentials issued before the reset stay valid until they expire.
        let (status, _) = app.me(Some(&user.bearer())).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_code_is_rejected() {
        let app = TestApp::new();
        let user = UserFixture::user(&app).await;
        app.send(
            Method::POST,
            "/api/auth/forgot-password",
            None,
            Some(json!({ "email": user.email })),
        )
        .await;

        let code = app.delivery.last_code_for(&user.email).unwrap();
        let wrong = if code == "999999" { "000000" } else { "999999" };

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/reset-password",
                None,
                Some(json!({"email": user.email, "code": wrong, "new_password": "brand-new-pass"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "message": "Invalid or expired reset code"})
        );
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
