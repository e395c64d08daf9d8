mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bims_config::JwtConfig;
use bims_models::{UserId, UserRole};
use common::{
    body_json, create_test_user, expired_token_for, get, post_json, setup_test_app,
    setup_test_app_with, token_for,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_me_without_header_is_unauthenticated() {
    let app = setup_test_app();

    let response = app.router.oneshot(get("/api/auth/me", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    let body = body_json(response).await;
    assert_eq!(body["code"], "Unauthenticated");
    assert!(body.get("hint").is_none());
}

#[tokio::test]
async fn test_me_with_other_scheme_is_unauthenticated() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "basic@bims.test", None, UserRole::Client);
    let token = token_for(user.id, &app.jwt_config);

    for value in [format!("Basic {}", token), format!("bearer {}", token), "Bearer ".to_string()] {
        let request = Request::builder()
            .uri("/api/auth/me")
            .header("authorization", value)
            .body(Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "Unauthenticated");
    }
}

#[tokio::test]
async fn test_me_with_garbage_token_is_invalid() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some("not.a.jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "InvalidToken");
}

#[tokio::test]
async fn test_token_signed_with_old_secret_is_invalid_with_hint() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "rotated@bims.test", None, UserRole::Broker);

    let old_config = JwtConfig::new("previous-secret-previous-secret-previous");
    let token = token_for(user.id, &old_config);

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "InvalidToken");
    assert!(body["hint"].as_str().unwrap().contains("signing secret"));
}

#[tokio::test]
async fn test_expired_token_is_distinct_from_invalid() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "late@bims.test", None, UserRole::Client);
    let token = expired_token_for(user.id, &app.jwt_config);

    let response = app
        .router
        .clone()
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let expired = body_json(response).await;

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some("not.a.jwt")))
        .await
        .unwrap();
    let invalid = body_json(response).await;

    assert_eq!(expired["code"], "TokenExpired");
    assert!(expired.get("hint").is_none());
    assert_ne!(expired["error"], invalid["error"]);
}

#[tokio::test]
async fn test_expired_token_within_leeway_is_accepted() {
    let mut config = common::jwt_config();
    config.leeway_seconds = 7200;
    let app = setup_test_app_with(config);
    let user = create_test_user(&app.store, "grace@bims.test", None, UserRole::Client);
    let token = expired_token_for(user.id, &app.jwt_config);

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_unknown_subject() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "gone@bims.test", None, UserRole::Client);
    let token = token_for(user.id, &app.jwt_config);
    app.store.remove(user.id);

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UnknownSubject");
}

#[tokio::test]
async fn test_token_for_never_existing_user_is_unknown_subject() {
    let app = setup_test_app();
    let token = token_for(UserId::new(), &app.jwt_config);

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["code"], "UnknownSubject");
}

#[tokio::test]
async fn test_me_returns_identity_without_password() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "ada@bims.test", None, UserRole::Broker);
    let token = token_for(user.id, &app.jwt_config);

    let response = app
        .router
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], "ada@bims.test");
    assert_eq!(body["role"], "broker");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_same_token_twice_resolves_same_identity() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "twice@bims.test", None, UserRole::Admin);
    let token = token_for(user.id, &app.jwt_config);

    let first = app
        .router
        .clone()
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    let second = app
        .router
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(body_json(first).await, body_json(second).await);
}

#[tokio::test]
async fn test_session_without_header_continues_anonymously() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get("/api/auth/session", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["authenticated"], false);
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn test_session_with_bad_tokens_continues_anonymously() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "anon@bims.test", None, UserRole::Client);
    let expired = expired_token_for(user.id, &app.jwt_config);
    let unknown = token_for(UserId::new(), &app.jwt_config);

    for token in ["not.a.jwt", expired.as_str(), unknown.as_str()] {
        let response = app
            .router
            .clone()
            .oneshot(get("/api/auth/session", Some(token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["authenticated"], false);
    }
}

#[tokio::test]
async fn test_session_with_valid_token_attaches_identity() {
    let app = setup_test_app();
    let user = create_test_user(&app.store, "known@bims.test", None, UserRole::Client);
    let token = token_for(user.id, &app.jwt_config);

    let response = app
        .router
        .oneshot(get("/api/auth/session", Some(&token)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_login_token_is_accepted_by_me() {
    let app = setup_test_app();
    create_test_user(&app.store, "login@bims.test", Some("s3cret-pass"), UserRole::Client);

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            &json!({ "email": "login@bims.test", "password": "s3cret-pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], app.jwt_config.access_token_expiry);
    assert!(body["user"].get("password").is_none());

    let token = body["access_token"].as_str().unwrap();
    let response = app
        .router
        .oneshot(get("/api/auth/me", Some(token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "login@bims.test");
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let app = setup_test_app();
    create_test_user(&app.store, "real@bims.test", Some("right-pass"), UserRole::Client);

    let wrong_password = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            &json!({ "email": "real@bims.test", "password": "wrong-pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_email = app
        .router
        .oneshot(post_json(
            "/api/auth/login",
            None,
            &json!({ "email": "nobody@bims.test", "password": "right-pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = body_json(wrong_password).await;
    assert_eq!(wrong_password["code"], "InvalidCredentials");
    assert_eq!(wrong_password, body_json(unknown_email).await);
}

#[tokio::test]
async fn test_login_rejects_invalid_email() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/api/auth/login",
            None,
            &json!({ "email": "not-an-email", "password": "whatever" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "ValidationFailed");
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let app = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "InvalidRequest");
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = setup_test_app();

    let response = app.router.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}
