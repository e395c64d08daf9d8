use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use bims::router::init_router;
use bims::state::AppState;
use bims_auth::{Claims, issue_access_token, issue_token_with_claims};
use bims_config::{CorsConfig, JwtConfig};
use bims_core::hash_password;
use bims_db::MemoryUserStore;
use bims_models::{User, UserId, UserRole};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<MemoryUserStore>,
    pub jwt_config: JwtConfig,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

#[allow(dead_code)]
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(jwt_config())
}

pub fn setup_test_app_with(jwt_config: JwtConfig) -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let cors_config = CorsConfig::from_lookup(|_| None);
    let state = AppState::new(jwt_config.clone(), cors_config, store.clone());

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

/// Puts a user straight into the store. Only hashes a real password when one
/// is given, since bcrypt is slow.
#[allow(dead_code)]
pub fn create_test_user(
    store: &MemoryUserStore,
    email: &str,
    password: Option<&str>,
    role: UserRole,
) -> User {
    let now = Utc::now();
    let user = User {
        id: UserId::new(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        role,
        password: match password {
            Some(password) => hash_password(password).unwrap(),
            None => "not-a-bcrypt-hash".to_string(),
        },
        created_at: now,
        updated_at: now,
    };
    store.put(user.clone());
    user
}

#[allow(dead_code)]
pub fn token_for(user_id: UserId, jwt_config: &JwtConfig) -> String {
    issue_access_token(user_id, jwt_config).unwrap()
}

/// A correctly signed token whose `exp` is an hour in the past.
#[allow(dead_code)]
pub fn expired_token_for(user_id: UserId, jwt_config: &JwtConfig) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    issue_token_with_claims(&claims, jwt_config).unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
