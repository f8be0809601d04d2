#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use taxdesk::modules::users::model::CreateUserDto;
use taxdesk::modules::users::service::UserService;
use taxdesk::router::init_router;
use taxdesk::state::AppState;
use taxdesk_auth::TokenCodec;
use taxdesk_config::{JwtConfig, SigningKey};

pub const TEST_SECRET: &str = "integration-test-signing-key";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(SigningKey::new(TEST_SECRET).unwrap())
}

pub fn test_state() -> AppState {
    AppState::in_memory(&jwt_config())
}

pub fn test_app(state: &AppState) -> Router {
    init_router(state.clone())
}

/// Codec signing with the same key as the test state.
pub fn codec() -> TokenCodec {
    TokenCodec::new(&jwt_config())
}

pub fn foreign_codec() -> TokenCodec {
    TokenCodec::new(&JwtConfig::new(SigningKey::new("some-other-key").unwrap()))
}

pub async fn seed_user(state: &AppState, username: &str, password: &str, roles: &[&str]) {
    UserService::register(
        &state.users,
        CreateUserDto {
            username: username.to_string(),
            password: password.to_string(),
            role: roles.iter().map(|r| r.to_string()).collect(),
        },
    )
    .await
    .unwrap();
}

pub fn admin_token() -> String {
    codec().issue("admin", "ADMIN").unwrap()
}

pub fn user_token() -> String {
    codec().issue("bob", "USER").unwrap()
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = send(app, req).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
