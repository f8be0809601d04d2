use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Body used when the policy denies a request.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Renders the uniform 401 response for authentication and authorization
/// failures: `{"error": "<reason>"}` as UTF-8 JSON.
pub fn unauthorized_response(reason: &str) -> Response {
    let body = json!({ "error": reason }).to_string();

    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}
