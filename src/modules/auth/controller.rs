use axum::{Json, extract::State};
use tracing::instrument;

use taxdesk_core::AppError;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse};
use super::service::AuthService;

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.users, &state.token_codec, dto).await?;
    Ok(Json(response))
}
