use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use taxdesk_core::AppError;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::users::model::{CreateUserDto, UserResponse};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Username already registered", body = ErrorResponse),
        (status = 422, description = "Validation error or unknown role", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::register(&state.users, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(username = %auth_user.username()))]
pub async fn get_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::list(&state.users).await?;
    Ok(Json(users))
}
