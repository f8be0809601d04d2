use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validator::not_blank;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "username is required"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}
