//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`UserRecord`] - Stored user, including the bcrypt hash
//! - [`UserResponse`] - What the API returns for a user (no hash)
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] - Register a new user
//!
//! # Roles
//!
//! Roles are stored as bare upper-case names. Requests may use either the
//! bare name or the `ROLE_`-prefixed authority form.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use taxdesk_auth::ROLE_PREFIX;

use crate::validator::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let bare = trimmed.strip_prefix(ROLE_PREFIX).unwrap_or(trimmed);

        match bare.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "USER" => Ok(UserRole::User),
            _ => Err(anyhow!(
                "Invalid role '{}'. Available values: ADMIN, USER",
                value
            )),
        }
    }
}

/// DTO for registering a user.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        custom(function = "not_blank", message = "username is required"),
        length(max = 100, message = "username must be at most 100 characters")
    )]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
    /// Role names, e.g. `["ADMIN"]` or `["ROLE_USER"]`.
    #[validate(length(min = 1, message = "at least one role is required"))]
    #[schema(example = json!(["USER"]))]
    pub role: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// User about to be stored. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<UserRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            roles: record.roles,
        }
    }
}
