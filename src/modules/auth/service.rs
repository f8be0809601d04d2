//! Credential verification and token issuance.

use tracing::{info, instrument, warn};

use taxdesk_auth::{AuthError, TokenCodec, encode_role_claim};
use taxdesk_core::{AppError, verify_password};

use crate::metrics::{track_login_failure, track_login_success, track_token_issued};
use crate::modules::users::repository::UserRepository;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Checks `raw_password` against the stored hash for `username` and
    /// returns the user's role claim.
    ///
    /// The username is trimmed the same way registration trims it. An
    /// unknown username is a 404 and a wrong password a 401. The password
    /// is never logged.
    #[instrument(skip(users, raw_password))]
    pub async fn authenticate(
        users: &UserRepository,
        username: &str,
        raw_password: &str,
    ) -> Result<String, AppError> {
        let Some(user) = users.find_by_username(username.trim()).await? else {
            warn!("Login failed: unknown user");
            track_login_failure("user_not_found");
            return Err(AppError::not_found(AuthError::UserNotFound));
        };

        let password = raw_password.to_string();
        let hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(AppError::internal)??;

        if !is_valid {
            warn!("Login failed: bad credentials");
            track_login_failure("bad_credentials");
            return Err(AppError::unauthorized(AuthError::BadCredentials));
        }

        Ok(encode_role_claim(&user.roles))
    }

    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn login(
        users: &UserRepository,
        codec: &TokenCodec,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let username = dto.username.trim();
        let role_claim = Self::authenticate(users, username, &dto.password).await?;

        let token = codec
            .issue(username, &role_claim)
            .map_err(AppError::internal)?;

        track_token_issued();
        track_login_success(&role_claim);
        info!(roles = %role_claim, "User logged in");

        Ok(LoginResponse { token })
    }
}
