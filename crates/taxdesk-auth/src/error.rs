use thiserror::Error;

/// Authentication and authorization failures.
///
/// Every token verification failure, whether a bad signature, a corrupt
/// structure or expiry, surfaces as [`AuthError::InvalidToken`] with the same
/// message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token expired!")]
    InvalidToken,

    #[error("Failed to create token: {0}")]
    TokenEncoding(String),

    #[error("User not found!")]
    UserNotFound,

    #[error("Invalid password!")]
    BadCredentials,

    #[error("Unauthorized")]
    AuthorizationDenied,
}
