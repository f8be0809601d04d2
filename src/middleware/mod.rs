//! Middleware for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Authentication gate and the [`auth::AuthUser`] extractor
//! - [`policy`]: Ordered route rules deciding who may reach each endpoint
//! - [`unauthorized`]: The uniform 401 JSON response
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::authenticate`] verifies the token and attaches a `Principal`
//! 3. [`policy::authorize`] matches method and path against the rule table
//! 4. Handler executes if both pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn whoami(auth_user: AuthUser) -> impl IntoResponse {
//!     auth_user.username().to_string()
//! }
//! ```

pub mod auth;
pub mod policy;
pub mod unauthorized;
