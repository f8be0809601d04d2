//! # Taxdesk Auth
//!
//! Authentication primitives for the Taxdesk API:
//!
//! - [`claims`]: the token payload (`sub`, `role`, `iat`, `exp`)
//! - [`jwt`]: [`TokenCodec`], which signs and verifies HS256 tokens
//! - [`principal`]: [`Principal`], the per-request identity built from
//!   verified claims, and the role claim encoding
//! - [`error`]: [`AuthError`]
//!
//! Claims can only be obtained from a token through [`TokenCodec::verify`],
//! which always checks the signature and expiry first.
//!
//! # Example
//!
//! ```ignore
//! use taxdesk_auth::{Principal, TokenCodec};
//! use taxdesk_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::from_env()?);
//! let token = codec.issue("alice", "ADMIN")?;
//!
//! let claims = codec.verify(&token)?;
//! let principal = Principal::from_claims(&claims);
//! assert!(principal.has_role("ADMIN"));
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod principal;

pub use claims::Claims;
pub use error::AuthError;
pub use jwt::TokenCodec;
pub use principal::{Principal, ROLE_PREFIX, authority_for, encode_role_claim};
