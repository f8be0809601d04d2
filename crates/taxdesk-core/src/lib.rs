//! # Taxdesk Core
//!
//! Core types shared by every Taxdesk crate:
//!
//! - [`errors`]: [`AppError`], the HTTP-mapped error returned by handlers
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use taxdesk_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("s3cret")?;
//! if !verify_password("s3cret", &hash)? {
//!     return Err(AppError::unauthorized(anyhow::anyhow!("Invalid password!")));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
