//! Authentication gate.
//!
//! Runs once per request, before authorization:
//!
//! 1. No `Authorization` header, or one without the `Bearer ` prefix: the
//!    request continues anonymously.
//! 2. A bearer token that verifies: a [`Principal`] built from its claims is
//!    inserted into the request extensions and the request continues.
//! 3. A bearer token that fails verification: the request ends here with
//!    401 and the handler never runs.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use taxdesk_auth::{AuthError, Principal, TokenCodec};
use taxdesk_core::AppError;

use crate::metrics::track_request_rejected;
use crate::middleware::unauthorized::unauthorized_response;
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Terminal state of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Anonymous,
    Authenticated(Principal),
    Rejected(AuthError),
}

/// Token carried by an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Decides the gate outcome from the request headers.
pub fn evaluate(headers: &HeaderMap, codec: &TokenCodec) -> GateOutcome {
    let Some(token) = bearer_token(headers) else {
        return GateOutcome::Anonymous;
    };

    match codec.verify(token) {
        Ok(claims) => GateOutcome::Authenticated(Principal::from_claims(&claims)),
        Err(err) => GateOutcome::Rejected(err),
    }
}

pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match evaluate(req.headers(), &state.token_codec) {
        GateOutcome::Anonymous => next.run(req).await,
        GateOutcome::Authenticated(principal) => {
            debug!(username = %principal.username(), "Request authenticated");
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        GateOutcome::Rejected(err) => {
            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                error = %err,
                "Rejected bearer token"
            );
            track_request_rejected("invalid_token");
            unauthorized_response(&err.to_string())
        }
    }
}

/// Extractor for the principal attached by the gate.
///
/// Handlers behind an authenticated route can rely on it being present;
/// anywhere else a missing principal is a 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn username(&self) -> &str {
        self.0.username()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.0.has_role(role)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(AuthError::AuthorizationDenied))
    }
}
