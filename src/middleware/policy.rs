//! Route authorization policy.
//!
//! An ordered table of [`RouteRequirement`]s, consulted after the
//! authentication gate. The first rule whose method and path pattern match
//! decides the requirement. Rules are declared most specific first and the
//! table ends in a catch-all that demands an authenticated principal.
//!
//! Path patterns are matched segment by segment:
//!
//! - a literal segment matches itself
//! - `{name}` matches exactly one segment
//! - a trailing `**` matches zero or more remaining segments
//!
//! Empty segments are ignored, so `/tax/tipos/` and `/tax/tipos` match the
//! same rules.
//!
//! Every denial is answered with 401, whether the principal was missing or
//! only lacked the role.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use taxdesk_auth::Principal;

use crate::metrics::track_request_rejected;
use crate::middleware::unauthorized::{UNAUTHORIZED_MESSAGE, unauthorized_response};
use crate::state::AppState;

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Public,
    AuthenticatedAny,
    RequiresRole(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    InsufficientRole,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "unauthenticated",
            DenyReason::InsufficientRole => "insufficient_role",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| match segment {
                "**" => Segment::Rest,
                s if s.starts_with('{') && s.ends_with('}') => Segment::Param,
                s => Segment::Literal(s.to_string()),
            })
            .collect();

        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Param => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(expected) => {
                    if parts.next() != Some(expected.as_str()) {
                        return false;
                    }
                }
            }
        }

        parts.next().is_none()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// One row of the policy table. `method: None` matches any method.
#[derive(Debug, Clone)]
pub struct RouteRequirement {
    pub method: Option<Method>,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl RouteRequirement {
    pub fn new(method: Option<Method>, pattern: &str, requirement: Requirement) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
            requirement,
        }
    }

    pub fn public(method: Option<Method>, pattern: &str) -> Self {
        Self::new(method, pattern, Requirement::Public)
    }

    pub fn authenticated(method: Option<Method>, pattern: &str) -> Self {
        Self::new(method, pattern, Requirement::AuthenticatedAny)
    }

    pub fn role(method: Option<Method>, pattern: &str, role: &str) -> Self {
        Self::new(method, pattern, Requirement::RequiresRole(role.to_string()))
    }

    fn applies_to(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.pattern.matches(path)
    }
}

#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    rules: Vec<RouteRequirement>,
}

impl AuthorizationPolicy {
    pub fn new(rules: Vec<RouteRequirement>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRequirement] {
        &self.rules
    }

    /// Requirement of the first matching rule. Paths no rule covers need an
    /// authenticated principal.
    pub fn requirement_for(&self, method: &Method, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(method, path))
            .map(|rule| &rule.requirement)
            .unwrap_or(&Requirement::AuthenticatedAny)
    }

    pub fn check(&self, method: &Method, path: &str, principal: Option<&Principal>) -> Decision {
        match (self.requirement_for(method, path), principal) {
            (Requirement::Public, _) => Decision::Allow,
            (_, None) => Decision::Deny(DenyReason::Unauthenticated),
            (Requirement::AuthenticatedAny, Some(_)) => Decision::Allow,
            (Requirement::RequiresRole(role), Some(principal)) => {
                if principal.has_role(role) {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::InsufficientRole)
                }
            }
        }
    }
}

impl Default for AuthorizationPolicy {
    /// Route table of the tax catalog API.
    fn default() -> Self {
        Self::new(vec![
            // CORS preflight
            RouteRequirement::public(Some(Method::OPTIONS), "/**"),
            // Login and registration
            RouteRequirement::public(Some(Method::POST), "/users/login"),
            RouteRequirement::public(Some(Method::POST), "/users/register"),
            RouteRequirement::public(Some(Method::POST), "/users"),
            // API documentation
            RouteRequirement::public(None, "/swagger-ui/**"),
            RouteRequirement::public(None, "/api-docs/**"),
            // Tax catalog
            RouteRequirement::authenticated(Some(Method::GET), "/tax/tipos/**"),
            RouteRequirement::role(Some(Method::POST), "/tax/tipos", ADMIN_ROLE),
            RouteRequirement::role(Some(Method::DELETE), "/tax/tipos/**", ADMIN_ROLE),
            RouteRequirement::role(Some(Method::POST), "/tax/calculo", ADMIN_ROLE),
            // Everything else
            RouteRequirement::authenticated(None, "/**"),
        ])
    }
}

pub async fn authorize(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let decision = state
        .policy
        .check(req.method(), req.uri().path(), req.extensions().get::<Principal>());

    match decision {
        Decision::Allow => next.run(req).await,
        Decision::Deny(reason) => {
            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                username = req.extensions().get::<Principal>().map(|p| p.username()),
                reason = reason.as_str(),
                "Authorization denied"
            );
            track_request_rejected(reason.as_str());
            unauthorized_response(UNAUTHORIZED_MESSAGE)
        }
    }
}
