//! Authenticated identity and role claim encoding.
//!
//! A role claim is a comma-separated list of bare role names (`"ADMIN"`,
//! `"ADMIN,USER"`). Each name becomes an authority by gaining the
//! [`ROLE_PREFIX`], so the claim `"ADMIN"` grants `{"ROLE_ADMIN"}`.

use std::collections::BTreeSet;

use crate::claims::Claims;

pub const ROLE_PREFIX: &str = "ROLE_";

/// Identity attached to a single request after its token was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    authorities: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, S>(username: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_claims(claims: &Claims) -> Self {
        let authorities = claims
            .role
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(authority_for);

        Self::new(claims.sub.clone(), authorities)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    /// Check for a role by bare name, e.g. `has_role("ADMIN")`.
    pub fn has_role(&self, role: &str) -> bool {
        self.authorities.contains(&authority_for(role))
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

/// Authority string for a role name. Idempotent.
pub fn authority_for(role: &str) -> String {
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{}{}", ROLE_PREFIX, role)
    }
}

/// Joins role names into the canonical role claim.
pub fn encode_role_claim<I, S>(roles: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    roles
        .into_iter()
        .map(|role| role.as_ref().trim().to_string())
        .filter(|role| !role.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
