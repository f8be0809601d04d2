//! Token payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every access token.
///
/// `exp` is always `iat` plus the configured validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Username (subject claim)
    pub sub: String,
    /// Comma-separated role names, e.g. `"ADMIN"` or `"ADMIN,USER"`
    pub role: String,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_flat() {
        let claims = Claims {
            sub: "alice".to_string(),
            role: "ADMIN".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sub": "alice",
                "role": "ADMIN",
                "iat": 1_700_000_000,
                "exp": 1_700_003_600
            })
        );
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"bob","role":"USER","iat":10,"exp":3610}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}
