//! HS256 token issuance and verification.
//!
//! A token is three dot-separated base64url segments: the header
//! (`{"alg":"HS256","typ":"JWT"}`), the [`Claims`] payload, and an
//! HMAC-SHA256 signature over the first two computed with the process-wide
//! [`SigningKey`](taxdesk_config::SigningKey).
//!
//! Tokens are not stored anywhere; a token stays valid until `exp` and
//! cannot be revoked earlier.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use taxdesk_config::JwtConfig;

use crate::claims::Claims;
use crate::error::AuthError;

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity_secs: i64,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.signing_key.as_bytes();

        // Expiry is checked against an explicit clock in `verify_at`, with
        // no leeway, so the library's own wall-clock check is switched off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            validity_secs: config.token_validity_secs,
        }
    }

    /// Issues a token for `username` carrying `role` as its role claim.
    pub fn issue(&self, username: &str, role: &str) -> Result<String, AuthError> {
        self.issue_at(username, role, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            iat,
            exp: iat + self.validity_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }

    /// Verifies signature, structure and expiry, then returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` against the clock value `now`.
    ///
    /// A token is expired once `exp <= now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)?;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }

    /// Subject of a verified token.
    pub fn subject(&self, token: &str) -> Result<String, AuthError> {
        self.verify(token).map(|claims| claims.sub)
    }

    /// Role claim of a verified token.
    pub fn role_claim(&self, token: &str) -> Result<String, AuthError> {
        self.verify(token).map(|claims| claims.role)
    }

    pub fn validity_secs(&self) -> i64 {
        self.validity_secs
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("validity_secs", &self.validity_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use taxdesk_config::SigningKey;

    fn codec() -> TokenCodec {
        codec_with_secret("test-secret-key-at-least-32-characters-long")
    }

    fn codec_with_secret(secret: &str) -> TokenCodec {
        TokenCodec::new(&JwtConfig::new(SigningKey::new(secret).unwrap()))
    }

    /// Replaces the character at `index` of the signature segment.
    const BASE64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

    /// Flips the high bit of the sextet at `index`, which is a data bit
    /// even in the final character of the signature.
    fn tamper_signature(token: &str, index: usize) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut bytes = signature.as_bytes().to_vec();
        let value = BASE64URL.iter().position(|&c| c == bytes[index]).unwrap();
        bytes[index] = BASE64URL[value ^ 0b10_0000];
        format!("{}.{}", head, String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn test_issue_produces_three_segments() {
        let token = codec().issue("alice", "ADMIN").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let codec = codec();
        for (username, role) in [("alice", "ADMIN"), ("bob", "USER"), ("carol", "ADMIN,USER")] {
            let token = codec.issue(username, role).unwrap();
            let claims = codec.verify(&token).unwrap();
            assert_eq!(claims.sub, username);
            assert_eq!(claims.role, role);
            assert_eq!(claims.exp - claims.iat, 3600);
        }
    }

    #[test]
    fn test_verify_within_window() {
        let codec = codec();
        let issued = Utc::now();
        let token = codec.issue_at("alice", "ADMIN", issued).unwrap();

        let just_before_expiry = issued + Duration::seconds(3599);
        assert!(codec.verify_at(&token, just_before_expiry).is_ok());
    }

    #[test]
    fn test_verify_fails_at_expiry() {
        let codec = codec();
        let issued = Utc::now();
        let token = codec.issue_at("alice", "ADMIN", issued).unwrap();

        assert_eq!(
            codec.verify_at(&token, issued + Duration::seconds(3600)),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            codec.verify_at(&token, issued + Duration::hours(5)),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_verify_rejects_token_issued_in_the_past() {
        let codec = codec();
        let token = codec
            .issue_at("alice", "ADMIN", Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(codec.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_verify_rejects_tampered_signature() {
        let codec = codec();
        let token = codec.issue("alice", "ADMIN").unwrap();
        let signature_len = token.rsplit('.').next().unwrap().len();

        for index in 0..signature_len {
            let tampered = tamper_signature(&token, index);
            assert_ne!(tampered, token);
            assert_eq!(codec.verify(&tampered), Err(AuthError::InvalidToken));
        }
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let codec = codec();
        let admin = codec.issue("alice", "ADMIN").unwrap();
        let user = codec.issue("alice", "USER").unwrap();

        // Header and signature from one token, payload from another.
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let user_parts: Vec<&str> = user.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert_eq!(codec.verify(&forged), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = codec_with_secret("another-secret").issue("alice", "ADMIN").unwrap();
        assert_eq!(codec().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_verify_rejects_malformed() {
        let codec = codec();
        for token in ["", "invalid-token", "a.b", "a.b.c", "a.b.c.d"] {
            assert_eq!(codec.verify(token), Err(AuthError::InvalidToken));
        }
    }

    #[test]
    fn test_subject_and_role_claim() {
        let codec = codec();
        let token = codec.issue("alice", "ADMIN").unwrap();
        assert_eq!(codec.subject(&token).unwrap(), "alice");
        assert_eq!(codec.role_claim(&token).unwrap(), "ADMIN");

        assert_eq!(codec.subject("garbage"), Err(AuthError::InvalidToken));
        assert_eq!(codec.role_claim("garbage"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_invalid_token_message() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Token expired!");
    }

    #[test]
    fn test_debug_hides_keys() {
        let printed = format!("{:?}", codec());
        assert!(!printed.contains("test-secret"));
        assert!(printed.contains("validity_secs"));
    }
}
