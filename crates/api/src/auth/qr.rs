//! Scanner (QR) identity-token verification.
//!
//! A scanned token is a short-lived HS256 JWT claiming `(user id, expiry)`,
//! minted by the campus identity service and presented at a kiosk or the
//! staff desk. Verification is a pure function over an explicit
//! [`QrTokenConfig`]; there is no ambient session and no process-wide
//! secret. The raw token is never logged.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use roomkey_core::error::TokenError;
use roomkey_core::types::DbId;

/// Claims carried by a scanner identity token.
#[derive(Debug, Serialize, Deserialize)]
pub struct QrClaims {
    /// The user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for scanner-token verification.
#[derive(Debug, Clone)]
pub struct QrTokenConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
    /// Token lifetime in seconds (default: 300) -- used only when minting.
    pub expiry_secs: i64,
}

/// Default scanner-token expiry: five minutes.
const DEFAULT_QR_EXPIRY_SECS: i64 = 300;

impl QrTokenConfig {
    /// Load scanner-token configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `QR_TOKEN_SECRET`     | **yes**  | --      |
    /// | `QR_TOKEN_EXPIRY_SECS`| no       | `300`   |
    ///
    /// # Panics
    ///
    /// Panics if `QR_TOKEN_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("QR_TOKEN_SECRET")
            .expect("QR_TOKEN_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "QR_TOKEN_SECRET must not be empty");

        let expiry_secs: i64 = std::env::var("QR_TOKEN_EXPIRY_SECS")
            .unwrap_or_else(|_| DEFAULT_QR_EXPIRY_SECS.to_string())
            .parse()
            .expect("QR_TOKEN_EXPIRY_SECS must be a valid i64");

        Self {
            secret,
            expiry_secs,
        }
    }
}

/// Verify a scanned identity token, returning the claimed user id.
///
/// Checks signature and expiry only; ownership of a reservation is a
/// separate concern handled by the custody engine.
pub fn verify(token: &str, config: &QrTokenConfig) -> Result<DbId, TokenError> {
    let result = decode::<QrClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    );
    match result {
        Ok(data) => Ok(data.claims.sub),
        Err(err) => Err(match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }),
    }
}

/// Mint an identity token for the given user.
///
/// The production issuer is the campus identity service; this is used by
/// local tooling and the test suite.
pub fn mint(user_id: DbId, config: &QrTokenConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = QrClaims {
        sub: user_id,
        exp: now + config.expiry_secs,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> QrTokenConfig {
        QrTokenConfig {
            secret: "scanner-secret-for-tests".to_string(),
            expiry_secs: 300,
        }
    }

    #[test]
    fn mint_and_verify_round_trip() {
        let config = test_config();
        let token = mint(7, &config).expect("mint");
        assert_eq!(verify(&token, &config), Ok(7));
    }

    #[test]
    fn expired_token_reports_expired() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        // Expired well past the default 60-second leeway.
        let claims = QrClaims {
            sub: 7,
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encode");

        assert_eq!(verify(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_reports_bad_signature() {
        let config = test_config();
        let other = QrTokenConfig {
            secret: "some-other-secret".to_string(),
            expiry_secs: 300,
        };
        let token = mint(7, &other).expect("mint");
        assert_eq!(verify(&token, &config), Err(TokenError::BadSignature));
    }

    #[test]
    fn garbage_reports_malformed() {
        let config = test_config();
        assert_eq!(
            verify("not-a-token", &config),
            Err(TokenError::Malformed)
        );
    }
}
