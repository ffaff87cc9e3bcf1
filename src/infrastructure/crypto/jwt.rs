//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
///
/// There is intentionally no default secret: the signing key must be
/// provisioned through configuration or the `JWT_SECRET` environment
/// variable, and startup fails without one.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: "rating-service".to_string(),
        }
    }
}

/// JWT Claims
///
/// A session token is bound to the user's identity and email. There is no
/// server-side revocation state: the token is valid from issuance until
/// `exp`, logout is purely client-local.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email the token was issued for
    pub email: String,
    /// User role
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims for a user
    pub fn new(user_id: &str, email: &str, role: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: &str,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, email, role, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-do-not-use-in-production", 1)
    }

    #[test]
    fn create_and_verify_token() {
        let config = test_config();
        let token = create_token("user-123", "alice@example.com", "reviewer", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "reviewer");
        assert!(!claims.is_expired());
    }

    #[test]
    fn invalid_token_is_rejected() {
        let config = test_config();
        let result = verify_token("invalid-token", &config);
        assert!(result.is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let other = JwtConfig::new("another-secret", 1);
        let token = create_token("user-123", "alice@example.com", "reviewer", &other).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative TTL puts `exp` in the past, beyond the decoder's leeway.
        let config = JwtConfig::new("test-secret-do-not-use-in-production", -1);
        let token = create_token("user-123", "alice@example.com", "reviewer", &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }
}
