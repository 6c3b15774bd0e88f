//! Verification of HS256 access tokens issued by the backend's auth service.

use crate::config::JwtConfig;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims the back office relies on. Other claims in the token are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, shared with the `profiles` row.
    pub sub: Uuid,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Check signature, expiry and audience, returning the embedded [`Claims`].
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);
    let data = decode::<Claims>(token, &DecodingKey::from_secret(config.secret.as_bytes()), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: "authenticated".to_string(),
        }
    }

    fn token_for(claims: &Claims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims(exp_offset: i64, aud: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            aud: aud.to_string(),
            email: Some("agent@urbanisme.gouv.sn".to_string()),
        }
    }

    #[test]
    fn valid_token_yields_claims() {
        let config = test_config();
        let c = claims(900, "authenticated");
        let verified = verify_token(&token_for(&c, &config.secret), &config).unwrap();
        assert_eq!(verified.sub, c.sub);
        assert_eq!(verified.email.as_deref(), Some("agent@urbanisme.gouv.sn"));
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        // Well past the default 60 second leeway.
        let c = claims(-300, "authenticated");
        assert!(verify_token(&token_for(&c, &config.secret), &config).is_err());
    }

    #[test]
    fn wrong_secret_or_audience_fails() {
        let config = test_config();
        let c = claims(900, "authenticated");
        assert!(verify_token(&token_for(&c, "another-secret"), &config).is_err());

        let c = claims(900, "anon");
        assert!(verify_token(&token_for(&c, &config.secret), &config).is_err());
    }
}
