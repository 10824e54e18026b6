use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::AuthConfig;
use crate::errors::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies the HS256 bearer tokens. The secret comes from
/// configuration only; there is no built-in fallback.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {

    pub fn new(config: &AuthConfig) -> Self {
        TokenIssuer {
            secret: config.jwt_secret.clone(),
            ttl: Duration::days(config.token_ttl_days),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user_id: Uuid, email: &str, username: &str, role: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|err| AppError::ProcessingError(format!("Unable to sign token: {}", err)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token.".to_string()))?;
        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(ttl_days: i64) -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            token_ttl_days: ttl_days,
        })
    }

    #[test]
    fn issued_token_decodes_to_same_subject() {
        let issuer = issuer(7);
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id, "a@x.com", "alice", "member").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "member");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issuer = issuer(7);
        let token = issuer.issue(Uuid::new_v4(), "a@x.com", "alice", "member").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        // Flipping the last signature character invalidates it.
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(issuer.verify(&tampered).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = issuer(7).issue(Uuid::new_v4(), "a@x.com", "alice", "member").unwrap();
        let other = TokenIssuer::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            token_ttl_days: 7,
        });
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer(-1);
        let token = issuer.issue(Uuid::new_v4(), "a@x.com", "alice", "member").unwrap();
        assert!(issuer.verify(&token).is_err());
    }
}
