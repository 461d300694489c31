use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;
use crate::features::users::models::User;

/// Signed token plus its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues HS256 session tokens for authenticated users
pub struct TokenService {
    encoding_key: EncodingKey,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_secs: config.token_ttl.as_secs(),
        }
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken> {
        let now = Utc::now().timestamp().max(0) as u64;

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role_id: user.role_id,
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::Internal(format!("Failed to sign token: {}", e))
        })?;

        tracing::debug!("Issued token for user_id={}", user.id);

        Ok(IssuedToken {
            access_token,
            expires_in: i64::try_from(self.ttl_secs).unwrap_or(i64::MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::validator::JwtValidator;
    use crate::shared::constants::ROLE_ADMIN_ID;
    use crate::shared::test_helpers::{sample_user, TEST_JWT_SECRET};
    use std::time::Duration;

    fn config(ttl_secs: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(ttl_secs),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    #[test]
    fn test_issued_token_validates_to_same_identity() {
        let user = sample_user("alice", ROLE_ADMIN_ID);
        let issued = TokenService::new(&config(3600)).issue(&user).unwrap();
        assert_eq!(issued.expires_in, 3600);

        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        let identity = validator.validate_token(&issued.access_token).unwrap();

        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.username, "alice");
        assert!(identity.is_admin());
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_overflowing() {
        let user = sample_user("dave", crate::shared::constants::ROLE_USER_ID);
        let issued = TokenService::new(&config(u64::MAX)).issue(&user).unwrap();
        assert_eq!(issued.expires_in, i64::MAX);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let user = sample_user("bob", crate::shared::constants::ROLE_USER_ID);
        let issued = TokenService::new(&config(3600)).issue(&user).unwrap();

        let validator = JwtValidator::new("a-completely-different-secret", Duration::from_secs(0));
        assert!(validator.validate_token(&issued.access_token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        let err = validator.validate_token("not.a.jwt").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let user = sample_user("carol", crate::shared::constants::ROLE_USER_ID);
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role_id: user.role_id,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap();

        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        match validator.validate_token(&token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("expected expiry rejection, got {:?}", other.map(|u| u.user_id)),
        }
    }
}
