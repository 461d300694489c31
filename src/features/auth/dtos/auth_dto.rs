use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Role;
use crate::features::users::models::User;
use crate::shared::validation::{not_blank, USERNAME_REGEX};

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must start with a letter or underscore and contain only letters, digits and underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Defaults to the regular user role
    pub role_id: Option<Uuid>,

    #[validate(range(min = 1, message = "Valid department is required"))]
    pub department_id: i16,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// HS256 session token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub user: AuthUserDto,
}

/// User info included in auth response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role_id: Uuid,
    /// Known role name, absent for roles this service does not recognise
    pub role: Option<Role>,
    pub department_id: i16,
}

impl From<&User> for AuthUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
            role: Role::from_id(user.role_id),
            department_id: user.department_id,
        }
    }
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role_id: Uuid,
    pub role: Option<Role>,
    pub department_id: i16,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for MeResponseDto {
    fn from(user: User) -> Self {
        Self {
            role: Role::from_id(user.role_id),
            id: user.id,
            username: user.username,
            email: user.email,
            role_id: user.role_id,
            department_id: user.department_id,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::collect_messages;

    fn register_dto(username: &str, email: &str, password: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role_id: None,
            department_id: 1,
        }
    }

    #[test]
    fn test_valid_register_dto() {
        assert!(register_dto("jane_doe", "jane@example.com", "longenough")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_register_dto_rejects_bad_fields() {
        let errors = register_dto("1x", "not-an-email", "short")
            .validate()
            .unwrap_err();
        let messages = collect_messages(&errors);

        assert!(messages.contains(&"email: Invalid email format".to_string()));
        assert!(messages.contains(&"password: Password must be at least 8 characters".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("username:")));
    }

    #[test]
    fn test_register_dto_rejects_department_zero() {
        let mut dto = register_dto("jane_doe", "jane@example.com", "longenough");
        dto.department_id = 0;
        let messages = collect_messages(&dto.validate().unwrap_err());
        assert_eq!(messages, vec!["department_id: Valid department is required"]);
    }

    #[test]
    fn test_login_dto_requires_both_fields() {
        let dto = LoginRequestDto {
            username: "  ".to_string(),
            password: String::new(),
        };
        let messages = collect_messages(&dto.validate().unwrap_err());
        assert_eq!(
            messages,
            vec!["password: Password is required", "username: Username is required"]
        );
    }
}
