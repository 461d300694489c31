use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::password::{hash_password, hash_password_blocking, verify_password_blocking};
use crate::features::auth::services::token_service::TokenService;
use crate::features::dictionaries::DictionaryService;
use crate::features::users::models::{NewUser, User};
use crate::features::users::repositories::UserRepository;
use crate::shared::constants::ROLE_USER_ID;

/// Same message for unknown usernames and wrong passwords
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Service for authentication operations (register, login)
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    dictionaries: Arc<DictionaryService>,
    token_service: Arc<TokenService>,
    /// Verified against when the username is unknown so both failures cost the same
    dummy_hash: Option<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        dictionaries: Arc<DictionaryService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        let dummy_hash = hash_password("placeholder-password")
            .map_err(|e| tracing::warn!("Could not prepare dummy password hash: {}", e))
            .ok();

        Self {
            users,
            dictionaries,
            token_service,
            dummy_hash,
        }
    }

    /// Register a new user. Any role other than `user` needs an admin `caller`.
    pub async fn register(
        &self,
        caller: Option<&AuthenticatedUser>,
        dto: RegisterRequestDto,
    ) -> Result<AuthResponseDto> {
        let role_id = dto.role_id.unwrap_or(ROLE_USER_ID);
        if !self.users.role_exists(role_id).await? {
            return Err(AppError::invalid_field("role_id", "Unknown role"));
        }
        if role_id != ROLE_USER_ID && !caller.is_some_and(AuthenticatedUser::is_admin) {
            return Err(AppError::Forbidden(
                "Only an admin can register users with this role".to_string(),
            ));
        }
        self.dictionaries.ensure_department(dto.department_id).await?;

        let password_hash = hash_password_blocking(dto.password).await?;

        let user = self
            .users
            .create(NewUser {
                id: Uuid::now_v7(),
                username: dto.username,
                password_hash,
                email: dto.email.trim().to_lowercase(),
                role_id,
                department_id: dto.department_id,
            })
            .await?;

        tracing::info!("Registered user_id={} username={}", user.id, user.username);

        self.issue_for(&user)
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self.users.find_by_username(&dto.username).await?;

        let hash = match (&user, &self.dummy_hash) {
            (Some(u), _) => u.password_hash.clone(),
            (None, Some(dummy)) => dummy.clone(),
            (None, None) => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string())),
        };

        let valid = verify_password_blocking(dto.password, hash).await?;

        let user = match user {
            Some(u) if valid => u,
            _ => {
                tracing::info!("Failed login attempt for username={}", dto.username);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if let Err(e) = self.users.record_login(user.id).await {
            tracing::warn!("Failed to record login for user_id={}: {}", user.id, e);
        }

        self.issue_for(&user)
    }

    /// Fresh account data for the token holder
    pub async fn get_current_user(&self, auth: AuthenticatedUser) -> Result<MeResponseDto> {
        let user = self
            .users
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        Ok(user.into())
    }

    fn issue_for(&self, user: &User) -> Result<AuthResponseDto> {
        let issued = self.token_service.issue(user)?;

        Ok(AuthResponseDto {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: AuthUserDto::from(user),
        })
    }
}
