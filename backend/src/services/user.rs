//! Registration, login and token refresh
//!
//! Password hashing and verification run on the blocking pool; the JWT keys
//! are derived once and passed in by reference.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use ml_fitness_shared::types::{AuthTokens, UserAccount};
use ml_fitness_shared::validation::{check_field, validate_password};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

pub struct UserService;

impl UserService {
    fn issue_tokens(jwt_service: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let access_token = jwt_service
            .generate_access_token(user_id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }

    /// Register a new user; a default profile is created alongside
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(ApiError::InvalidField {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            });
        }
        check_field("password", validate_password(password))?;

        let password_hash = PasswordService::hash(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let user = UserRepository::create(pool, &email, &password_hash, name)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Conflict("Email already registered".to_string()))?;

        info!(user_id = %user.id, "User registered");
        Self::issue_tokens(jwt_service, user.id)
    }

    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_tokens(jwt_service, user.id)
    }

    /// Exchange a refresh token for a fresh pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt_service, user_id)
    }

    pub async fn get_account(pool: &PgPool, user_id: Uuid) -> Result<UserAccount, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserAccount {
            id: user.id.to_string(),
            email: user.email,
            created_at: user.created_at,
        })
    }
}
