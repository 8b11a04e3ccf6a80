use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let username_taken = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if username_taken.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Username already exists"
            )));
        }

        let email_taken = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if email_taken.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, first_name, last_name, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, username, email, first_name, last_name, role, photo_url,
                       created_at, updated_at",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: i32,
            username: String,
            email: String,
            password: String,
            first_name: String,
            last_name: String,
            role: UserRole,
            photo_url: Option<String>,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        // Exact-match lookup; the same message covers an unknown email and
        // a wrong password so login cannot be used as an account oracle.
        let user_with_password = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, email, password, first_name, last_name, role, photo_url,
                    created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))?;

        let is_valid = verify_password(&dto.password, &user_with_password.password)?;
        if !is_valid {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid credentials"
            )));
        }

        let token = create_access_token(
            user_with_password.id,
            user_with_password.role,
            jwt_config,
        )?;

        let user = User {
            id: user_with_password.id,
            username: user_with_password.username,
            email: user_with_password.email,
            first_name: user_with_password.first_name,
            last_name: user_with_password.last_name,
            role: user_with_password.role,
            photo_url: user_with_password.photo_url,
            created_at: user_with_password.created_at,
            updated_at: user_with_password.updated_at,
        };

        Ok(LoginResponse { token, user })
    }
}
