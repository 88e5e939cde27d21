use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_auth::{create_access_token, create_refresh_token, verify_refresh_token};
use tuitionhub_config::JwtConfig;
use tuitionhub_core::{AppError, hash_password, verify_password};
use tuitionhub_models::users::PROFILE_COLUMNS;
use tuitionhub_models::{LoginRequest, LoginResponse, RegisterRequest, User, UserProfile};

use crate::metrics::{
    track_jwt_issued, track_login_failure, track_login_success, track_user_registered,
};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<UserProfile, AppError> {
        let email = dto.email.trim().to_lowercase();

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&email)
                .fetch_one(db)
                .await?;
        if exists {
            return Err(AppError::bad_request(anyhow::anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO users (full_name, email, password, role)
               VALUES ($1, $2, $3, 'student')
               RETURNING id"#,
        )
        .bind(dto.full_name.trim())
        .bind(&email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Email already exists"));
            }
            AppError::from(e)
        })?;

        track_user_registered();
        Self::get_profile(db, user_id).await
    }

    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = dto.email.trim().to_lowercase();

        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, full_name, email, password, role, class_id, phone, parent_phone,
                      roll_number, avatar_url, created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            track_login_failure("unknown_email");
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        };

        if !verify_password(&dto.password, &user.password)? {
            track_login_failure("wrong_password");
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let response = Self::issue_tokens(db, &user, jwt_config).await?;
        track_login_success(&user.role.to_string());
        Ok(response)
    }

    #[instrument(skip(db, refresh_token, jwt_config))]
    pub async fn refresh_tokens(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, full_name, email, password, role, class_id, phone, parent_phone,
                      roll_number, avatar_url, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists".to_string()))?;

        Self::issue_tokens(db, &user, jwt_config).await
    }

    async fn issue_tokens(
        db: &PgPool,
        user: &User,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let access_token = create_access_token(user.id, &user.email, user.role, jwt_config)?;
        let refresh_token = create_refresh_token(user.id, &user.email, jwt_config)?;
        track_jwt_issued();

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: Self::get_profile(db, user.id).await?,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<UserProfile, AppError> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM users u LEFT JOIN classes c ON c.id = u.class_id \
             WHERE u.id = $1"
        );

        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
