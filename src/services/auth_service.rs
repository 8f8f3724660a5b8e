use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::SqlitePool;

use crate::config::get_config;
use crate::dto::auth_dto::LoginPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::User;
use crate::utils::crypto::verify_password;

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Verify credentials and mint a bearer token. Unknown email and wrong
    /// password both map to the same 401.
    pub async fn login(&self, payload: LoginPayload) -> Result<(String, User)> {
        let email = payload.email.trim().to_lowercase();
        let user = self
            .get_by_email(&email)
            .await?
            .ok_or_else(|| Error::Authentication("invalid credentials".to_string()))?;

        let ok = verify_password(&payload.password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Authentication("invalid credentials".to_string()));
        }

        let token = self.issue_token(&user)?;
        Ok((token, user))
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        let config = get_config();
        let exp = Utc::now() + Duration::minutes(config.token_ttl_minutes);
        let claims = Claims {
            sub: user.id.to_string(),
            exp: exp.timestamp() as usize,
            email: Some(user.email.clone()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("token encoding failed: {}", e)))
    }
}
