//! MySQL implementation of the UserRepository trait.
//!
//! Emails are matched case-insensitively; the unique key on `email` backs the
//! duplicate check in `create`.

use async_trait::async_trait;
use av_shared::validation::validators::normalize_email;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use av_core::domain::entities::user::User;
use av_core::errors::{DomainError, VerificationError};
use av_core::repositories::UserRepository;

const SELECT_USER: &str = r#"
    SELECT id, name, email, password_hash, phone_number, country_code,
           phone_number_confirmed, provider_user_id, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(column_error("name"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(column_error("phone_number"))?,
            country_code: row
                .try_get("country_code")
                .map_err(column_error("country_code"))?,
            phone_number_confirmed: row
                .try_get("phone_number_confirmed")
                .map_err(column_error("phone_number_confirmed"))?,
            provider_user_id: row
                .try_get("provider_user_id")
                .map_err(column_error("provider_user_id"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Database {
        message: format!("Failed to {}: {}", action, e),
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ?", SELECT_USER);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find user by id"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE LOWER(email) = ?", SELECT_USER);

        let row = sqlx::query(&query)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find user by email"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE LOWER(email) = ?
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(normalize_email(email))
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check user existence"))?;

        let exists: i64 = result
            .try_get("user_exists")
            .map_err(column_error("user_exists"))?;

        Ok(exists == 1)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, phone_number, country_code,
                phone_number_confirmed, provider_user_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(normalize_email(&user.email))
            .bind(&user.password_hash)
            .bind(&user.phone_number)
            .bind(&user.country_code)
            .bind(user.phone_number_confirmed)
            .bind(&user.provider_user_id)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(event = "user_inserted", user_id = %user.id);
                Ok(user)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(VerificationError::EmailAlreadyInUse.into())
            }
            Err(e) => Err(query_error("create user")(e)),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, password_hash = ?, phone_number = ?, country_code = ?,
                phone_number_confirmed = ?, provider_user_id = ?, updated_at = ?
            WHERE id = ?
        "#;

        let mut updated_user = user;
        updated_user.updated_at = Utc::now();

        let result = sqlx::query(query)
            .bind(&updated_user.name)
            .bind(&updated_user.password_hash)
            .bind(&updated_user.phone_number)
            .bind(&updated_user.country_code)
            .bind(updated_user.phone_number_confirmed)
            .bind(&updated_user.provider_user_id)
            .bind(updated_user.updated_at)
            .bind(updated_user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("update user"))?;

        // MySQL reports matched rows as affected only when a value changed,
        // so a zero count needs a second look before it means "missing".
        if result.rows_affected() == 0 && self.find_by_id(updated_user.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(updated_user)
    }
}
