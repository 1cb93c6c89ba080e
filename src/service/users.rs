//! User queries and mutations.

use crate::error::AppError;
use crate::forms::UserForm;
use crate::models::User;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, first_name, last_name, image_url";

pub struct UserService;

impl UserService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            COLUMNS
        ))
        .fetch_all(pool)
        .await?;
        Ok(users)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    pub async fn create(pool: &SqlitePool, form: &UserForm) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (first_name, last_name, image_url) VALUES (?1, ?2, ?3) RETURNING {}",
            COLUMNS
        ))
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.image_url)
        .fetch_one(pool)
        .await?;
        tracing::debug!(user_id = user.id, "created user");
        Ok(user)
    }

    /// Overwrite all mutable fields. Returns None if the user does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        form: &UserForm,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET first_name = ?1, last_name = ?2, image_url = ?3 WHERE id = ?4 RETURNING {}",
            COLUMNS
        ))
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.image_url)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Delete the user; owned posts (and their join rows) go with it via the
    /// schema's cascades. Returns false if the user did not exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(user_id = id, "deleted user");
        }
        Ok(deleted)
    }
}
