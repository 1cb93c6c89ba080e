//! Tag queries and mutations, including the tag→post association set.

use crate::error::AppError;
use crate::forms::TagForm;
use crate::models::{Post, Tag};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeSet;

pub struct TagService;

impl TagService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(tags)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Tag>, AppError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(tag)
    }

    /// Posts carrying one tag, in id order.
    pub async fn posts(pool: &SqlitePool, tag_id: i64) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT p.id, p.title, p.content, p.user_id FROM posts p \
             JOIN post_tags pt ON pt.post_id = p.id \
             WHERE pt.tag_id = ?1 ORDER BY p.id",
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Insert the tag and its post associations in one transaction.
    /// A duplicate name violates the UNIQUE constraint and maps to Conflict.
    pub async fn create(pool: &SqlitePool, form: &TagForm) -> Result<Tag, AppError> {
        let mut tx = pool.begin().await?;
        let tag = match sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES (?1) RETURNING id, name",
        )
        .bind(&form.name)
        .fetch_one(&mut *tx)
        .await
        {
            Ok(tag) => tag,
            Err(e) => return Err(map_unique(e, &form.name)),
        };
        link_posts(&mut tx, tag.id, &form.post_ids).await?;
        tx.commit().await?;
        tracing::debug!(tag_id = tag.id, "created tag");
        Ok(tag)
    }

    /// Overwrite the name and replace the post set entirely.
    /// Returns None if the tag does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        form: &TagForm,
    ) -> Result<Option<Tag>, AppError> {
        let mut tx = pool.begin().await?;
        let tag = match sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = ?1 WHERE id = ?2 RETURNING id, name",
        )
        .bind(&form.name)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        {
            Ok(Some(tag)) => tag,
            Ok(None) => return Ok(None),
            Err(e) => return Err(map_unique(e, &form.name)),
        };
        sqlx::query("DELETE FROM post_tags WHERE tag_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_posts(&mut tx, id, &form.post_ids).await?;
        tx.commit().await?;
        Ok(Some(tag))
    }

    /// Delete the tag; join rows cascade, the posts themselves survive.
    /// Returns false if the tag did not exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(tag_id = id, "deleted tag");
        }
        Ok(deleted)
    }
}

fn map_unique(e: sqlx::Error, name: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("tag name '{}' already exists", name))
        }
        _ => AppError::Db(e),
    }
}

/// Attach the submitted post ids to a tag. Membership against the posts table
/// drops ids that resolve to nothing.
async fn link_posts(
    tx: &mut SqliteConnection,
    tag_id: i64,
    post_ids: &BTreeSet<i64>,
) -> Result<(), AppError> {
    if post_ids.is_empty() {
        return Ok(());
    }
    let placeholders: Vec<String> = (0..post_ids.len()).map(|i| format!("?{}", i + 2)).collect();
    let sql = format!(
        "INSERT INTO post_tags (post_id, tag_id) SELECT id, ?1 FROM posts WHERE id IN ({})",
        placeholders.join(", ")
    );
    let mut query = sqlx::query(&sql).bind(tag_id);
    for id in post_ids {
        query = query.bind(id);
    }
    query.execute(&mut *tx).await?;
    Ok(())
}
