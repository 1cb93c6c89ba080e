//! Post queries and mutations, including the post→tag association set.

use crate::error::AppError;
use crate::forms::PostForm;
use crate::models::{Post, Tag};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeSet;

const COLUMNS: &str = "id, title, content, user_id";

pub struct PostService;

impl PostService {
    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE id = ?1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts ORDER BY id",
            COLUMNS
        ))
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    pub async fn for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE user_id = ?1 ORDER BY id",
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Tags attached to one post, in id order.
    pub async fn tags(pool: &SqlitePool, post_id: i64) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name FROM tags t \
             JOIN post_tags pt ON pt.tag_id = t.id \
             WHERE pt.post_id = ?1 ORDER BY t.id",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;
        Ok(tags)
    }

    /// Insert the post and its tag associations in one transaction.
    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        form: &PostForm,
    ) -> Result<Post, AppError> {
        let mut tx = pool.begin().await?;
        let post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, content, user_id) VALUES (?1, ?2, ?3) RETURNING {}",
            COLUMNS
        ))
        .bind(&form.title)
        .bind(&form.content)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        link_tags(&mut tx, post.id, &form.tag_ids).await?;
        tx.commit().await?;
        tracing::debug!(post_id = post.id, user_id, "created post");
        Ok(post)
    }

    /// Overwrite title and content and replace the tag set entirely.
    /// Returns None if the post does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        form: &PostForm,
    ) -> Result<Option<Post>, AppError> {
        let mut tx = pool.begin().await?;
        let Some(post) = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET title = ?1, content = ?2 WHERE id = ?3 RETURNING {}",
            COLUMNS
        ))
        .bind(&form.title)
        .bind(&form.content)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };
        sqlx::query("DELETE FROM post_tags WHERE post_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_tags(&mut tx, id, &form.tag_ids).await?;
        tx.commit().await?;
        Ok(Some(post))
    }

    /// Delete the post; join rows cascade, the tags themselves survive.
    /// Returns the owning user id, or None if the post did not exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Option<i64>, AppError> {
        let row: Option<(i64,)> =
            sqlx::query_as("DELETE FROM posts WHERE id = ?1 RETURNING user_id")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        if row.is_some() {
            tracing::debug!(post_id = id, "deleted post");
        }
        Ok(row.map(|(user_id,)| user_id))
    }
}

/// Attach the submitted tag ids to a post. Membership against the tags table
/// drops ids that resolve to nothing.
async fn link_tags(
    tx: &mut SqliteConnection,
    post_id: i64,
    tag_ids: &BTreeSet<i64>,
) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let placeholders: Vec<String> = (0..tag_ids.len()).map(|i| format!("?{}", i + 2)).collect();
    let sql = format!(
        "INSERT INTO post_tags (post_id, tag_id) SELECT ?1, id FROM tags WHERE id IN ({})",
        placeholders.join(", ")
    );
    let mut query = sqlx::query(&sql).bind(post_id);
    for id in tag_ids {
        query = query.bind(id);
    }
    query.execute(&mut *tx).await?;
    Ok(())
}
