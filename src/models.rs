//! Persisted record types. Serialize feeds the templates.

use serde::Serialize;
use sqlx::FromRow;

/// A blog author. Owns zero or more posts; deleting a user deletes them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// None when no image was supplied (an empty form field is coerced to None).
    pub image_url: Option<String>,
}

/// A post owned by exactly one user, tagged with zero or more tags.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

/// A label attached to posts through the `post_tags` join table.
/// Names are unique; a duplicate surfaces as a conflict.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
