//! Typed form payloads built from URL-encoded key/value pairs.
//!
//! Handlers extract the raw pairs (multi-select fields arrive as repeated
//! keys) and convert them here, so every record is constructed from named,
//! checked fields rather than ad-hoc map lookups.

use crate::error::AppError;
use std::collections::BTreeSet;

/// User creation and edit payload.
#[derive(Debug, Clone)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

impl UserForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, AppError> {
        Ok(Self {
            first_name: required(pairs, "first_name")?,
            last_name: required(pairs, "last_name")?,
            image_url: optional(pairs, "image_url"),
        })
    }
}

/// Post creation and edit payload. The tag set fully replaces any prior set.
#[derive(Debug, Clone)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub tag_ids: BTreeSet<i64>,
}

impl PostForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, AppError> {
        Ok(Self {
            title: required(pairs, "title")?,
            content: required(pairs, "content")?,
            tag_ids: id_set(pairs, "tags")?,
        })
    }
}

/// Tag creation and edit payload. The post set fully replaces any prior set.
#[derive(Debug, Clone)]
pub struct TagForm {
    pub name: String,
    pub post_ids: BTreeSet<i64>,
}

impl TagForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, AppError> {
        Ok(Self {
            name: required(pairs, "name")?,
            post_ids: id_set(pairs, "posts")?,
        })
    }
}

fn field<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn required(pairs: &[(String, String)], key: &str) -> Result<String, AppError> {
    match field(pairs, key) {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest(format!("missing field '{}'", key))),
    }
}

/// Empty submissions are coerced to None ("unset").
fn optional(pairs: &[(String, String)], key: &str) -> Option<String> {
    field(pairs, key).filter(|v| !v.trim().is_empty()).map(String::from)
}

/// Collect every value submitted under `key` into a set of positive ids.
/// Duplicates collapse and submission order is irrelevant. A value that is
/// not a positive integer is a client error, not a server crash.
fn id_set(pairs: &[(String, String)], key: &str) -> Result<BTreeSet<i64>, AppError> {
    let mut ids = BTreeSet::new();
    for (_, v) in pairs.iter().filter(|(k, _)| k == key) {
        if v.is_empty() {
            continue;
        }
        let id: i64 = v
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| AppError::BadRequest(format!("invalid {} id '{}'", key, v)))?;
        ids.insert(id);
    }
    Ok(ids)
}
