//! HTTP handlers, one module per entity.

pub mod posts;
pub mod tags;
pub mod users;

use crate::error::AppError;
use axum::response::Redirect;

/// Path identifiers are positive integers; anything else is a routing-level
/// NotFound rather than a parse error.
pub(crate) fn parse_id(segment: &str) -> Result<i64, AppError> {
    match segment.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::NotFound(format!("no such record '{}'", segment))),
    }
}

/// GET / redirects to the user list.
pub async fn home() -> Redirect {
    Redirect::to("/users")
}
