//! Shared application state for all routes.

use crate::views;
use sqlx::SqlitePool;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Build state from a connected pool; compiles the embedded templates.
    pub fn new(pool: SqlitePool) -> Result<Self, tera::Error> {
        Ok(Self {
            pool,
            templates: Arc::new(views::templates()?),
        })
    }
}
