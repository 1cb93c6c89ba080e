//! Inkpress: server-rendered blog admin for users, posts, and tags.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::AppError;
pub use routes::app;
pub use state::AppState;
pub use store::{connect, ensure_schema};
