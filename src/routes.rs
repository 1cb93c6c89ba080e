//! Router assembly: one route per URL pattern and method.

use crate::handlers::{home, posts, tags, users};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/users", get(users::index))
        .route("/users/new", get(users::new_form).post(users::create))
        .route("/users/:id", get(users::show))
        .route("/users/:id/edit", get(users::edit_form).post(users::update))
        .route("/users/:id/delete", post(users::delete))
        .route("/users/:id/posts/new", get(posts::new_form).post(posts::create))
        .route("/posts/:id", get(posts::show))
        .route("/posts/:id/edit", get(posts::edit_form).post(posts::update))
        .route("/posts/:id/delete", post(posts::delete))
        .route("/tags", get(tags::index))
        .route("/tags/new", get(tags::new_form).post(tags::create))
        .route("/tags/:id", get(tags::show))
        .route("/tags/:id/edit", get(tags::edit_form).post(tags::update))
        .route("/tags/:id/delete", post(tags::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
