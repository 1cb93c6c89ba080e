//! Template engine setup and the render helper.
//!
//! Templates are compiled into the binary so the server runs from any
//! working directory.

use crate::error::AppError;
use crate::state::AppState;
use axum::response::Html;
use tera::{Context, Tera};

pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("users/index.html", include_str!("../templates/users/index.html")),
        ("users/new.html", include_str!("../templates/users/new.html")),
        ("users/show.html", include_str!("../templates/users/show.html")),
        ("users/edit.html", include_str!("../templates/users/edit.html")),
        ("posts/new.html", include_str!("../templates/posts/new.html")),
        ("posts/show.html", include_str!("../templates/posts/show.html")),
        ("posts/edit.html", include_str!("../templates/posts/edit.html")),
        ("tags/index.html", include_str!("../templates/tags/index.html")),
        ("tags/new.html", include_str!("../templates/tags/new.html")),
        ("tags/show.html", include_str!("../templates/tags/show.html")),
        ("tags/edit.html", include_str!("../templates/tags/edit.html")),
    ])?;
    Ok(tera)
}

pub fn render(state: &AppState, name: &str, ctx: &Context) -> Result<Html<String>, AppError> {
    let body = state.templates.render(name, ctx)?;
    Ok(Html(body))
}
