//! Tag routes: list, create, show, edit, delete.

use super::parse_id;
use crate::error::AppError;
use crate::forms::TagForm;
use crate::service::{PostService, TagService};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use tera::Context;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tags = TagService::list(&state.pool).await?;
    let mut ctx = Context::new();
    ctx.insert("tags", &tags);
    views::render(&state, "tags/index.html", &ctx)
}

pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let posts = PostService::list(&state.pool).await?;
    let mut ctx = Context::new();
    ctx.insert("posts", &posts);
    views::render(&state, "tags/new.html", &ctx)
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = TagForm::from_pairs(&pairs)?;
    TagService::create(&state.pool, &form).await?;
    Ok(Redirect::to("/tags"))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let tag = TagService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", id)))?;
    let posts = TagService::posts(&state.pool, tag.id).await?;
    let mut ctx = Context::new();
    ctx.insert("tag", &tag);
    ctx.insert("posts", &posts);
    views::render(&state, "tags/show.html", &ctx)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let tag = TagService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", id)))?;
    let posts = PostService::list(&state.pool).await?;
    let selected: Vec<i64> = TagService::posts(&state.pool, tag.id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let mut ctx = Context::new();
    ctx.insert("tag", &tag);
    ctx.insert("posts", &posts);
    ctx.insert("selected", &selected);
    views::render(&state, "tags/edit.html", &ctx)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let form = TagForm::from_pairs(&pairs)?;
    TagService::update(&state.pool, id, &form)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", id)))?;
    Ok(Redirect::to("/tags"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    if !TagService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("tag {}", id)));
    }
    Ok(Redirect::to("/tags"))
}
