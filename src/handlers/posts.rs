//! Post routes: create under a user, show, edit, delete.
//! Mutations redirect back to the owning user's detail page.

use super::parse_id;
use crate::error::AppError;
use crate::forms::PostForm;
use crate::service::{PostService, TagService, UserService};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use tera::Context;

pub async fn new_form(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let user_id = parse_id(&user_id)?;
    let user = UserService::find(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;
    let tags = TagService::list(&state.pool).await?;
    let mut ctx = Context::new();
    ctx.insert("user", &user);
    ctx.insert("tags", &tags);
    views::render(&state, "posts/new.html", &ctx)
}

pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let user_id = parse_id(&user_id)?;
    let user = UserService::find(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;
    let form = PostForm::from_pairs(&pairs)?;
    PostService::create(&state.pool, user.id, &form).await?;
    Ok(Redirect::to(&format!("/users/{}", user.id)))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let post = PostService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
    let owner = UserService::find(&state.pool, post.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", post.user_id)))?;
    let tags = PostService::tags(&state.pool, post.id).await?;
    let mut ctx = Context::new();
    ctx.insert("post", &post);
    ctx.insert("user", &owner);
    ctx.insert("tags", &tags);
    views::render(&state, "posts/show.html", &ctx)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let post = PostService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
    let tags = TagService::list(&state.pool).await?;
    let selected: Vec<i64> = PostService::tags(&state.pool, post.id)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();
    let mut ctx = Context::new();
    ctx.insert("post", &post);
    ctx.insert("tags", &tags);
    ctx.insert("selected", &selected);
    views::render(&state, "posts/edit.html", &ctx)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let form = PostForm::from_pairs(&pairs)?;
    let post = PostService::update(&state.pool, id, &form)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
    Ok(Redirect::to(&format!("/users/{}", post.user_id)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let user_id = PostService::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
    Ok(Redirect::to(&format!("/users/{}", user_id)))
}
