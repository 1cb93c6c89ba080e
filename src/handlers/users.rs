//! User routes: list, create, show, edit, delete.

use super::parse_id;
use crate::error::AppError;
use crate::forms::UserForm;
use crate::service::{PostService, UserService};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use tera::Context;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = UserService::list(&state.pool).await?;
    let mut ctx = Context::new();
    ctx.insert("users", &users);
    views::render(&state, "users/index.html", &ctx)
}

pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    views::render(&state, "users/new.html", &Context::new())
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = UserForm::from_pairs(&pairs)?;
    UserService::create(&state.pool, &form).await?;
    Ok(Redirect::to("/users"))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let user = UserService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    let posts = PostService::for_user(&state.pool, user.id).await?;
    let mut ctx = Context::new();
    ctx.insert("user", &user);
    ctx.insert("posts", &posts);
    views::render(&state, "users/show.html", &ctx)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let user = UserService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    let mut ctx = Context::new();
    ctx.insert("user", &user);
    views::render(&state, "users/edit.html", &ctx)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let form = UserForm::from_pairs(&pairs)?;
    UserService::update(&state.pool, id, &form)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    Ok(Redirect::to("/users"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    if !UserService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    Ok(Redirect::to("/users"))
}
