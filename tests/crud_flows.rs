//! End-to-end CRUD flows over the full router with an in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use inkpress::{app, connect, ensure_schema, AppState};
use tower::ServiceExt;

async fn test_app() -> Router {
    let pool = connect("sqlite::memory:").await.unwrap();
    ensure_schema(&pool).await.unwrap();
    app(AppState::new(pool).unwrap())
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Submit a URL-encoded form; returns the status and Location header (if any).
async fn post_form(app: &Router, path: &str, body: &str) -> (StatusCode, Option<String>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    (status, location)
}

async fn seed_user(app: &Router, first: &str, last: &str) {
    let body = format!("first_name={}&last_name={}&image_url=", first, last);
    let (status, location) = post_form(app, "/users/new", &body).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));
}

async fn seed_tag(app: &Router, name: &str) {
    let (status, _) = post_form(app, "/tags/new", &format!("name={}", name)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn home_redirects_to_user_list() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/users");
}

#[tokio::test]
async fn created_user_appears_in_list_with_unset_image() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;

    let (status, body) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ada"));
    assert!(body.contains("Lovelace"));

    let (status, body) = get(&app, "/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No image"));
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let app = test_app().await;
    assert_eq!(get(&app, "/users/42").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/users/abc").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/users/0").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/posts/9").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/tags/9").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_required_field_is_bad_request() {
    let app = test_app().await;
    let (status, _) = post_form(&app, "/users/new", "first_name=Ada").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_edit_overwrites_all_fields() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;

    let (status, location) = post_form(
        &app,
        "/users/1/edit",
        "first_name=Grace&last_name=Hopper&image_url=http://example.com/g.png",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));

    let (_, body) = get(&app, "/users/1").await;
    assert!(body.contains("Grace"));
    assert!(body.contains("Hopper"));
    // the url is entity-escaped in the attribute, so check structurally
    assert!(body.contains("<img"));
    assert!(body.contains("g.png"));
    assert!(!body.contains("No image"));
    assert!(!body.contains("Ada"));
}

#[tokio::test]
async fn post_shows_submitted_tag_set_regardless_of_order() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    seed_tag(&app, "alpha").await;
    seed_tag(&app, "beta").await;

    // ids submitted in reverse order
    let (status, location) = post_form(
        &app,
        "/users/1/posts/new",
        "title=Hello&content=World&tags=2&tags=1",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users/1"));

    let (status, body) = get(&app, "/posts/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hello"));
    assert!(body.contains("alpha"));
    assert!(body.contains("beta"));
}

#[tokio::test]
async fn editing_a_post_replaces_the_tag_set() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    seed_tag(&app, "alpha").await;
    seed_tag(&app, "beta").await;
    seed_tag(&app, "gamma").await;
    post_form(&app, "/users/1/posts/new", "title=Hello&content=World&tags=1&tags=2").await;

    let (status, location) = post_form(
        &app,
        "/posts/1/edit",
        "title=Hello&content=World&tags=2&tags=3",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users/1"));

    let (_, body) = get(&app, "/posts/1").await;
    assert!(!body.contains("alpha"));
    assert!(body.contains("beta"));
    assert!(body.contains("gamma"));
}

#[tokio::test]
async fn deleting_a_post_keeps_its_tags() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    seed_tag(&app, "alpha").await;
    post_form(&app, "/users/1/posts/new", "title=Hello&content=World&tags=1").await;

    let (status, location) = post_form(&app, "/posts/1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users/1"));

    assert_eq!(get(&app, "/posts/1").await.0, StatusCode::NOT_FOUND);
    let (_, body) = get(&app, "/users/1").await;
    assert!(!body.contains("Hello"));
    let (_, body) = get(&app, "/tags").await;
    assert!(body.contains("alpha"));
}

#[tokio::test]
async fn deleting_a_tag_keeps_its_posts() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    seed_tag(&app, "alpha").await;
    post_form(&app, "/users/1/posts/new", "title=Hello&content=World&tags=1").await;

    let (status, location) = post_form(&app, "/tags/1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/tags"));

    let (status, body) = get(&app, "/posts/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hello"));
    assert!(!body.contains("alpha"));
}

#[tokio::test]
async fn non_numeric_tag_id_is_a_client_error() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;

    let (status, _) = post_form(
        &app,
        "/users/1/posts/new",
        "title=Hello&content=World&tags=abc",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_tag_ids_are_dropped_from_the_set() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    seed_tag(&app, "alpha").await;

    let (status, _) = post_form(
        &app,
        "/users/1/posts/new",
        "title=Hello&content=World&tags=1&tags=99",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = get(&app, "/posts/1").await;
    assert!(body.contains("alpha"));
}

#[tokio::test]
async fn deleting_a_user_cascades_to_their_posts() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    post_form(&app, "/users/1/posts/new", "title=Hello&content=World").await;

    let (status, location) = post_form(&app, "/users/1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/users"));

    assert_eq!(get(&app, "/users/1").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/posts/1").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_tag_name_is_a_conflict() {
    let app = test_app().await;
    seed_tag(&app, "alpha").await;

    let (status, _) = post_form(&app, "/tags/new", "name=alpha").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn tag_edit_replaces_the_post_set() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    post_form(&app, "/users/1/posts/new", "title=First&content=a").await;
    post_form(&app, "/users/1/posts/new", "title=Second&content=b").await;
    seed_tag(&app, "alpha").await;
    post_form(&app, "/tags/1/edit", "name=alpha&posts=1").await;

    let (_, body) = get(&app, "/tags/1").await;
    assert!(body.contains("First"));
    assert!(!body.contains("Second"));

    post_form(&app, "/tags/1/edit", "name=alpha&posts=2").await;
    let (_, body) = get(&app, "/tags/1").await;
    assert!(!body.contains("First"));
    assert!(body.contains("Second"));
}

#[tokio::test]
async fn tag_created_with_posts_links_them() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    post_form(&app, "/users/1/posts/new", "title=Hello&content=World").await;

    let (status, _) = post_form(&app, "/tags/new", "name=alpha&posts=1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = get(&app, "/tags/1").await;
    assert!(body.contains("Hello"));
    let (_, body) = get(&app, "/posts/1").await;
    assert!(body.contains("alpha"));
}

#[tokio::test]
async fn forms_render_for_existing_records() {
    let app = test_app().await;
    seed_user(&app, "Ada", "Lovelace").await;
    seed_tag(&app, "alpha").await;
    post_form(&app, "/users/1/posts/new", "title=Hello&content=World&tags=1").await;

    for path in [
        "/users/new",
        "/users/1/edit",
        "/users/1/posts/new",
        "/posts/1/edit",
        "/tags/new",
        "/tags/1/edit",
    ] {
        let (status, _) = get(&app, path).await;
        assert_eq!(status, StatusCode::OK, "GET {}", path);
    }

    // edit form for a post marks its current tags as selected
    let (_, body) = get(&app, "/posts/1/edit").await;
    assert!(body.contains("checked"));
}
