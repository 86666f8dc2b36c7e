//! Tests for the bearer token check on GET /api/v1/status

mod common;

use actix_web::{http::StatusCode, test};
use av_api::app::create_app;
use av_core::domain::entities::user::User;
use av_core::repositories::UserRepository;
use av_core::services::{TokenService, TokenServiceConfig};
use serde_json::Value;

use common::context;

fn stored_user() -> User {
    User::new(
        "Ada Lovelace".to_string(),
        "ada@example.com".to_string(),
        "hash".to_string(),
        "4155552671".to_string(),
        "1".to_string(),
    )
}

#[actix_web::test]
async fn test_status_requires_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/status").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
}

#[actix_web::test]
async fn test_status_rejects_garbage_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/status")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn test_status_rejects_token_signed_with_other_secret() {
    let ctx = context();
    let user = ctx.users.create(stored_user()).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let foreign = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let token = foreign.issue(&user).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/status")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_status_returns_current_user() {
    let ctx = context();
    let user = ctx.users.create(stored_user()).await.unwrap();
    let token = ctx.token_service.issue(&user).unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/status")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], user.id.to_string());
    assert_eq!(body["data"]["verification_state"], "registered");
}

#[actix_web::test]
async fn test_status_for_deleted_account() {
    let ctx = context();
    let token = ctx.token_service.issue(&stored_user()).unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/status")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
