//! Integration tests for the registration and phone verification endpoints

mod common;

use actix_web::{http::StatusCode, test};
use av_api::app::create_app;
use av_core::repositories::UserRepository;
use av_infra::otp::MockOtpProvider;
use av_infra::sms::MockSmsService;
use serde_json::{json, Value};

use common::{context, context_with, registration, TestContext};

async fn current_code(ctx: &TestContext, email: &str) -> String {
    let user = ctx.users.find_by_email(email).await.unwrap().unwrap();
    let handle = user.provider_user_id.expect("provider handle assigned");
    ctx.otp.code_for(&handle).await.expect("code outstanding")
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_register_sends_code() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(registration("ada@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["phone_number_confirmed"], false);
    assert_eq!(body["data"]["verification_state"], "confirmation_requested");
    assert_eq!(body["data"]["phone_number"], "+14****2671");
    assert!(body["data"].get("password_hash").is_none());

    let code = current_code(&ctx, "ada@example.com").await;
    assert_eq!(code.len(), 6);
}

#[actix_web::test]
async fn test_register_duplicate_email() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(registration("ada@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "email_already_in_use");
        }
    }

    assert_eq!(ctx.users.len().await, 1);
}

#[actix_web::test]
async fn test_register_invalid_body() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut payload = registration("not-an-email");
    payload["password"] = json!("short");

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].get("email").is_some());
    assert!(body["details"].get("password").is_some());
    assert!(ctx.users.is_empty().await);
}

#[actix_web::test]
async fn test_register_malformed_json() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_body");
}

#[actix_web::test]
async fn test_register_with_unreachable_provider() {
    let ctx = context_with(MockOtpProvider::failing(), MockSmsService::new());
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(registration("ada@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "provider_unavailable");

    // The account is kept so the user can ask for a resend later
    let user = ctx.users.find_by_email("ada@example.com").await.unwrap();
    assert!(user.is_some());
}

#[actix_web::test]
async fn test_verify_wrong_code() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(registration("ada@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let code = current_code(&ctx, "ada@example.com").await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let req = test::TestRequest::post()
        .uri("/api/v1/verify")
        .set_json(json!({ "email": "ada@example.com", "verification_code": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "verification_failed");

    let user = ctx.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert!(!user.phone_number_confirmed);
    assert_eq!(ctx.sms.get_message_count(), 0);
}

#[actix_web::test]
async fn test_full_verification_flow() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(registration("ada@example.com"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/verify/ada@example.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["verification_state"], "confirmation_requested");
    assert!(body["data"].get("id").is_none());
    assert!(body["data"].get("name").is_none());
    assert!(body["data"].get("phone_number").is_none());

    let code = current_code(&ctx, "ada@example.com").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/verify")
        .set_json(json!({ "email": "ADA@example.com", "verification_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["phone_number_confirmed"], true);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["welcome_sms_sent"], true);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let claims = ctx.token_service.verify(&token).unwrap();
    assert_eq!(claims.email, "ada@example.com");
    assert!(claims.phone_number_confirmed);

    let sent = ctx.sms.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+14155552671");

    // Signed-in status
    let req = test::TestRequest::get()
        .uri("/api/v1/status")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verification_state"], "confirmed");

    // A confirmed user can neither verify nor resend again
    let req = test::TestRequest::post()
        .uri("/api/v1/verify")
        .set_json(json!({ "email": "ada@example.com", "verification_code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/resend")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "already_confirmed");
}

#[actix_web::test]
async fn test_welcome_sms_failure_still_confirms() {
    let ctx = context_with(MockOtpProvider::new(), MockSmsService::failing());
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(registration("ada@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let code = current_code(&ctx, "ada@example.com").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/verify")
        .set_json(json!({ "email": "ada@example.com", "verification_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["welcome_sms_sent"], false);

    let user = ctx.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert!(user.phone_number_confirmed);
}

#[actix_web::test]
async fn test_resend_issues_new_code() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(registration("ada@example.com"))
        .to_request();
    test::call_service(&app, req).await;
    let handle_before = ctx
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap()
        .provider_user_id;

    let req = test::TestRequest::get()
        .uri("/api/v1/resend/ada@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("id").is_none());
    assert_eq!(body["data"]["verification_state"], "confirmation_requested");

    let req = test::TestRequest::post()
        .uri("/api/v1/resend")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The provider handle is registered once and reused
    let user = ctx.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(user.provider_user_id, handle_before);

    let code = current_code(&ctx, "ada@example.com").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/verify")
        .set_json(json!({ "email": "ada@example.com", "verification_code": code }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_email() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/verify/nobody@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_not_found");

    let req = test::TestRequest::post()
        .uri("/api/v1/resend")
        .set_json(json!({ "email": "nobody@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unknown_route() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
