//! Application factory
//!
//! Builds the Actix-web application around an `AppState`. The binary and the
//! integration tests share this factory.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use av_core::repositories::UserRepository;
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};
use av_shared::{ErrorResponse, HealthResponse};

use crate::middleware::JwtAuth;
use crate::routes::account::{
    register::register,
    resend::{resend, resend_status},
    status::status,
    verify::{verification_status, verify},
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, P, N>(
    app_state: web::Data<AppState<U, P, N>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.token_service.clone());

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::new("invalid_body", message)),
            )
            .into()
        }))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health_check))
                .route("/register", web::post().to(register::<U, P, N>))
                .route("/verify/{email}", web::get().to(verification_status::<U, P, N>))
                .route("/verify", web::post().to(verify::<U, P, N>))
                .route("/resend/{email}", web::get().to(resend_status::<U, P, N>))
                .route("/resend", web::post().to(resend::<U, P, N>))
                .service(
                    web::resource("/status")
                        .wrap(jwt_auth)
                        .route(web::get().to(status::<U, P, N>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "account-verification-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
