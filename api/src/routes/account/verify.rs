use actix_web::{web, HttpResponse};
use av_shared::ApiResponse;
use validator::Validate;

use av_core::repositories::UserRepository;
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};

use super::AppState;
use crate::dto::{UserResponse, VerificationStatusResponse, VerifyRequest, VerifyResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for GET /api/v1/verify/{email}
///
/// Returns the email and verification state used to prefill the code entry
/// form. Identity fields stay behind `GET /status`.
pub async fn verification_status<U, P, N>(
    state: web::Data<AppState<U, P, N>>,
    email: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    match state.account_service.verification_status(&email).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(
            VerificationStatusResponse::from(&user),
        )),
        Err(e) => handle_domain_error(&e),
    }
}

/// Handler for POST /api/v1/verify
///
/// Checks the code with the provider. On success the phone number is
/// confirmed, a welcome SMS is sent and a session token is returned.
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "verification_code": "123456" }
/// ```
pub async fn verify<U, P, N>(
    state: web::Data<AppState<U, P, N>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let result = state
        .account_service
        .verify_code(&request.email, request.verification_code.trim())
        .await;

    match result {
        Ok(account) => {
            let response = VerifyResponse {
                user: UserResponse::from(&account.user),
                access_token: account.token,
                token_type: "Bearer".to_string(),
                expires_in: state.token_service.expiry_seconds(),
                welcome_sms_sent: account.welcome_sms_sent,
            };
            HttpResponse::Ok().json(
                ApiResponse::success(response).with_message("Phone number confirmed"),
            )
        }
        Err(e) => handle_domain_error(&e),
    }
}
