use actix_web::{web, HttpResponse};
use av_shared::ApiResponse;
use validator::Validate;

use av_core::repositories::UserRepository;
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};

use super::verify::verification_status;
use super::AppState;
use crate::dto::{ResendRequest, VerificationStatusResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for GET /api/v1/resend/{email}
///
/// Same payload as GET /api/v1/verify/{email}.
pub async fn resend_status<U, P, N>(
    state: web::Data<AppState<U, P, N>>,
    email: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    verification_status(state, email).await
}

/// Handler for POST /api/v1/resend
///
/// Requests a fresh code for an unconfirmed user.
pub async fn resend<U, P, N>(
    state: web::Data<AppState<U, P, N>>,
    request: web::Json<ResendRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.account_service.resend_code(&request.email).await {
        Ok(user) => HttpResponse::Ok().json(
            ApiResponse::success(VerificationStatusResponse::from(&user))
                .with_message("A new verification code was sent to your phone"),
        ),
        Err(e) => handle_domain_error(&e),
    }
}
