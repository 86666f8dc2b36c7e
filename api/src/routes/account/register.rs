use actix_web::{web, HttpResponse};
use av_shared::phone::mask_phone_number;
use av_shared::ApiResponse;
use validator::Validate;

use av_core::repositories::UserRepository;
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};

use super::AppState;
use crate::dto::{RegisterRequest, UserResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/register
///
/// Creates the account and texts a confirmation code to the phone number.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada Lovelace",
///     "email": "ada@example.com",
///     "password": "correct horse battery",
///     "country_code": "1",
///     "phone_number": "5551234567"
/// }
/// ```
///
/// # Responses
///
/// - `201 Created` with the new user; a code is on its way
/// - `400` invalid fields, `409` email taken
/// - `503` the user is stored but no code went out; the client should offer a resend
pub async fn register<U, P, N>(
    state: web::Data<AppState<U, P, N>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let request = request.into_inner();
    tracing::info!(
        event = "registration_requested",
        phone = %mask_phone_number(&format!("{}{}", request.country_code, request.phone_number)),
    );

    match state.account_service.register(request.into()).await {
        Ok(result) => HttpResponse::Created().json(
            ApiResponse::success(UserResponse::from(&result.user))
                .with_message("Account created. A verification code was sent to your phone"),
        ),
        Err(e) => handle_domain_error(&e),
    }
}
