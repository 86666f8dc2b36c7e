use actix_web::{web, HttpResponse};
use av_shared::ApiResponse;

use av_core::repositories::UserRepository;
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};

use super::AppState;
use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/status
///
/// Requires authentication. Returns the signed-in user as currently stored.
pub async fn status<U, P, N>(
    state: web::Data<AppState<U, P, N>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProviderTrait + 'static,
    N: SmsNotifierTrait + 'static,
{
    match state.account_service.verification_status(&auth.email).await {
        Ok(user) if user.id == auth.user_id => {
            HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(&user)))
        }
        Ok(_) => handle_domain_error(&av_core::errors::DomainError::Unauthorized),
        Err(e) => handle_domain_error(&e),
    }
}
