use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::jwt::verify_session_token;
use crate::error::AppError;
use crate::extractors::auth_token::bearer_token;
use crate::state::app_state::AppState;

/// Authenticated identity for progress endpoints, extracted from the session
/// credential before any handler runs.
///
/// Missing token → 401 Unauthorized. Any verification failure, expiry
/// included, is reported as a generic invalid-token 401; only the auth
/// service's verify action distinguishes expiry.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub google_id: String,
    pub email: String,
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req).ok_or_else(AppError::unauthorized)?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            let claims = verify_session_token(&token, &app_state.security)
                .map_err(|_| AppError::unauthorized_invalid_token())?;

            Ok(Session {
                user_id: claims.user_id,
                google_id: claims.google_id,
                email: claims.email,
            })
        })
    }
}
