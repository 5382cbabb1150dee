use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::auth::google::{self, GoogleIdClaims};
use crate::auth::jwt::{mint_session_token, verify_session_token};
use crate::error::AppError;
use crate::extractors::auth_token::bearer_token;
use crate::services::{progress, users};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct AuthQuery {
    action: Option<String>,
    code: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthUrlResponse {
    #[serde(rename = "authUrl")]
    auth_url: String,
}

#[derive(Debug, Serialize)]
struct VerifyResponse {
    valid: bool,
    user_id: i64,
    email: String,
}

/// Single auth entry point; the `action` query parameter selects the
/// operation, defaulting to `login`.
async fn auth_entry(
    req: HttpRequest,
    query: web::Query<AuthQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match query.action.as_deref().unwrap_or("login") {
        "login" => login(&app_state),
        "callback" => Ok(callback(&app_state, query.code.clone()).await),
        "verify" => verify(&req, &app_state),
        _ => Err(AppError::not_found()),
    }
}

/// Build the provider authorization URL the client opens in a popup.
fn login(app_state: &AppState) -> Result<HttpResponse, AppError> {
    let auth_url = google::authorization_url(&app_state.google)?;
    Ok(HttpResponse::Ok().json(AuthUrlResponse { auth_url }))
}

const CLOSE_POPUP_HTML: &str = "<html><body><script>window.close();</script></body></html>";

fn success_popup_html(token: &str) -> String {
    format!(
        "<html><body><script>\
         window.opener.postMessage({{ type: 'GOOGLE_AUTH_SUCCESS', token: '{token}' }}, '*');\
         window.close();\
         </script></body></html>"
    )
}

fn error_popup_html(err: &AppError) -> String {
    // Delay the close so the user can read the error before the popup goes away
    format!(
        "<html><body>Error: {err}\
         <script>setTimeout(() => window.close(), 3000);</script>\
         </body></html>"
    )
}

/// Handle the provider redirect. This endpoint talks to a browser popup, so
/// every outcome renders HTML rather than JSON.
async fn callback(app_state: &AppState, code: Option<String>) -> HttpResponse {
    let Some(code) = code.filter(|code| !code.is_empty()) else {
        return HttpResponse::BadRequest()
            .content_type("text/html; charset=utf-8")
            .body(CLOSE_POPUP_HTML);
    };

    match complete_login(app_state, &code).await {
        Ok(token) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(success_popup_html(&token)),
        Err(err) => {
            error!(error = %err, "oauth callback failed");
            HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body(error_popup_html(&err))
        }
    }
}

/// Exchange the code, upsert the user and their progress row, mint a session.
async fn complete_login(app_state: &AppState, code: &str) -> Result<String, AppError> {
    let id_token = google::exchange_code(&app_state.http, &app_state.google, code).await?;
    let GoogleIdClaims { sub, email, name } = google::decode_id_claims(&id_token)?;

    let db = app_state.require_db()?;
    let txn = db.begin().await?;
    let user = users::upsert_on_login(&txn, &sub, &email, &name).await?;
    progress::ensure_row(&txn, user.id).await?;
    txn.commit().await?;

    mint_session_token(user.id, &sub, &email, SystemTime::now(), &app_state.security)
}

/// Check a session credential and echo back the identity it asserts.
fn verify(req: &HttpRequest, app_state: &AppState) -> Result<HttpResponse, AppError> {
    let token = bearer_token(req).ok_or_else(AppError::unauthorized_no_token)?;
    let claims = verify_session_token(&token, &app_state.security)?;

    Ok(HttpResponse::Ok().json(VerifyResponse {
        valid: true,
        user_id: claims.user_id,
        email: claims.email,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth").route(web::get().to(auth_entry)));
}
