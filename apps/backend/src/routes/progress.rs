use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::entities::game_progress;
use crate::error::AppError;
use crate::extractors::session::Session;
use crate::services::progress::{self, ProgressUpdate};
use crate::state::app_state::AppState;

/// Wire shape of a stored snapshot. Counter fields are coerced to integers;
/// pointsPerSecond keeps its fractional part.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressResponse {
    points: i64,
    total_clicks: i64,
    level: i32,
    points_per_click: i64,
    points_per_second: f64,
    upgrades: JsonValue,
    achievements: JsonValue,
    selected_skin: String,
    owned_skins: JsonValue,
}

impl From<game_progress::Model> for ProgressResponse {
    fn from(model: game_progress::Model) -> Self {
        Self {
            points: model.points as i64,
            total_clicks: model.total_clicks,
            level: model.level,
            points_per_click: model.points_per_click as i64,
            points_per_second: model.points_per_second,
            upgrades: model.upgrades,
            achievements: model.achievements,
            selected_skin: model.selected_skin,
            owned_skins: model.owned_skins,
        }
    }
}

impl From<ProgressUpdate> for ProgressResponse {
    fn from(update: ProgressUpdate) -> Self {
        Self {
            points: update.points as i64,
            total_clicks: update.total_clicks,
            level: update.level,
            points_per_click: update.points_per_click as i64,
            points_per_second: update.points_per_second,
            upgrades: update.upgrades,
            achievements: update.achievements,
            selected_skin: update.selected_skin,
            owned_skins: update.owned_skins,
        }
    }
}

/// Save body. Omitted fields take the documented new-player defaults, making
/// every save a full replace rather than a patch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SaveProgressRequest {
    points: f64,
    total_clicks: i64,
    level: i32,
    points_per_click: f64,
    points_per_second: f64,
    upgrades: JsonValue,
    achievements: JsonValue,
    selected_skin: String,
    owned_skins: JsonValue,
}

impl Default for SaveProgressRequest {
    fn default() -> Self {
        let defaults = ProgressUpdate::default();
        Self {
            points: defaults.points,
            total_clicks: defaults.total_clicks,
            level: defaults.level,
            points_per_click: defaults.points_per_click,
            points_per_second: defaults.points_per_second,
            upgrades: defaults.upgrades,
            achievements: defaults.achievements,
            selected_skin: defaults.selected_skin,
            owned_skins: defaults.owned_skins,
        }
    }
}

impl From<SaveProgressRequest> for ProgressUpdate {
    fn from(request: SaveProgressRequest) -> Self {
        Self {
            points: request.points,
            total_clicks: request.total_clicks,
            level: request.level,
            points_per_click: request.points_per_click,
            points_per_second: request.points_per_second,
            upgrades: request.upgrades,
            achievements: request.achievements,
            selected_skin: request.selected_skin,
            owned_skins: request.owned_skins,
        }
    }
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    success: bool,
}

/// Load the caller's snapshot, falling back to the default new-player state
/// when no row exists yet. The fallback is an explicit branch here so the
/// no-row case stays visible and testable.
async fn load(session: Session, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;

    let response = match progress::find_by_user(db, session.user_id).await? {
        Some(model) => ProgressResponse::from(model),
        None => ProgressResponse::from(ProgressUpdate::default()),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Full-replace save of the caller's snapshot.
async fn save(
    session: Session,
    app_state: web::Data<AppState>,
    body: web::Json<SaveProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    progress::save(db, session.user_id, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(SaveResponse { success: true }))
}

/// Any other method is rejected, but only after the credential check so an
/// unauthenticated PUT still reads as 401, not 405.
async fn method_not_allowed(_session: Session) -> Result<HttpResponse, AppError> {
    Err(AppError::method_not_allowed())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/progress")
            .route(web::get().to(load))
            .route(web::post().to(save))
            .default_service(web::route().to(method_not_allowed)),
    );
}
