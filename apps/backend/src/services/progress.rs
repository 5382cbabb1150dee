//! Persistence for per-user game-state snapshots.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set};
use serde_json::{json, Value as JsonValue};
use time::OffsetDateTime;

use crate::entities::game_progress;
use crate::error::AppError;

pub const DEFAULT_SKIN: &str = "Sparkles";

/// A full snapshot of one player's game state. Saves always replace every
/// field; the caller fills omitted fields with defaults before getting here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub points: f64,
    pub total_clicks: i64,
    pub level: i32,
    pub points_per_click: f64,
    pub points_per_second: f64,
    pub upgrades: JsonValue,
    pub achievements: JsonValue,
    pub selected_skin: String,
    pub owned_skins: JsonValue,
}

impl Default for ProgressUpdate {
    /// The documented new-player snapshot.
    fn default() -> Self {
        Self {
            points: 0.0,
            total_clicks: 0,
            level: 1,
            points_per_click: 1.0,
            points_per_second: 0.0,
            upgrades: json!([]),
            achievements: json!([]),
            selected_skin: DEFAULT_SKIN.to_string(),
            owned_skins: json!([DEFAULT_SKIN]),
        }
    }
}

pub async fn find_by_user<C>(
    conn: &C,
    user_id: i64,
) -> Result<Option<game_progress::Model>, AppError>
where
    C: ConnectionTrait,
{
    game_progress::Entity::find_by_id(user_id)
        .one(conn)
        .await
        .map_err(AppError::from)
}

/// Ensure a progress row exists for the user, inserting the default snapshot
/// if none does. No-op when a row is already present.
pub async fn ensure_row<C>(conn: &C, user_id: i64) -> Result<(), AppError>
where
    C: ConnectionTrait,
{
    let active = active_from(user_id, ProgressUpdate::default());

    match game_progress::Entity::insert(active)
        .on_conflict(
            OnConflict::column(game_progress::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec(conn)
        .await
    {
        Ok(_) => Ok(()),
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(err) => Err(AppError::from(err)),
    }
}

/// Full-replace save: every tracked column is overwritten atomically and
/// `updated_at` refreshed. Upserts so a missing row is created rather than
/// silently ignored.
pub async fn save<C>(conn: &C, user_id: i64, update: ProgressUpdate) -> Result<(), AppError>
where
    C: ConnectionTrait,
{
    let active = active_from(user_id, update);

    game_progress::Entity::insert(active)
        .on_conflict(
            OnConflict::column(game_progress::Column::UserId)
                .update_columns([
                    game_progress::Column::Points,
                    game_progress::Column::TotalClicks,
                    game_progress::Column::Level,
                    game_progress::Column::PointsPerClick,
                    game_progress::Column::PointsPerSecond,
                    game_progress::Column::Upgrades,
                    game_progress::Column::Achievements,
                    game_progress::Column::SelectedSkin,
                    game_progress::Column::OwnedSkins,
                    game_progress::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(conn)
        .await?;

    Ok(())
}

fn active_from(user_id: i64, update: ProgressUpdate) -> game_progress::ActiveModel {
    game_progress::ActiveModel {
        user_id: Set(user_id),
        points: Set(update.points),
        total_clicks: Set(update.total_clicks),
        level: Set(update.level),
        points_per_click: Set(update.points_per_click),
        points_per_second: Set(update.points_per_second),
        upgrades: Set(update.upgrades),
        achievements: Set(update.achievements),
        selected_skin: Set(update.selected_skin),
        owned_skins: Set(update.owned_skins),
        updated_at: Set(OffsetDateTime::now_utc()),
    }
}
