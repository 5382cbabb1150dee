use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One row per user, fully overwritten on every save.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub points: f64,
    #[sea_orm(column_name = "total_clicks")]
    pub total_clicks: i64,
    pub level: i32,
    #[sea_orm(column_name = "points_per_click")]
    pub points_per_click: f64,
    #[sea_orm(column_name = "points_per_second")]
    pub points_per_second: f64,
    pub upgrades: Json,
    pub achievements: Json,
    #[sea_orm(column_name = "selected_skin")]
    pub selected_skin: String,
    #[sea_orm(column_name = "owned_skins")]
    pub owned_skins: Json,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
