use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Provider subject id; unique and immutable once set
    #[sea_orm(column_name = "google_id", unique)]
    pub google_id: String,
    pub email: String,
    pub name: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "last_login")]
    pub last_login: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::game_progress::Entity")]
    GameProgress,
}

impl Related<super::game_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
