use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, NotSet, Set};
use time::OffsetDateTime;
use tracing::info;

use crate::entities::users;
use crate::error::AppError;

/// Redacts a provider subject id for logging purposes.
/// Shows only the first 4 characters followed by asterisks.
fn redact_google_id(google_id: &str) -> String {
    if google_id.len() <= 4 {
        "*".repeat(google_id.len())
    } else {
        format!("{}***", &google_id[..4])
    }
}

/// Upsert a user for a successful provider login.
///
/// Relies on the store's native conflict resolution on `google_id` rather
/// than a read-modify-write, so concurrent logins for the same subject can
/// never create duplicate rows. The update path refreshes email, name and
/// last_login; rows are never deleted.
pub async fn upsert_on_login<C>(
    conn: &C,
    google_id: &str,
    email: &str,
    name: &str,
) -> Result<users::Model, AppError>
where
    C: ConnectionTrait,
{
    let now = OffsetDateTime::now_utc();

    let active = users::ActiveModel {
        id: NotSet, // Let database auto-generate
        google_id: Set(google_id.to_string()),
        email: Set(email.to_string()),
        name: Set(name.to_string()),
        created_at: Set(now),
        last_login: Set(now),
    };

    let user = users::Entity::insert(active)
        .on_conflict(
            OnConflict::column(users::Column::GoogleId)
                .update_columns([
                    users::Column::Email,
                    users::Column::Name,
                    users::Column::LastLogin,
                ])
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;

    info!(
        user_id = user.id,
        google_id = %redact_google_id(google_id),
        "login upsert"
    );

    Ok(user)
}
