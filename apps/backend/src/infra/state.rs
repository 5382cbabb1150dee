use crate::auth::google::GoogleConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: SecurityConfig,
    google: GoogleConfig,
    database_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security: SecurityConfig::default(),
            google: GoogleConfig::default(),
            database_url: None,
        }
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    pub fn with_google(mut self, google: GoogleConfig) -> Self {
        self.google = google;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some(database_url) = self.database_url {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(&database_url).await?;
            Ok(AppState::new(conn, self.security, self.google))
        } else {
            Ok(AppState::without_db(self.security, self.google))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::build_state;

    #[tokio::test]
    async fn test_build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db.is_none());
    }

    #[tokio::test]
    async fn test_build_with_in_memory_db_runs_migrations() {
        let state = build_state()
            .with_database_url("sqlite::memory:")
            .build()
            .await
            .unwrap();

        let db = state.require_db().unwrap();
        let applied = migration::count_applied_migrations(db).await.unwrap();
        assert_eq!(applied, 1);
    }
}
