use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::google::GoogleConfig;
use crate::error::AppError;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration for session tokens
    pub security: SecurityConfig,
    /// Identity-provider configuration for the OAuth flow
    pub google: GoogleConfig,
    /// HTTP client used for the provider token exchange
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, google: GoogleConfig) -> Self {
        Self {
            db: Some(db),
            security,
            google,
            http: reqwest::Client::new(),
        }
    }

    /// Create an AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig, google: GoogleConfig) -> Self {
        Self {
            db: None,
            security,
            google,
            http: reqwest::Client::new(),
        }
    }

    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::internal("Database connection not available".to_string()))
    }
}
