#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod health;
pub mod infra;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use auth::claims::SessionClaims;
pub use auth::google::GoogleConfig;
pub use auth::jwt::{mint_session_token, verify_session_token};
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::session::Session;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::cors::PermissiveCors;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
