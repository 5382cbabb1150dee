#![allow(dead_code)]

use std::time::SystemTime;

use backend::{build_state, mint_session_token, AppState, SecurityConfig};

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// State backed by a fresh in-memory SQLite database with the schema applied.
pub async fn sqlite_state() -> AppState {
    build_state()
        .with_database_url("sqlite::memory:")
        .with_security(test_security())
        .build()
        .await
        .expect("in-memory database state should build")
}

/// State with no database at all, for handler paths that must not touch the store.
pub async fn stateless_state() -> AppState {
    build_state()
        .with_security(test_security())
        .build()
        .await
        .expect("state without db should build")
}

pub fn session_token(user_id: i64, google_id: &str, email: &str) -> String {
    mint_session_token(
        user_id,
        google_id,
        email,
        SystemTime::now(),
        &test_security(),
    )
    .expect("token should mint")
}
