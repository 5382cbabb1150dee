use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::SessionClaims;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Session lifetime: 30 days from mint time.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Mint a HS256 session token binding {user id, provider subject id, email}.
pub fn mint_session_token(
    user_id: i64,
    google_id: &str,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let issued_at = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = SessionClaims {
        user_id,
        google_id: google_id.to_string(),
        email: email.to_string(),
        exp: issued_at + SESSION_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
}

/// Verify a session token and return its claims.
///
/// Errors:
/// - Expired token → `AppError::UnauthorizedExpiredToken`
/// - Bad signature or malformed → `AppError::UnauthorizedInvalidToken`
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    // Exact expiry boundary, no clock-skew allowance.
    validation.leeway = 0;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_token(),
        _ => AppError::unauthorized_invalid_token(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_session_token, verify_session_token, SESSION_TTL_SECS};
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_session_token(42, "google-sub-123", "player@example.com", now, &security)
            .unwrap();
        let claims = verify_session_token(&token, &security).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.google_id, "google-sub-123");
        assert_eq!(claims.email, "player@example.com");
        assert_eq!(
            claims.exp,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64 + SESSION_TTL_SECS
        );
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let security = test_security();
        // Minted almost 30 days ago, 90 seconds of life left
        let now = SystemTime::now() - Duration::from_secs(SESSION_TTL_SECS as u64 - 90);

        let token = mint_session_token(1, "sub", "a@example.com", now, &security).unwrap();
        assert!(verify_session_token(&token, &security).is_ok());
    }

    #[test]
    fn test_expired_token() {
        let security = test_security();
        // Minted just over 30 days ago
        let now = SystemTime::now() - Duration::from_secs(SESSION_TTL_SECS as u64 + 90);

        let token = mint_session_token(1, "sub", "a@example.com", now, &security).unwrap();
        let result = verify_session_token(&token, &security);

        match result {
            Err(AppError::UnauthorizedExpiredToken) => {}
            other => panic!("Expected expired-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token =
            mint_session_token(7, "sub", "a@example.com", SystemTime::now(), &security_a).unwrap();
        let result = verify_session_token(&token, &security_b);

        match result {
            Err(AppError::UnauthorizedInvalidToken) => {}
            other => panic!("Expected invalid-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_token() {
        let security = test_security();
        let result = verify_session_token("not-a-jwt", &security);

        match result {
            Err(AppError::UnauthorizedInvalidToken) => {}
            other => panic!("Expected invalid-token error, got {other:?}"),
        }
    }
}
