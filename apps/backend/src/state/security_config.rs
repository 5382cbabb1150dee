use jsonwebtoken::Algorithm;

/// Configuration for session-token signing and verification
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying session tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
