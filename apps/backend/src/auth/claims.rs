//! Claims carried by the self-contained session credential.

use serde::{Deserialize, Serialize};

/// Session-token claims. Validity is entirely signature + expiry; nothing is
/// persisted server-side and there is no revocation list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Internal user id (users.id)
    pub user_id: i64,
    /// Provider subject id (users.google_id)
    pub google_id: String,
    pub email: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
