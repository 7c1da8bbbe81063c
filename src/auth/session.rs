//! Session management for authentication

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// An authenticated session against the GoTrue server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The id of the user the session belongs to
    pub user_id: String,

    /// The token type, always "bearer"
    pub token_type: String,

    /// The expiry time in seconds
    pub expires_in: i64,

    /// The expiry timestamp
    pub expires_at: Option<i64>,
}

impl Session {
    /// Create a new session expiring `expires_in` seconds from now
    pub fn new(
        access_token: String,
        refresh_token: String,
        user_id: String,
        expires_in: i64,
    ) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs() as i64;

        Self {
            access_token,
            refresh_token,
            user_id,
            token_type: "bearer".to_string(),
            expires_in,
            expires_at: Some(now + expires_in),
        }
    }
}
