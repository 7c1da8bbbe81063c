//! Types for authentication and user management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token endpoint response from the GoTrue server
///
/// Both `/signup` and `/token` answer with this shape; when email
/// confirmation is pending the token fields are absent and only the
/// user document is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The user data
    pub user: Option<User>,

    /// The access token
    pub access_token: Option<String>,

    /// The refresh token
    pub refresh_token: Option<String>,

    /// The token type
    pub token_type: Option<String>,

    /// The expiry time in seconds
    pub expires_in: Option<i64>,

    /// Any error that occurred
    pub error: Option<String>,

    /// The error description
    pub error_description: Option<String>,
}

/// User data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The user's email address
    pub email: Option<String>,

    /// The user metadata
    #[serde(default)]
    pub user_metadata: HashMap<String, serde_json::Value>,

    /// The user's role
    pub role: Option<String>,

    /// The last sign-in time
    pub last_sign_in_at: Option<String>,

    /// The creation time
    pub created_at: Option<String>,

    /// The update time
    pub updated_at: Option<String>,
}
