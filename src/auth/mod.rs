//! Authentication against the Supabase GoTrue server

mod session;
mod types;

use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::error::Error;
use crate::fetch::Fetch;

pub use session::*;
pub use types::*;

/// Last-known authentication state, shared with the rest of the client
#[derive(Debug, Default)]
struct AuthSnapshot {
    session: Option<Session>,
    user: Option<User>,
}

/// Client for Supabase authentication
pub struct AuthClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session and user
    state: Arc<Mutex<AuthSnapshot>>,
}

impl AuthClient {
    /// Create a new AuthClient
    pub(crate) fn new(url: &str, key: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            state: Arc::new(Mutex::new(AuthSnapshot::default())),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Sign up a new user with email and password
    ///
    /// Returns `Ok(None)` when the server rejects the credentials or when a
    /// confirmation step is still pending and no session was issued.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, Error> {
        let url = self.auth_url("/signup");
        self.token_request(&url, email, password).await
    }

    /// Sign in a user with email and password
    ///
    /// Returns `Ok(None)` when the server rejects the credentials; transport
    /// and server failures are returned as errors.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, Error> {
        let url = self.auth_url("/token?grant_type=password");
        self.token_request(&url, email, password).await
    }

    async fn token_request(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<Session>, Error> {
        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let response = Fetch::post(&self.client, url)
            .header("apikey", &self.key)
            .header("X-Client-Info", crate::CLIENT_INFO)
            .json(&body)?
            .execute_raw()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // GoTrue rejects bad credentials with 400 or 401; only those map
            // to an absent session. Anything else, rate limits included,
            // propagates untranslated.
            if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
                return Ok(None);
            }
            let text = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), text));
        }

        let auth: AuthResponse = response.json().await?;

        let session = match (auth.access_token, auth.refresh_token, auth.user.as_ref()) {
            (Some(access), Some(refresh), Some(user)) => Session::new(
                access,
                refresh,
                user.id.clone(),
                auth.expires_in.unwrap_or(0),
            ),
            _ => return Ok(None),
        };

        {
            let mut state = self.state.lock().unwrap();
            state.session = Some(session.clone());
            state.user = auth.user;
        }

        info!(user_id = %session.user_id, "authenticated");
        Ok(Some(session))
    }

    /// Sign out the current user and clear the stored session
    ///
    /// A no-op when no session is held.
    pub async fn sign_out(&self) -> Result<(), Error> {
        let token = {
            let state = self.state.lock().unwrap();
            match state.session {
                Some(ref session) => session.access_token.clone(),
                None => return Ok(()),
            }
        };

        let url = self.auth_url("/logout");
        Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .header("X-Client-Info", crate::CLIENT_INFO)
            .bearer_auth(&token)
            .execute_no_content()
            .await?;

        let mut state = self.state.lock().unwrap();
        state.session = None;
        state.user = None;

        info!("signed out");
        Ok(())
    }

    /// Get the current session, if any
    pub fn current_session(&self) -> Option<Session> {
        let state = self.state.lock().unwrap();
        state.session.clone()
    }

    /// Get the current user, if any
    pub fn current_user(&self) -> Option<User> {
        let state = self.state.lock().unwrap();
        state.user.clone()
    }

    /// Whether a user is currently signed in
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.user.is_some()
    }

    /// The access token of the current session, for authenticated data calls
    pub(crate) fn access_token(&self) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.session.as_ref().map(|s| s.access_token.clone())
    }

    /// Replace the stored session and user, e.g. when restoring a persisted session
    pub fn set_session(&self, session: Session, user: User) {
        let mut state = self.state.lock().unwrap();
        state.session = Some(session);
        state.user = Some(user);
    }
}
