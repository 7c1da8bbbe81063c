//! homeboard
//!
//! A household-management client backed entirely by Supabase: groups,
//! shopping lists, recipes, meal plans and todos. Every data operation is a
//! single PostgREST call; authentication goes through GoTrue. There is no
//! local cache, no retry logic and no custom server.

pub mod auth;
pub mod auth_state;
pub mod config;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod models;
pub mod postgrest;
pub mod theme;

use reqwest::Client as HttpClient;
use url::Url;

use crate::auth::AuthClient;
use crate::config::Config;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::postgrest::PostgrestClient;

/// Value of the `X-Client-Info` header sent with every request
pub(crate) const CLIENT_INFO: &str = concat!("homeboard/", env!("CARGO_PKG_VERSION"));

/// Connection to a Supabase project
///
/// Holds the single long-lived HTTP client and the auth state; constructed
/// once at startup and handed to [`gateway::HouseholdGateway`].
pub struct Client {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    http_client: HttpClient,

    /// Auth client for user management and authentication
    auth: AuthClient,
}

impl Client {
    /// Create a new client from a validated config
    pub fn new(config: &Config) -> Result<Self, Error> {
        // Catch a malformed endpoint at startup, not on the first call.
        Url::parse(&config.url)?;

        let http_client = HttpClient::new();
        let auth = AuthClient::new(&config.url, &config.anon_key, http_client.clone());

        Ok(Self {
            url: config.url.clone(),
            key: config.anon_key.clone(),
            http_client,
            auth,
        })
    }

    /// One-time initialization, awaited before any other use
    ///
    /// Fetches the GoTrue settings document to verify that the endpoint and
    /// key actually point at a reachable project.
    pub async fn initialize(&self) -> Result<(), Error> {
        let url = format!("{}/auth/v1/settings", self.url);
        Fetch::get(&self.http_client, &url)
            .header("apikey", &self.key)
            .execute_no_content()
            .await
    }

    /// The auth client for user management and authentication
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// A PostgREST client for a table, carrying the current session's token
    pub fn from(&self, table: &str) -> PostgrestClient {
        PostgrestClient::new(
            &self.url,
            &self.key,
            table,
            self.auth.access_token(),
            self.http_client.clone(),
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth_state::{AuthState, AuthStateProvider, Principal};
    pub use crate::config::Config;
    pub use crate::error::Error;
    pub use crate::gateway::HouseholdGateway;
    pub use crate::Client;
}
