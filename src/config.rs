//! Configuration for the homeboard client

use std::env;

use crate::error::Error;

/// Environment variable holding the Supabase project URL
pub const ENV_URL: &str = "SUPABASE_URL";

/// Environment variable holding the Supabase anonymous API key
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Connection settings for the Supabase project backing the household data
#[derive(Debug, Clone)]
pub struct Config {
    /// The base URL for the Supabase project
    pub url: String,

    /// The anonymous API key for the Supabase project
    pub anon_key: String,
}

impl Config {
    /// Create a config from explicit values
    ///
    /// Fails fast when either value is blank, so a misconfigured deployment
    /// stops at startup instead of on the first remote call.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, Error> {
        let url = url.trim();
        let anon_key = anon_key.trim();

        if url.is_empty() {
            return Err(Error::config("Supabase URL is not configured"));
        }
        if anon_key.is_empty() {
            return Err(Error::config("Supabase anon key is not configured"));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Load the config from `SUPABASE_URL` and `SUPABASE_ANON_KEY`
    pub fn from_env() -> Result<Self, Error> {
        let url = env::var(ENV_URL)
            .map_err(|_| Error::config(format!("{} is not set", ENV_URL)))?;
        let key = env::var(ENV_ANON_KEY)
            .map_err(|_| Error::config(format!("{} is not set", ENV_ANON_KEY)))?;
        Self::new(&url, &key)
    }
}
