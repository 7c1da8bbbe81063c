//! Database operations through the PostgREST API

mod query;

use reqwest::Client;
use serde::Serialize;

pub use query::*;

/// Client for database operations on a single table
pub struct PostgrestClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// The table or view name
    table: String,

    /// Bearer token of the signed-in user, when a session exists
    bearer: Option<String>,

    /// HTTP client
    client: Client,
}

impl PostgrestClient {
    /// Create a new PostgrestClient
    pub(crate) fn new(
        url: &str,
        key: &str,
        table: &str,
        bearer: Option<String>,
        client: Client,
    ) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            table: table.to_string(),
            bearer,
            client,
        }
    }

    /// Get the base URL for REST API requests
    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.bearer.clone(),
            columns,
            self.client.clone(),
        )
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.bearer.clone(),
            values,
            self.client.clone(),
        )
    }

    /// Update data in the table
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.bearer.clone(),
            values,
            self.client.clone(),
        )
    }

    /// Delete data from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.bearer.clone(),
            self.client.clone(),
        )
    }
}
