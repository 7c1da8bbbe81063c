//! Query builders for PostgrestClient

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

/// Base query builder
///
/// Filter pairs keep their insertion order and the same column may appear
/// more than once (a gte/lte pair expresses an inclusive range). Order keys
/// accumulate into a single comma-separated `order` parameter, which is how
/// PostgREST expresses a multi-key sort.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
    order: Vec<String>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw parameter to the query
    pub fn add_param(&mut self, key: &str, value: &str) {
        self.params.push((key.to_string(), value.to_string()));
    }

    /// Append a filter on a column, e.g. `eq.42`
    pub fn add_filter(&mut self, column: &str, operator: &str, value: &str) {
        self.add_param(column, &format!("{}.{}", operator, value));
    }

    /// Append an order key
    pub fn add_order(&mut self, column: &str, ascending: bool) {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{}.{}", column, direction));
    }

    /// The assembled query pairs, with the order keys joined into one parameter
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.params.clone();
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        pairs
    }
}

fn base_request<'a>(
    fetch: FetchBuilder<'a>,
    key: &str,
    bearer: &Option<String>,
) -> FetchBuilder<'a> {
    let fetch = fetch
        .header("apikey", key)
        .header("X-Client-Info", crate::CLIENT_INFO);
    match bearer {
        Some(token) => fetch.bearer_auth(token),
        None => fetch,
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    key: String,
    bearer: Option<String>,
    client: Client,
    query: QueryBuilder,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(
        url: String,
        key: String,
        bearer: Option<String>,
        columns: &str,
        client: Client,
    ) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            key,
            bearer,
            client,
            query,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.add_filter(column, "eq", &value.to_string());
        self
    }

    /// Filter rows where column is greater than or equal to a value
    pub fn gte<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.add_filter(column, "gte", &value.to_string());
        self
    }

    /// Filter rows where column is less than or equal to a value
    pub fn lte<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.add_filter(column, "lte", &value.to_string());
        self
    }

    /// Order the results by a column; repeated calls add further sort keys
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.query.add_order(column, ascending);
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: i32) -> Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Execute the query and return the matching rows
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        debug!(url = %self.url, "select");
        let fetch = Fetch::get(&self.client, &self.url);
        let fetch = base_request(fetch, &self.key, &self.bearer)
            .query(&self.query.pairs());
        fetch.execute::<Vec<T>>().await
    }

    /// Execute the query and return the first row, or `None` when nothing matches
    pub async fn execute_one<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        let results = self.limit(1).execute::<T>().await?;
        Ok(results.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    url: String,
    key: String,
    bearer: Option<String>,
    values: T,
    client: Client,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(url: String, key: String, bearer: Option<String>, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            bearer,
            values,
            client,
        }
    }

    /// Execute the insert and return the stored rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        debug!(url = %self.url, "insert");
        let fetch = Fetch::post(&self.client, &self.url);
        let fetch = base_request(fetch, &self.key, &self.bearer)
            .header("Prefer", "return=representation")
            .json(&self.values)?;
        fetch.execute::<Vec<R>>().await
    }

    /// Execute the insert and return the single stored row
    pub async fn execute_one<R: DeserializeOwned>(&self) -> Result<R, Error> {
        let rows = self.execute::<R>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::api(200, "insert returned no rows"))
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    url: String,
    key: String,
    bearer: Option<String>,
    values: T,
    client: Client,
    query: QueryBuilder,
}

impl<T: Serialize> UpdateBuilder<T> {
    /// Create a new UpdateBuilder
    pub fn new(url: String, key: String, bearer: Option<String>, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            bearer,
            values,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query.add_filter(column, "eq", &value.to_string());
        self
    }

    /// Execute the update and return the stored rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        debug!(url = %self.url, "update");
        let fetch = Fetch::patch(&self.client, &self.url);
        let fetch = base_request(fetch, &self.key, &self.bearer)
            .header("Prefer", "return=representation")
            .query(&self.query.pairs())
            .json(&self.values)?;
        fetch.execute::<Vec<R>>().await
    }

    /// Execute the update and return the single stored row
    pub async fn execute_one<R: DeserializeOwned>(&self) -> Result<R, Error> {
        let rows = self.execute::<R>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::api(200, "update matched no rows"))
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    url: String,
    key: String,
    bearer: Option<String>,
    client: Client,
    query: QueryBuilder,
}

impl DeleteBuilder {
    /// Create a new DeleteBuilder
    pub fn new(url: String, key: String, bearer: Option<String>, client: Client) -> Self {
        Self {
            url,
            key,
            bearer,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query.add_filter(column, "eq", &value.to_string());
        self
    }

    /// Execute the delete without returning the removed rows
    pub async fn execute(&self) -> Result<(), Error> {
        debug!(url = %self.url, "delete");
        let fetch = Fetch::delete(&self.client, &self.url);
        let fetch = base_request(fetch, &self.key, &self.bearer)
            .header("Prefer", "return=minimal")
            .query(&self.query.pairs());
        fetch.execute_no_content().await
    }
}
