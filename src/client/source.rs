//! Record sources: where a List Store gets its records from

use crate::client::api::ApiClient;
use crate::core::error::FetchError;
use crate::core::record::Record;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// Source trait for loading and mutating the records of one screen
///
/// The list engine only needs a full load; mutations exist so a screen can
/// refetch once they succeed.
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    /// Load every record, in backend order
    async fn load(&self) -> Result<Vec<R>, FetchError>;

    /// Delete a record by identifier
    async fn delete(&self, id: i64) -> Result<(), FetchError>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Records served by the REST backend
///
/// `GET {path}` loads the list, or `POST {path}` when a filter body is set.
/// Deletes go to `DELETE {path}/{id}`.
#[derive(Debug, Clone)]
pub struct RestSource {
    client: ApiClient,
    path: String,
    body: Option<Value>,
}

impl RestSource {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            body: None,
        }
    }

    /// Load through `POST` with `body` as the filter
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for RestSource {
    async fn load(&self) -> Result<Vec<R>, FetchError> {
        match &self.body {
            Some(body) => self.client.post_list(&self.path, body).await,
            None => self.client.get_list(&self.path).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<(), FetchError> {
        let path = format!("{}/{}", self.path.trim_end_matches('/'), id);
        self.client.delete(&path).await
    }

    fn describe(&self) -> String {
        self.client.url(&self.path)
    }
}

/// In-memory record source for testing and development
#[derive(Clone)]
pub struct InMemorySource<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R: Record> InMemorySource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Replace the records the next load returns
    pub fn set(&self, records: Vec<R>) {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for InMemorySource<R> {
    async fn load(&self) -> Result<Vec<R>, FetchError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn delete(&self, id: i64) -> Result<(), FetchError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let before = records.len();
        records.retain(|record| record.record_id() != id);
        if records.len() == before {
            return Err(FetchError::from_status(404, Some(format!("Record {} not found", id))));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
