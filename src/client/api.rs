//! REST client for the backend that feeds list screens

use crate::config::ApiConfig;
use crate::core::error::FetchError;
use anyhow::{Context, Result};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// List bodies come either bare or wrapped in `{ "data": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListPayload<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            ListPayload::Bare(records) => records,
            ListPayload::Wrapped { data } => data,
        }
    }
}

/// HTTP client bound to one backend base URL
///
/// The session cookie, if configured, is sent with every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie).context("invalid session cookie")?;
            headers.insert(COOKIE, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build().context("failed to build HTTP client")?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a list of records
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        Self::decode_list(response).await
    }

    /// POST a filter body and read back a list of records
    pub async fn post_list<T, B>(&self, path: &str, body: &B) -> Result<Vec<T>, FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Self::decode_list(response).await
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let response = request.send().await.map_err(Self::transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<Value>(&body).ok())
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string));

        tracing::warn!(status = status.as_u16(), ?message, "backend returned an error");
        Err(FetchError::from_status(status.as_u16(), message))
    }

    async fn decode_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, FetchError> {
        let body = response.bytes().await.map_err(Self::transport_error)?;
        serde_json::from_slice::<ListPayload<T>>(&body)
            .map(ListPayload::into_records)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn transport_error(err: reqwest::Error) -> FetchError {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network {
                reason: err.to_string(),
            }
        }
    }
}
