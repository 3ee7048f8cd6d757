//! Thin asynchronous client for the UEX API v2.
//!
//! - Fetches the raw commodity, refinery method and refinery yield lists.
//! - Accepts both bare arrays and `{ "data": [...] }` envelopes.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::infra::config::SourceConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum UexClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected payload: expected an array, got {0}")]
    UnexpectedShape(&'static str),
}

/// The three list endpoints the tracker reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Commodities,
    RefineryMethods,
    RefineryYields,
}

impl Resource {
    #[cfg(test)]
    pub const ALL: [Resource; 3] = [
        Resource::Commodities,
        Resource::RefineryMethods,
        Resource::RefineryYields,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Commodities => "commodities/",
            Self::RefineryMethods => "refineries_methods/",
            Self::RefineryYields => "refineries_yields/",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_end_matches('/'))
    }
}

/// Source of raw economy lists. Implemented by [`UexClient`]; tests swap in
/// an in-memory fake.
#[async_trait]
pub trait EconomySource: Send + Sync + 'static {
    async fn fetch_list(&self, resource: Resource) -> Result<Vec<Value>, UexClientError>;
}

#[derive(Clone)]
pub struct UexClient {
    http: Client,
    base_url: Url,
}

impl UexClient {
    pub fn from_config(config: &SourceConfig) -> Result<Self, UexClientError> {
        let base_url = Url::parse(&config.base_url)?;
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn url(&self, resource: Resource) -> Result<Url, url::ParseError> {
        self.base_url.join(resource.path())
    }
}

#[async_trait]
impl EconomySource for UexClient {
    async fn fetch_list(&self, resource: Resource) -> Result<Vec<Value>, UexClientError> {
        let url = self.url(resource)?;
        debug!(%url, "requesting UEX list");
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;
        let items = unwrap_list(body)?;
        debug!(%resource, count = items.len(), "UEX list received");
        Ok(items)
    }
}

/// Takes the array out of a bare or enveloped response body.
pub fn unwrap_list(body: Value) -> Result<Vec<Value>, UexClientError> {
    let payload = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(map),
        },
        other => other,
    };

    match payload {
        Value::Array(items) => Ok(items),
        other => Err(UexClientError::UnexpectedShape(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
