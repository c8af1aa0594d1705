//! HTTP transports
//!
//! One request per call, no retry, no pooling beyond what `reqwest` does on
//! its own. Any non-2xx status is reported as
//! [`QueryError::Transport`] without reading the body.

use crate::error::ClientError;
use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use salon_core::environment::{QuerySpec, RestClient};
use salon_core::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

/// Connection settings shared by both transports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin every request is sent to
    pub base_url: String,
    /// Path of the query endpoint
    pub graphql_path: String,
    /// Per-request timeout; `None` waits forever
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            graphql_path: "/graphql".to_string(),
            request_timeout: None,
        }
    }
}

/// Transport for the query endpoint
pub trait QueryTransport: Send + Sync {
    /// POST `query` with `variables` and resolve with the parsed response body
    fn perform_fetch(
        &self,
        query: &'static QuerySpec,
        variables: Value,
    ) -> BoxFuture<'static, Result<Value, QueryError>>;
}

/// `reqwest`-backed transport for both the query endpoint and REST reads
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    graphql_path: String,
}

impl HttpTransport {
    /// Build a transport from connection settings
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL does not parse,
    /// or [`ClientError::Build`] if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            graphql_path: config.graphql_path.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, QueryError> {
        self.base_url
            .join(path)
            .map_err(|e| QueryError::Network(format!("invalid request path '{path}': {e}")))
    }

    /// POST a query to the query endpoint
    ///
    /// Sends `{"query": <text>, "variables": <variables>}` as JSON.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Transport`] for a non-2xx status
    /// - [`QueryError::Network`] if the request could not be completed
    /// - [`QueryError::Decode`] if the body is not JSON
    pub async fn fetch_graphql(&self, query: &QuerySpec, variables: &Value) -> Result<Value, QueryError> {
        let url = self.endpoint(&self.graphql_path)?;
        tracing::debug!(query = query.name, %url, "POST query");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({
                "query": query.text,
                "variables": variables,
            }))
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// GET a JSON document from `path`
    ///
    /// # Errors
    ///
    /// Same classification as [`HttpTransport::fetch_graphql`].
    pub async fn fetch_json(&self, path: &str) -> Result<Value, QueryError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        read_json(response).await
    }
}

async fn read_json(response: Response) -> Result<Value, QueryError> {
    let status = response.status();
    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "Request rejected");
        return Err(QueryError::Transport {
            status: status.as_u16(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| QueryError::Decode(e.to_string()))
}

impl QueryTransport for HttpTransport {
    fn perform_fetch(
        &self,
        query: &'static QuerySpec,
        variables: Value,
    ) -> BoxFuture<'static, Result<Value, QueryError>> {
        let transport = self.clone();
        Box::pin(async move { transport.fetch_graphql(query, &variables).await })
    }
}

impl RestClient for HttpTransport {
    fn get_json(&self, path: String) -> BoxFuture<'static, Result<Value, QueryError>> {
        let transport = self.clone();
        Box::pin(async move { transport.fetch_json(&path).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };

        let result = HttpTransport::new(&config);
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn endpoint_replaces_base_path() -> Result<(), ClientError> {
        let transport = HttpTransport::new(&ClientConfig {
            base_url: "http://salon.test/app/".to_string(),
            ..ClientConfig::default()
        })?;

        let url = transport.endpoint("/graphql");
        assert_eq!(url.map(String::from), Ok("http://salon.test/graphql".to_string()));
        Ok(())
    }
}
