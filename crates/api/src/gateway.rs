//! Query gateway: named GraphQL operations over HTTP.
//!
//! Transport, retries, and the GraphQL response envelope live here. The
//! typed operation layer in [`crate::operations`] builds on
//! [`QueryGateway::execute`], which returns the raw `data` value for the
//! caller to pick apart.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};

/// Default Aave GraphQL API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.v3.aave.com/graphql";

/// Default number of retries for transport-level failures.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default base delay for retry backoff, in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Configuration for the query gateway.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL API URL.
    pub api_url: Url,
    /// Number of retries for transport failures and 5xx responses.
    /// GraphQL-level errors are never retried.
    pub max_retries: u32,
    /// Base delay for exponential retry backoff, in milliseconds.
    pub retry_base_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("Invalid default API URL"),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom API URL.
    pub fn with_api_url(mut self, url: Url) -> Self {
        self.api_url = url;
        self
    }

    /// Set the number of transport-level retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay for retry backoff.
    pub fn with_retry_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_base_delay_ms = delay_ms;
        self
    }
}

/// GraphQL request envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: serde_json::Value,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Executes named queries and mutations against the backend.
#[derive(Debug, Clone)]
pub struct QueryGateway {
    http_client: Client,
    config: ClientConfig,
}

impl Default for QueryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryGateway {
    /// Create a gateway with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a gateway with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    /// Returns the gateway configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a named operation and return the response `data` value.
    ///
    /// Transport failures and 5xx responses are retried with exponential
    /// backoff up to the configured budget; GraphQL errors in a well-formed
    /// response are terminal.
    pub async fn execute(
        &self,
        operation_name: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.retry_base_delay_ms << (attempt - 1);
                debug!(operation_name, attempt, delay_ms = delay, "retrying query");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.execute_once(operation_name, query, &variables).await {
                Ok(data) => return Ok(data),
                Err(e) if is_retryable(&e) => {
                    warn!(operation_name, attempt, error = %e, "transient query failure");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::Parse("retry budget exhausted".to_string())))
    }

    async fn execute_once(
        &self,
        operation_name: &str,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request_body = GraphQlRequest {
            operation_name,
            query,
            variables: variables.clone(),
        };

        let response = self
            .http_client
            .post(self.config.api_url.as_str())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ApiError::Server(status.as_u16()));
        }

        let response_body: GraphQlResponse = response.json().await?;

        if let Some(errors) = response_body.errors {
            if !errors.is_empty() {
                return Err(ApiError::GraphQL(
                    errors
                        .iter()
                        .map(|e| e.message.clone())
                        .collect::<Vec<_>>()
                        .join("; "),
                ));
            }
        }

        response_body
            .data
            .ok_or_else(|| ApiError::Parse("No data in response".to_string()))
    }
}

/// Whether a failure is worth retrying at the transport level.
fn is_retryable(error: &ApiError) -> bool {
    match error {
        ApiError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        ApiError::Server(_) => true,
        _ => false,
    }
}
