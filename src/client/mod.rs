//! HTTP client for the query endpoint.

pub mod backend;
pub mod error;
pub mod messages;

pub use backend::QueryBackend;
pub use error::{ClientError, STATUS_FAILURE_MESSAGE, UNEXPECTED_FAILURE_MESSAGE};
pub use messages::{QueryRequest, QueryResponse};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::config::{DEFAULT_ENDPOINT, FormConfig};
use crate::{Error, Result};

/// Client that POSTs queries to a fixed endpoint.
///
/// One request per call: no retries, and no timeout unless one is set on the
/// builder.
#[derive(Clone, Debug)]
pub struct QueryClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl QueryClient {
    /// Create a client for `endpoint` with default settings
    pub fn new(endpoint: Url) -> Result<Self> {
        Self::builder().endpoint(endpoint).build()
    }

    /// Create a client for the endpoint resolved from `config`
    pub fn from_config(config: &FormConfig) -> Result<Self> {
        Self::builder().endpoint(config.resolved_endpoint()?).build()
    }

    /// Create a builder
    pub fn builder() -> QueryClientBuilder {
        QueryClientBuilder::default()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `{ "query": … }` and extract the answer.
    pub async fn send(
        &self,
        request: &QueryRequest,
    ) -> std::result::Result<QueryResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                "Query endpoint returned failure status"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(QueryResponse::from_slice(&bytes)?)
    }
}

#[async_trait]
impl QueryBackend for QueryClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn ask(&self, query: &str) -> std::result::Result<QueryResponse, ClientError> {
        self.send(&QueryRequest::new(query)).await
    }
}

/// Builder for [`QueryClient`].
#[derive(Default)]
pub struct QueryClientBuilder {
    endpoint: Option<Url>,
    timeout: Option<Duration>,
}

impl QueryClientBuilder {
    /// Endpoint URL. Defaults to [`DEFAULT_ENDPOINT`].
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Request timeout. Unset by default: a call may stay pending indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<QueryClient> {
        let endpoint = match self.endpoint {
            Some(url) => url,
            None => Url::parse(DEFAULT_ENDPOINT)?,
        };

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("ai-query/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Client(ClientError::Http(e)))?;

        Ok(QueryClient { endpoint, http })
    }
}
