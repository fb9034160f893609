//! # ai-query
//!
//! A query form for an HTTP answer service: type a question, send it as
//! `POST { "query": … }`, and show the `answer` that comes back, or an error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), ai_query::Error> {
//!     let view = ai_query::ask("meaning of life").await?;
//!     print!("{}", view);
//!     Ok(())
//! }
//! ```
//!
//! ## Driving the form yourself
//!
//! ```rust,no_run
//! use ai_query::{FormConfig, QueryClient, QueryForm};
//!
//! # async fn example() -> Result<(), ai_query::Error> {
//! let client = QueryClient::from_config(&FormConfig::default())?;
//! let form = QueryForm::new(client);
//! let mut changes = form.subscribe();
//!
//! form.set_query("what changed in the last deployment?");
//! form.submit().await;
//!
//! changes.changed().await.ok();
//! println!("{:?}", form.view().response_panel);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod config;
pub mod form;
pub mod observability;
pub mod proxy;
#[cfg(feature = "tui")]
pub mod tui;

pub use client::{
    ClientError, QueryBackend, QueryClient, QueryClientBuilder, QueryRequest, QueryResponse,
};
pub use config::{ConfigBuilder, ConfigError, DEFAULT_ENDPOINT, FormConfig};
pub use form::{FormState, FormView, QueryForm, RenderState, Submission, render};
pub use observability::{LogConfig, LogTarget, SubmitSpan, init_tracing};
pub use proxy::ProxyRule;

/// Error type for ai-query operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The query endpoint could not be reached or answered badly.
    #[error("Query failed: {0}")]
    Client(#[from] ClientError),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The global tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Url(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One-shot submission using environment configuration.
///
/// Endpoint failures do not make this return `Err`; they show up in the
/// returned view's error line, as they would on screen.
pub async fn ask(query: &str) -> Result<FormView> {
    let config = ConfigBuilder::new().env().load().await?;
    ask_with_config(&config, query).await
}

/// One-shot submission against an explicit configuration.
pub async fn ask_with_config(config: &FormConfig, query: &str) -> Result<FormView> {
    let form = QueryForm::new(QueryClient::from_config(config)?);
    form.submit_query(query).await;
    Ok(form.view())
}
