//! Backend trait definition.

use std::fmt::Debug;

use async_trait::async_trait;

use super::error::ClientError;
use super::messages::QueryResponse;

/// Something that can answer a query.
///
/// `QueryClient` is the HTTP implementation; the form only depends on this
/// trait so any transport can drive it.
#[async_trait]
pub trait QueryBackend: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    async fn ask(&self, query: &str) -> Result<QueryResponse, ClientError>;
}
