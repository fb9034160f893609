//! Wire types for the query endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body: `{ "query": <text> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Parsed success body.
///
/// The body schema is not validated. Whatever sits under `answer` is taken:
/// strings verbatim, other non-null values as their JSON text. A missing or
/// null `answer`, or a body that is not an object, yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub answer: Option<String>,
}

impl QueryResponse {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(body: &Value) -> Self {
        let answer = match body.get("answer") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self { answer }
    }

    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let body: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_json(&body))
    }

    pub fn text(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}
