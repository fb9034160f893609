//! Form state and its transitions.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, QueryResponse};

/// Which of the mutually exclusive displays the form is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl RenderState {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Everything the form remembers. Lives as long as the form does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub query: String,
    pub response: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn render_state(&self) -> RenderState {
        if self.loading {
            RenderState::Loading
        } else if self.error.is_some() {
            RenderState::Error
        } else if self.response.is_some() {
            RenderState::Success
        } else {
            RenderState::Idle
        }
    }

    /// Enter loading; the previous outcome is cleared.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.response = None;
    }

    /// Apply a call's outcome. `loading` is cleared on every path.
    pub fn settle(&mut self, outcome: Result<QueryResponse, ClientError>) {
        match outcome {
            Ok(response) => {
                self.response = response.answer;
                self.error = None;
            }
            Err(err) => {
                self.response = None;
                self.error = Some(err.display_message());
            }
        }
        self.loading = false;
    }

    /// Leave loading without an outcome, for a call dropped before it settled.
    pub fn abandon(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_success() {
        let mut state = FormState::with_query("meaning of life");
        assert_eq!(state.render_state(), RenderState::Idle);

        state.begin();
        assert_eq!(state.render_state(), RenderState::Loading);

        state.settle(Ok(QueryResponse::new("42")));
        assert_eq!(state.render_state(), RenderState::Success);
        assert_eq!(state.response.as_deref(), Some("42"));
        assert!(state.error.is_none());
        assert!(!state.loading);
        assert_eq!(state.query, "meaning of life");
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state = FormState::new();
        state.begin();
        state.settle(Err(ClientError::Status { status: 502 }));
        assert_eq!(state.error.as_deref(), Some("Failed to fetch response"));

        state.begin();
        assert!(state.error.is_none());
        assert!(state.response.is_none());
        assert!(state.loading);

        state.settle(Ok(QueryResponse::new("ok")));
        state.begin();
        assert!(state.response.is_none());
    }

    #[test]
    fn test_error_replaces_response() {
        let mut state = FormState::new();
        state.begin();
        state.settle(Ok(QueryResponse::new("first")));
        state.begin();
        state.settle(Err(ClientError::Unexpected));

        assert!(state.response.is_none());
        assert_eq!(state.error.as_deref(), Some("An unexpected error occurred."));
        assert_eq!(state.render_state(), RenderState::Error);
        assert!(state.render_state().is_settled());
    }

    #[test]
    fn test_missing_answer_settles_idle() {
        let mut state = FormState::new();
        state.begin();
        state.settle(Ok(QueryResponse::empty()));
        assert!(!state.loading);
        assert_eq!(state.render_state(), RenderState::Idle);
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        let mut state = FormState::with_query("q");
        state.begin();
        state.abandon();
        assert!(!state.loading);
        assert_eq!(state.render_state(), RenderState::Idle);
        assert_eq!(state.query, "q");
    }
}
