//! Pure mapping from [`FormState`] to what gets displayed.

use std::fmt;

use serde::Serialize;

use super::state::{FormState, RenderState};

pub const TITLE: &str = "AI Query Interface";
pub const PLACEHOLDER: &str =
    "Ask something about deployments, external reports, or sentiment analysis...";
pub const SUBMIT_LABEL: &str = "Ask AI";
pub const LOADING_LABEL: &str = "Querying...";
pub const RESPONSE_HEADING: &str = "Response:";

/// Display output for one frame of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub input: String,
    pub placeholder: &'static str,
    pub button_label: &'static str,
    pub button_disabled: bool,
    /// Present only for a non-empty response.
    pub response_panel: Option<String>,
    /// `Error: <message>`, present only for a non-empty error.
    pub error_line: Option<String>,
    pub state: RenderState,
}

/// Render `state`. No side effects.
pub fn render(state: &FormState) -> FormView {
    FormView {
        title: TITLE,
        input: state.query.clone(),
        placeholder: PLACEHOLDER,
        button_label: if state.loading {
            LOADING_LABEL
        } else {
            SUBMIT_LABEL
        },
        button_disabled: state.loading,
        response_panel: state.response.clone().filter(|r| !r.is_empty()),
        error_line: state
            .error
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(|e| format!("Error: {}", e)),
        state: state.render_state(),
    }
}

impl From<&FormState> for FormView {
    fn from(state: &FormState) -> Self {
        render(state)
    }
}

impl FormView {
    pub fn shows_response(&self) -> bool {
        self.response_panel.is_some()
    }

    pub fn shows_error(&self) -> bool {
        self.error_line.is_some()
    }
}

/// Plain-text rendering, used by the one-shot `ask` command.
impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.input.is_empty() {
            writeln!(f, "> {}", self.placeholder)?;
        } else {
            writeln!(f, "> {}", self.input)?;
        }
        let button = if self.button_disabled {
            format!("[{}] (disabled)", self.button_label)
        } else {
            format!("[{}]", self.button_label)
        };
        writeln!(f, "{}", button)?;
        if let Some(response) = &self.response_panel {
            writeln!(f, "{}", RESPONSE_HEADING)?;
            writeln!(f, "{}", response)?;
        }
        if let Some(error) = &self.error_line {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}
