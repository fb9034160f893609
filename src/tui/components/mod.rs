//! Widgets making up the form screen

use ratatui::{Frame, layout::Rect};

use crate::form::FormView;

pub mod query_input;
pub mod response_panel;
pub mod submit_button;

pub use query_input::QueryInput;
pub use response_panel::ResponsePanel;
pub use submit_button::SubmitButton;

/// A widget drawn from the current [`FormView`].
pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect, view: &FormView);
}
