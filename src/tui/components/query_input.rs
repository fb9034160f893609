//! Single-line query input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::form::FormView;
use crate::tui::action::Action;

pub struct QueryInput {
    textarea: TextArea<'static>,
}

impl QueryInput {
    /// Create an empty input
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create an input pre-filled with `text`
    pub fn with_text(text: &str) -> Self {
        let mut textarea = TextArea::new(vec![text.to_string()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(tui_textarea::CursorMove::End);
        Self { textarea }
    }

    /// Current text
    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    /// Map a key to an action. Editing keys go to the text area and report
    /// the new text; Enter submits without touching the text.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => Some(Action::Submit),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.clear();
                Some(Action::QueryChanged(String::new()))
            }
            // Single line: no newlines from Ctrl+M / Ctrl+J either
            (KeyCode::Char('m' | 'j'), KeyModifiers::CONTROL) => Some(Action::Noop),
            _ => {
                if self.textarea.input(key) {
                    Some(Action::QueryChanged(self.text()))
                } else {
                    Some(Action::Noop)
                }
            }
        }
    }
}

impl super::Component for QueryInput {
    fn render(&mut self, f: &mut Frame, area: Rect, view: &FormView) {
        let title = if view.button_disabled {
            " Query (waiting for answer) "
        } else {
            " Query (Enter to ask | Ctrl+D to clear) "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            );

        self.textarea.set_block(block);
        self.textarea.set_placeholder_text(view.placeholder);
        self.textarea
            .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));

        f.render_widget(&self.textarea, area);
    }
}

impl Default for QueryInput {
    fn default() -> Self {
        Self::new()
    }
}
