//! Submit control; disabled while a query is in flight

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::form::FormView;
use crate::tui::spinner::Spinner;

#[derive(Default)]
pub struct SubmitButton {
    spinner: Spinner,
}

impl SubmitButton {
    /// Create a new submit button
    pub fn new() -> Self {
        Self::default()
    }
}

impl super::Component for SubmitButton {
    fn render(&mut self, f: &mut Frame, area: Rect, view: &FormView) {
        let line = if view.button_disabled {
            Line::from(vec![
                Span::styled(
                    format!("{} ", self.spinner.tick()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("[ {} ]", view.button_label),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                ),
            ])
        } else {
            self.spinner.reset();
            Line::from(Span::styled(
                format!("[ {} ]", view.button_label),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
