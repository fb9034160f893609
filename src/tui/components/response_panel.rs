//! Response panel and error line

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::form::FormView;
use crate::form::view::RESPONSE_HEADING;

/// Shows the answer when there is one, and the error line below it.
#[derive(Default)]
pub struct ResponsePanel;

impl ResponsePanel {
    /// Create a new response panel
    pub fn new() -> Self {
        Self
    }
}

impl super::Component for ResponsePanel {
    fn render(&mut self, f: &mut Frame, area: Rect, view: &FormView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        if let Some(response) = &view.response_panel {
            let block = Block::default()
                .title(format!(" {} ", RESPONSE_HEADING))
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray));
            let lines: Vec<Line> = response.lines().map(Line::from).collect();
            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, chunks[0]);
        }

        if let Some(error) = &view.error_line {
            let paragraph =
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
            f.render_widget(paragraph, chunks[1]);
        }
    }
}
