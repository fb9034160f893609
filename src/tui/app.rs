//! Application state and event loop

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    watch,
};

use super::action::Action;
use super::components::{Component, QueryInput, ResponsePanel, SubmitButton};
use super::terminal::{Event, Tui};
use crate::Result;
use crate::form::{FormState, FormView, QueryForm};

const HELP: &str = "Enter: ask  |  Ctrl+D: clear  |  Esc: quit";

/// The widgets of the form screen, drawn from a [`FormView`].
#[derive(Default)]
pub struct FormScreen {
    pub query_input: QueryInput,
    submit_button: SubmitButton,
    response_panel: ResponsePanel,
}

impl FormScreen {
    pub fn new(query: &str) -> Self {
        Self {
            query_input: QueryInput::with_text(query),
            ..Self::default()
        }
    }

    /// Global keys first, then the input.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            _ => self.query_input.handle_key(key),
        }
    }

    pub fn draw(&mut self, f: &mut Frame, view: &FormView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Input
                Constraint::Length(1), // Button
                Constraint::Min(0),    // Response + error line
                Constraint::Length(1), // Help
            ])
            .split(f.area());

        let title = Paragraph::new(view.title)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(title, chunks[0]);

        self.query_input.render(f, chunks[1], view);
        self.submit_button.render(f, chunks[2], view);
        self.response_panel.render(f, chunks[3], view);

        let help = Paragraph::new(HELP)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, chunks[4]);
    }
}

enum Wake {
    Terminal(Option<Event>),
    FormChanged,
}

/// Main application state
pub struct App {
    should_quit: bool,
    form: QueryForm,
    changes: watch::Receiver<FormState>,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    screen: FormScreen,
}

impl App {
    pub fn new(form: QueryForm) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let changes = form.subscribe();
        let screen = FormScreen::new(&form.state().query);

        Self {
            should_quit: false,
            form,
            changes,
            action_tx,
            action_rx,
            screen,
        }
    }

    pub fn form(&self) -> &QueryForm {
        &self.form
    }

    /// Run until the user quits or the terminal closes.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        tui.enter()?;
        self.render(tui)?;

        while !self.should_quit {
            let wake = tokio::select! {
                event = tui.next() => Wake::Terminal(event),
                _ = self.changes.changed() => Wake::FormChanged,
            };

            match wake {
                Wake::Terminal(Some(event)) => self.handle_event(event),
                Wake::Terminal(None) => break,
                Wake::FormChanged => {
                    self.changes.borrow_and_update();
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.update(action);
                if self.should_quit {
                    break;
                }
            }

            self.render(tui)?;
        }

        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let view = self.form.view();
        let screen = &mut self.screen;
        tui.terminal.draw(|f| screen.draw(f, &view))?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Crossterm(crossterm::event::Event::Key(key)) => {
                if let Some(action) = self.screen.handle_key(key) {
                    let _ = self.action_tx.send(action);
                }
            }
            Event::Crossterm(_) | Event::Tick | Event::Resize(..) => {}
        }
    }

    /// Apply one action to the form.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::QueryChanged(query) => self.form.set_query(query),
            Action::Submit => {
                // The control is disabled while loading
                if self.form.view().button_disabled {
                    tracing::debug!("Submit ignored while a query is in flight");
                    return;
                }
                tokio::spawn(self.form.start().run());
            }
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
