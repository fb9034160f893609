//! Terminal setup, teardown, and the event stream.

use std::io::{self, Stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event as CrosstermEvent, EventStream},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver},
    task::JoinHandle,
    time::{self, Duration},
};
use tokio_util::sync::CancellationToken;

use crate::Result;

/// Ticks per second; drives the spinner.
const TICK_RATE: f64 = 8.0;

/// Event types from the terminal
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard, mouse, paste, or focus event from crossterm
    Crossterm(CrosstermEvent),
    /// Periodic tick for animations
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
}

/// Terminal plus a background task that forwards its events.
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
}

impl Tui {
    /// Create the terminal and start reading events
    pub fn new() -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();

        let task = {
            let cancellation_token = cancellation_token.clone();
            let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE);

            tokio::spawn(async move {
                let mut reader = EventStream::new();
                let mut tick_interval = time::interval(tick_duration);

                loop {
                    tokio::select! {
                        biased;

                        _ = cancellation_token.cancelled() => break,
                        maybe_event = reader.next() => match maybe_event {
                            Some(Ok(CrosstermEvent::Resize(w, h))) => {
                                let _ = event_tx.send(Event::Resize(w, h));
                            }
                            Some(Ok(evt)) => {
                                let _ = event_tx.send(Event::Crossterm(evt));
                            }
                            Some(Err(e)) => {
                                tracing::warn!(error = %e, "Terminal event read failed");
                            }
                            None => break,
                        },
                        _ = tick_interval.tick() => {
                            let _ = event_tx.send(Event::Tick);
                        }
                    }
                }
            })
        };

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(Self {
            terminal,
            task,
            cancellation_token,
            event_rx,
        })
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Leave the alternate screen and disable raw mode
    pub fn exit(&mut self) -> Result<()> {
        self.terminal.show_cursor()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }

    /// Stop the event task
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Next event, or `None` once the event task has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.cancel();
        let _ = self.exit();
        self.task.abort();
    }
}
