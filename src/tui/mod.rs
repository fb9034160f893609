//! Interactive terminal front-end for [`QueryForm`].

pub mod action;
pub mod app;
pub mod components;
pub mod spinner;
pub mod terminal;

pub use action::Action;
pub use app::{App, FormScreen};
pub use terminal::{Event, Tui};

use crate::Result;
use crate::form::QueryForm;

/// Take over the terminal and run the form until the user quits.
pub async fn run(form: QueryForm) -> Result<()> {
    let mut tui = Tui::new()?;
    let mut app = App::new(form);
    let result = app.run(&mut tui).await;
    tui.cancel();
    result
}
