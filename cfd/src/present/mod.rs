//! Display surfaces for the header and dump
//!
//! Two interchangeable presenters sit behind the [`Presenter`] trait:
//! - [`WindowPresenter`] - full-screen scrollable terminal window
//! - [`ConsolePresenter`] - plain text on stdout (or any writer)
//!
//! [`select`] picks one based on [`interactive_available`], and
//! [`present_or_fallback`] drops to the console when the window cannot be set
//! up. Presenters never end the process themselves; they hand a
//! [`Completion`] back to the caller.

mod console;
mod window;

pub use console::ConsolePresenter;
pub use window::{Action, Viewer, WindowPresenter};

use std::io::IsTerminal;

use tracing::{debug, warn};

use crate::config::ViewportConfig;
use crate::error::DumpError;

/// How a presentation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The user closed the window
    Closed,
    /// Text was written to the console
    Printed,
}

/// Something that can show a titled block of read-only text
pub trait Presenter {
    /// Show `body` under `header`, returning once the user is done with it
    fn present(&mut self, header: &str, body: &str) -> Result<Completion, DumpError>;
}

/// True when both stdin and stdout are terminals and TERM is usable
pub fn interactive_available() -> bool {
    let term_ok = !matches!(std::env::var("TERM").as_deref(), Ok("dumb"));
    let result = term_ok && std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    debug!(term_ok, result, "interactive_available");
    result
}

/// Choose the presenter for this run
pub fn select(force_console: bool, viewport: ViewportConfig) -> Box<dyn Presenter> {
    if !force_console && interactive_available() {
        debug!("select: using window presenter");
        Box::new(WindowPresenter::new(viewport))
    } else {
        debug!(force_console, "select: using console presenter");
        Box::new(ConsolePresenter::stdout())
    }
}

/// Present with `primary`, retrying on `fallback` if the primary display
/// could not be initialized
///
/// Any other failure, including one from the fallback, is returned as is.
pub fn present_or_fallback(
    primary: &mut dyn Presenter,
    fallback: &mut dyn Presenter,
    header: &str,
    body: &str,
) -> Result<Completion, DumpError> {
    match primary.present(header, body) {
        Err(DumpError::DisplayUnavailable { source }) => {
            warn!("Interactive display unavailable ({}), falling back to console", source);
            fallback.present(header, body)
        }
        other => other,
    }
}
