//! Console presenter

use std::io::{self, Stdout, Write};

use tracing::debug;

use super::{Completion, Presenter};
use crate::error::DumpError;

/// Writes the header line followed by the body to a writer
pub struct ConsolePresenter<W: Write = Stdout> {
    out: W,
}

impl ConsolePresenter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer, mostly for inspecting test output
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, header: &str, body: &str) -> Result<Completion, DumpError> {
        debug!(header_len = header.len(), body_len = body.len(), "ConsolePresenter::present: called");

        writeln!(self.out, "{}", header)
            .and_then(|_| self.out.write_all(body.as_bytes()))
            .and_then(|_| self.out.flush())
            .map_err(|e| DumpError::presentation("Failed to write to console", e))?;

        Ok(Completion::Printed)
    }
}
