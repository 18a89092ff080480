use std::io::{self, Write};

use crate::flagset::FlagSet;

/// Usage text printer that writes at most once per parse cycle.
#[derive(Debug, Clone, Default)]
pub(crate) struct Usage {
    header: Option<String>,
    printed: bool,
}

impl Usage {
    pub(crate) fn new(header: Option<String>) -> Self {
        Self {
            header,
            printed: false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.printed = false;
    }

    /// Writes the header line and the flag listing, unless already written
    /// since the last [`reset`](Self::reset).
    pub(crate) fn print<W: Write + ?Sized>(&mut self, out: &mut W, flags: &FlagSet) -> io::Result<()> {
        if self.printed {
            return Ok(());
        }
        self.printed = true;

        match &self.header {
            Some(header) => writeln!(out, "{header}")?,
            None => writeln!(out, "usage: {}", flags.name())?,
        }
        flags.write_defaults(out)
    }
}
