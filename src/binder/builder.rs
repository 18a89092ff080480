use std::io::{self, Write};

use super::usage::Usage;
use super::{Binder, ErrorHandling};
use crate::flagset::FlagSet;
use crate::log::{Logger, NoopLogger};

/// Builder for a [`Binder`].
///
/// Starts out writing to standard error and exiting on error. The output
/// type changes to `V` when [`with_output`](Self::with_output) is called.
///
/// ```
/// use flag_bind::{Binder, ErrorHandling};
///
/// let binder = Binder::builder()
///     .error_handling(ErrorHandling::ContinueOnError)
///     .with_output(Vec::new())
///     .with_usage_text("Usage: demo [flags]")
///     .build();
/// assert!(binder.output().is_empty());
/// ```
#[must_use = "builders do nothing until .build() is called"]
pub struct BinderBuilder<W> {
    error_handling: ErrorHandling,
    output: W,
    usage_text: Option<String>,
    logger: Box<dyn Logger>,
}

impl BinderBuilder<io::Stderr> {
    pub(crate) fn new() -> Self {
        Self {
            error_handling: ErrorHandling::default(),
            output: io::stderr(),
            usage_text: None,
            logger: Box::new(NoopLogger),
        }
    }
}

impl<W: Write> BinderBuilder<W> {
    /// Sets how the binder reacts to errors.
    pub fn error_handling(mut self, mode: ErrorHandling) -> Self {
        self.error_handling = mode;
        self
    }

    /// Shorthand for `error_handling(ErrorHandling::ContinueOnError)`.
    pub fn continue_on_error(self) -> Self {
        self.error_handling(ErrorHandling::ContinueOnError)
    }

    /// Sends usage and error text to `output` instead.
    pub fn with_output<V: Write>(self, output: V) -> BinderBuilder<V> {
        BinderBuilder {
            error_handling: self.error_handling,
            output,
            usage_text: self.usage_text,
            logger: self.logger,
        }
    }

    /// Replaces the first line of the usage text.
    ///
    /// Defaults to `usage: <program>`.
    pub fn with_usage_text(mut self, header: impl Into<String>) -> Self {
        self.usage_text = Some(header.into());
        self
    }

    /// Reports skipped fields and unmatched annotations to `logger`.
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    pub fn build(self) -> Binder<W> {
        Binder {
            error_handling: self.error_handling,
            output: self.output,
            usage: Usage::new(self.usage_text),
            logger: self.logger,
            flags: FlagSet::default(),
        }
    }
}
