//! Optional diagnostics sink for fields the binder passes over.

use std::fmt;

/// Receives formatted diagnostic lines.
///
/// Implemented for [`NoopLogger`], [`StderrLogger`], [`TracingLogger`] and
/// any `Fn(&str)` closure.
pub trait Logger {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Discards everything. The binder's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _args: fmt::Arguments<'_>) {}
}

/// Writes each line to standard error without a prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        eprintln!("{args}");
    }
}

/// Forwards each line as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: "flag_bind", "{args}");
    }
}

impl<F> Logger for F
where
    F: Fn(&str),
{
    fn log(&self, args: fmt::Arguments<'_>) {
        self(&args.to_string());
    }
}
