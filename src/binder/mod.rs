//! Binding command-line flags into configuration records.
//!
//! A bind cycle runs in fixed phases, failing fast at the first one that
//! reports an error:
//!
//! 1. serialize the record and check that it is a struct;
//! 2. build a [`FieldDescriptor`] per supported field;
//! 3. register one flag per descriptor;
//! 4. parse the command line;
//! 5. check that every required flag was given;
//! 6. write the resolved values back into the record.
//!
//! The record is only written in the last phase, so an error leaves it
//! exactly as the caller passed it in. Fields that serde skips are never
//! written.

mod builder;
mod node;
mod shape;
mod usage;

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::process;

use toml::Table;

pub use builder::BinderBuilder;
use node::{check_default, reconcile, BindingNode};
use shape::shape_of;
use usage::Usage;

use crate::field::{Annotation, FieldDescriptor, StructError};
use crate::flagset::{FlagError, FlagSet};
use crate::log::Logger;
use crate::{Error, Flags};

/// What [`Binder::parse`] does once an error has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Return every error to the caller.
    ContinueOnError,
    /// Exit the process: status 2 on errors, status 0 for `-h`/`-help`.
    #[default]
    ExitOnError,
    /// Panic with the error.
    PanicOnError,
}

/// Binds command-line arguments into records implementing [`Flags`].
///
/// Usage and error text go to `W` (standard error by default). Command-line
/// errors print the error line followed by the usage text; malformed record
/// errors print a single diagnostic line unless errors are returned to the
/// caller.
///
/// The flag set from the most recent [`parse`](Self::parse) stays available
/// for the positional accessors [`arg`](Self::arg) and [`args`](Self::args).
pub struct Binder<W = io::Stderr> {
    error_handling: ErrorHandling,
    output: W,
    usage: Usage,
    logger: Box<dyn Logger>,
    flags: FlagSet,
}

impl Binder<io::Stderr> {
    /// Creates a new binder builder.
    pub fn builder() -> BinderBuilder<io::Stderr> {
        BinderBuilder::new()
    }

    /// A binder that writes to standard error and exits on error.
    pub fn new() -> Self {
        Self::builder().build()
    }
}

impl Default for Binder<io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: fmt::Debug> fmt::Debug for Binder<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("error_handling", &self.error_handling)
            .field("output", &self.output)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Binder<W> {
    /// Binds `args` into `record`.
    ///
    /// `args` is shaped like a process argument vector: the first element
    /// is the program name and is not parsed as a flag.
    ///
    /// A field that was not given on the command line keeps the value it
    /// already had when that value is not the zero value of its type;
    /// otherwise it receives the annotated default.
    pub fn parse<T, I, S>(&mut self, record: &mut T, args: I) -> Result<(), Error>
    where
        T: Flags,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let program = args.first().cloned().unwrap_or_default();
        tracing::debug!(program = %program, args = args.len().saturating_sub(1), "binding flags");

        self.flags = FlagSet::new(program);
        self.usage.reset();

        match self.bind(record, &args) {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err),
        }
    }

    fn bind<T: Flags>(&mut self, record: &mut T, args: &[String]) -> Result<(), Error> {
        let shape = shape_of(record)?;
        let mut nodes = self.register::<T>(&shape)?;

        self.flags.parse(args.iter().skip(1).cloned())?;

        let mut missing = Vec::new();
        for node in &mut nodes {
            node.observe(&self.flags);
            if node.is_missing() {
                missing.push(node.descriptor().name().to_string());
            }
        }
        if !missing.is_empty() {
            return Err(Error::MissingArgument { names: missing });
        }

        reconcile(&shape, &nodes, &self.flags, record)?;

        tracing::debug!(
            flags = nodes.len(),
            set = self.flags.nflag(),
            remaining = self.flags.narg(),
            "bound flags"
        );
        Ok(())
    }

    /// Builds every descriptor, then registers a flag for each.
    fn register<T: Flags>(&mut self, shape: &Table) -> Result<Vec<BindingNode>, Error> {
        let mut annotations: BTreeMap<String, Annotation> = T::annotations()
            .into_iter()
            .map(|annotation| (annotation.ident().to_string(), annotation))
            .collect();

        let mut descriptors = Vec::with_capacity(shape.len());
        for (ident, value) in shape {
            let annotation = annotations.remove(ident.as_str());
            match FieldDescriptor::extract(ident, value, annotation.as_ref())? {
                Some(descriptor) => {
                    check_default::<T>(shape, &descriptor)?;
                    descriptors.push((descriptor, value));
                }
                None => {
                    tracing::trace!(field = %ident, kind = value.type_str(), "skipping field");
                    self.logger.log(format_args!(
                        "skipping field {ident}: {} values cannot be flags",
                        value.type_str()
                    ));
                }
            }
        }
        for ident in annotations.keys() {
            self.logger
                .log(format_args!("ignoring annotation for unknown field {ident}"));
        }

        let mut nodes = Vec::with_capacity(descriptors.len());
        for (descriptor, value) in descriptors {
            let cell = self
                .flags
                .define(
                    descriptor.name(),
                    descriptor.static_default().clone(),
                    descriptor.usage(),
                )
                .map_err(|err| registration_error(&descriptor, err))?;
            tracing::trace!(
                field = descriptor.ident(),
                flag = descriptor.name(),
                kind = %descriptor.kind(),
                required = descriptor.required(),
                "registered flag"
            );

            let current = descriptor.kind().from_toml(value);
            nodes.push(BindingNode::new(descriptor, cell, current));
        }
        Ok(nodes)
    }

    fn fail(&mut self, err: Error) -> Result<(), Error> {
        tracing::debug!(error = %err, user = err.is_user_error(), "flag binding failed");

        // Write failures on the output sink are ignored.
        if err.is_user_error() {
            if !matches!(err, Error::HelpRequested) {
                let _ = writeln!(self.output, "{err}");
            }
            let _ = self.print_usage();
        } else if self.error_handling != ErrorHandling::ContinueOnError {
            let _ = writeln!(self.output, "malformed flag record: {err}");
        }

        match self.error_handling {
            ErrorHandling::ContinueOnError => Err(err),
            ErrorHandling::ExitOnError => process::exit(err.exit_code()),
            ErrorHandling::PanicOnError => panic!("{err}"),
        }
    }

    /// Writes the usage text for the current flags.
    ///
    /// Only the first call after each [`parse`](Self::parse) writes anything.
    pub fn print_usage(&mut self) -> io::Result<()> {
        self.usage.print(&mut self.output, &self.flags)
    }

    /// The i'th argument left after the flags.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.flags.arg(i)
    }

    /// All arguments left after the flags.
    pub fn args(&self) -> &[String] {
        self.flags.args()
    }

    pub fn narg(&self) -> usize {
        self.flags.narg()
    }

    /// The flag set built by the most recent parse.
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn registration_error(descriptor: &FieldDescriptor, err: FlagError) -> Error {
    let field = descriptor.ident().to_string();
    let name = descriptor.name().to_string();
    match err {
        FlagError::Redefined(_) => StructError::DuplicateName { field, name }.into(),
        _ => StructError::InvalidName { field, name }.into(),
    }
}
