//! Bind command-line flags straight into configuration structs.
//!
//! A record type derives serde's `Serialize` and `Deserialize` and
//! implements [`Flags`]; its integer, string and boolean fields become
//! Go-style flags (`-name value`, `-name=value`, bare `-flag` for booleans).
//! Annotations give fields a flag name, a default, usage text and
//! required-ness.

pub mod binder;
pub mod field;
pub mod flagset;
pub mod log;
mod error;
mod record;

pub use binder::{Binder, BinderBuilder, ErrorHandling};
pub use error::Error;
pub use field::{Annotation, FieldDescriptor, Kind, StructError};
pub use flagset::{FlagError, FlagSet, FlagValue};
pub use log::{Logger, NoopLogger, StderrLogger, TracingLogger};
pub use record::Flags;

/// Binds the process's command line into `record` with default settings.
///
/// Errors print usage or a diagnostic to standard error and exit the
/// process. The returned [`Binder`] gives access to the positional
/// arguments that followed the flags.
pub fn parse<T: Flags>(record: &mut T) -> Result<Binder, Error> {
    let mut binder = Binder::new();
    binder.parse(record, std::env::args())?;
    Ok(binder)
}
