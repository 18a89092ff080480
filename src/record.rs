use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::field::Annotation;

/// A configuration record that can be bound to command-line flags.
///
/// The record is inspected through serde: every serialized `i64`-compatible
/// integer, string or boolean field becomes a flag. Fields of other types,
/// fields marked `#[serde(skip)]` and `Option` fields holding `None` are left
/// out. Bound values are written back with serde's in-place deserialization,
/// so skipped fields keep whatever the caller stored in them. Records that
/// serde cannot deserialize in place (`#[serde(flatten)]`, `from`/`try_from`
/// conversions, `transparent`) are rebuilt whole instead, and their skipped
/// fields come back as `Default`.
///
/// Field values must fit a TOML value: a `u64` above `i64::MAX` is
/// reported as [`StructError::Unrepresentable`](crate::StructError).
///
/// Per-field metadata is supplied by [`Flags::annotations`].
///
/// ```
/// use flag_bind::{Annotation, Binder, Flags};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Options {
///     count: i64,
///     word: String,
/// }
///
/// impl Flags for Options {
///     fn annotations() -> Vec<Annotation> {
///         vec![
///             Annotation::field("count").name("c").value("10"),
///             Annotation::field("word").usage("the word to print"),
///         ]
///     }
/// }
///
/// let mut options = Options::default();
/// let mut binder = Binder::builder().continue_on_error().build();
/// binder.parse(&mut options, ["demo", "-word", "bar"])?;
///
/// assert_eq!(options.count, 10);
/// assert_eq!(options.word, "bar");
/// # Ok::<(), flag_bind::Error>(())
/// ```
pub trait Flags: Serialize + DeserializeOwned {
    /// Metadata for the record's fields, keyed by serialized field name.
    ///
    /// Fields without an entry get a flag named after the lowercased field,
    /// no default, no usage text, and are optional.
    fn annotations() -> Vec<Annotation> {
        Vec::new()
    }
}
