/// Flag metadata attached to one record field.
///
/// Annotations are keyed by the field's serialized name (after any
/// `#[serde(rename)]`). Every attribute is optional:
///
/// - `name`: flag name; defaults to the lowercased field name.
/// - `value`: static default, written the way it would be on the command line.
/// - `usage`: help text.
/// - `required`: a boolean token (`true`, `T`, `1`, ...).
/// - `tags`: comma separated free-form tokens; `required` marks the field
///   required.
///
/// ```
/// use flag_bind::Annotation;
///
/// let count = Annotation::field("count")
///     .name("c")
///     .value("10")
///     .usage("the number of times to print the word");
/// assert_eq!(count.ident(), "count");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Annotation {
    field: String,
    name: Option<String>,
    value: Option<String>,
    usage: Option<String>,
    required: Option<String>,
    tags: Vec<String>,
}

impl Annotation {
    /// Starts an annotation for the field serialized as `ident`.
    pub fn field(ident: impl Into<String>) -> Self {
        Self {
            field: ident.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Sets the `required` token. It is parsed when the record is bound, so
    /// an invalid token surfaces as a bad-struct error at that point.
    pub fn required(mut self, token: impl Into<String>) -> Self {
        self.required = Some(token.into());
        self
    }

    /// Appends comma separated tokens, e.g. `"required"`.
    pub fn tags(mut self, tags: &str) -> Self {
        self.tags.extend(
            tags.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn ident(&self) -> &str {
        &self.field
    }

    // Empty attributes behave as if they were absent.

    pub(crate) fn flag_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn default_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn usage_text(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub(crate) fn required_token(&self) -> Option<&str> {
        self.required.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
