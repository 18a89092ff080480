//! Binding nodes and reconciliation of parsed values into the record.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use toml::{Table, Value};

use crate::field::{FieldDescriptor, StructError};
use crate::flagset::{FlagCell, FlagError, FlagSet, FlagValue};
use crate::Error;

/// One bindable field for the duration of a parse call.
#[derive(Debug, Clone)]
pub(crate) struct BindingNode {
    descriptor: FieldDescriptor,
    cell: FlagCell,
    /// The record's value before parsing, i.e. a possible dynamic default.
    current: Option<FlagValue>,
    observed: bool,
}

impl BindingNode {
    pub(crate) fn new(
        descriptor: FieldDescriptor,
        cell: FlagCell,
        current: Option<FlagValue>,
    ) -> Self {
        Self {
            descriptor,
            cell,
            current,
            observed: false,
        }
    }

    pub(crate) fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub(crate) fn observe(&mut self, flags: &FlagSet) {
        self.observed = flags.is_observed(self.cell);
    }

    pub(crate) fn is_missing(&self) -> bool {
        self.descriptor.required() && !self.observed
    }

    /// The value the field ends up with.
    ///
    /// Precedence: command line, then a non-zero value already in the
    /// record, then the flag's default.
    fn resolve(&self, flags: &FlagSet) -> Result<Value, Error> {
        let field = self.descriptor.ident();
        let kind = self.descriptor.kind();

        let cell = flags.value(self.cell).ok_or_else(|| Error::TypeAssertion {
            field: field.to_string(),
            reason: format!("no flag cell registered for -{}", self.descriptor.name()),
        })?;

        let chosen = match &self.current {
            Some(current) if !self.observed && !current.is_zero() => current,
            _ => cell,
        };

        kind.to_toml(chosen).ok_or_else(|| Error::TypeAssertion {
            field: field.to_string(),
            reason: format!("flag holds {} but field is {kind}", chosen.type_name()),
        })
    }
}

/// Writes every node's resolved value into `record`.
///
/// The merged table is deserialized once into a scratch record first, so a
/// failure leaves `record` untouched. The write itself goes through
/// [`Deserialize::deserialize_in_place`], which assigns only the fields
/// present in the table: fields marked `#[serde(skip)]` keep their values.
pub(crate) fn reconcile<T: DeserializeOwned>(
    shape: &Table,
    nodes: &[BindingNode],
    flags: &FlagSet,
    record: &mut T,
) -> Result<(), Error> {
    let mut merged = shape.clone();
    for node in nodes {
        merged.insert(node.descriptor.ident().to_string(), node.resolve(flags)?);
    }

    if let Err(err) = rebuild::<T>(merged.clone()) {
        return Err(blame::<T>(shape, nodes, flags, &err));
    }
    Deserialize::deserialize_in_place(Value::Table(merged), record).map_err(|err| {
        Error::TypeAssertion {
            field: field_list(nodes),
            reason: err.message().to_string(),
        }
    })
}

/// Finds the node whose value alone makes the record fail to deserialize.
///
/// A flag given on the command line, such as `-port 70000` for a `u16`
/// field, is a parse error. Anything else is a type assertion on the
/// offending field, or on every bound field when no single one fails.
fn blame<T: DeserializeOwned>(
    shape: &Table,
    nodes: &[BindingNode],
    flags: &FlagSet,
    err: &toml::de::Error,
) -> Error {
    let culprit = match rebuild::<T>(shape.clone()) {
        Ok(_) => nodes.iter().find_map(|node| {
            let mut trial = shape.clone();
            trial.insert(node.descriptor.ident().to_string(), node.resolve(flags).ok()?);
            rebuild::<T>(trial).err().map(|err| (node, err))
        }),
        Err(_) => None,
    };

    match culprit {
        Some((node, err)) if node.observed => match flags.value(node.cell) {
            Some(value) => Error::ParsingFailed(FlagError::InvalidValue {
                name: node.descriptor.name().to_string(),
                value: value.to_string(),
                reason: err.message().to_string(),
            }),
            None => Error::TypeAssertion {
                field: node.descriptor.ident().to_string(),
                reason: err.message().to_string(),
            },
        },
        Some((node, err)) => Error::TypeAssertion {
            field: node.descriptor.ident().to_string(),
            reason: err.message().to_string(),
        },
        None => Error::TypeAssertion {
            field: field_list(nodes),
            reason: err.message().to_string(),
        },
    }
}

/// Checks an annotated default against the field's real type by
/// deserializing the record with only that default substituted.
///
/// Catches defaults that parse as a flag value but do not fit the field,
/// such as `70000` for a `u16`.
pub(crate) fn check_default<T: DeserializeOwned>(
    shape: &Table,
    descriptor: &FieldDescriptor,
) -> Result<(), StructError> {
    if descriptor.default_value().is_empty() {
        return Ok(());
    }
    let Some(value) = descriptor.kind().to_toml(descriptor.static_default()) else {
        return Ok(());
    };

    let mut trial = shape.clone();
    trial.insert(descriptor.ident().to_string(), value);
    rebuild::<T>(trial)
        .map(drop)
        .map_err(|_| StructError::InvalidDefault {
            field: descriptor.ident().to_string(),
            kind: descriptor.kind(),
            value: descriptor.default_value().to_string(),
        })
}

fn rebuild<T: DeserializeOwned>(table: Table) -> Result<T, toml::de::Error> {
    Value::Table(table).try_into()
}

fn field_list(nodes: &[BindingNode]) -> String {
    nodes
        .iter()
        .map(|node| node.descriptor.ident())
        .collect::<Vec<_>>()
        .join(", ")
}
