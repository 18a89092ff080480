//! Turning a record into the table of its serialized fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{self, Impossible, Serialize};
use toml::{Table, Value};

use crate::field::StructError;
use crate::Error;

/// Serializes the record, which must come out as a table of fields.
///
/// When serialization fails, the record is walked again field by field to
/// tell a record that is not a struct (`InvalidInput`) from a struct with a
/// value TOML cannot hold, such as a `u64` above `i64::MAX` (`BadStruct`).
pub(crate) fn shape_of<T: Serialize>(record: &T) -> Result<Table, Error> {
    let err = match Value::try_from(record) {
        Ok(Value::Table(table)) => return Ok(table),
        Ok(other) => {
            return Err(Error::InvalidInput(format!(
                "expected a struct, found {}",
                other.type_str()
            )))
        }
        Err(err) => err,
    };

    match record.serialize(FieldScan) {
        Ok(Some((field, reason))) => Err(StructError::Unrepresentable { field, reason }.into()),
        Ok(None) => Err(Error::InvalidInput(err.to_string())),
        Err(NotATable(found)) => Err(Error::InvalidInput(format!(
            "expected a struct, found {found}"
        ))),
    }
}

/// The first field that fails to serialize, with the reason.
type Failure = Option<(String, String)>;

#[derive(Debug)]
struct NotATable(String);

impl fmt::Display for NotATable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a struct, found {}", self.0)
    }
}

impl std::error::Error for NotATable {}

impl ser::Error for NotATable {
    fn custom<M: fmt::Display>(msg: M) -> Self {
        NotATable(msg.to_string())
    }
}

fn field_failure<V>(key: &str, value: &V) -> Failure
where
    V: ?Sized + Serialize,
{
    // A one-entry map, so `None` fields are dropped the way toml drops them.
    Value::try_from(BTreeMap::from([(key, value)]))
        .err()
        .map(|err| (key.to_string(), err.to_string()))
}

/// Serializer that only accepts structs and maps, serializing each of
/// their fields on its own.
struct FieldScan;

macro_rules! not_a_table {
    ($($method:ident($ty:ty) => $found:literal;)*) => {
        $(
            fn $method(self, _: $ty) -> Result<Failure, NotATable> {
                Err(NotATable($found.to_string()))
            }
        )*
    };
}

impl ser::Serializer for FieldScan {
    type Ok = Failure;
    type Error = NotATable;
    type SerializeSeq = Impossible<Failure, NotATable>;
    type SerializeTuple = Impossible<Failure, NotATable>;
    type SerializeTupleStruct = Impossible<Failure, NotATable>;
    type SerializeTupleVariant = Impossible<Failure, NotATable>;
    type SerializeMap = ScanMap;
    type SerializeStruct = ScanStruct;
    type SerializeStructVariant = Impossible<Failure, NotATable>;

    not_a_table! {
        serialize_bool(bool) => "boolean";
        serialize_i8(i8) => "integer";
        serialize_i16(i16) => "integer";
        serialize_i32(i32) => "integer";
        serialize_i64(i64) => "integer";
        serialize_u8(u8) => "integer";
        serialize_u16(u16) => "integer";
        serialize_u32(u32) => "integer";
        serialize_u64(u64) => "integer";
        serialize_f32(f32) => "float";
        serialize_f64(f64) => "float";
        serialize_char(char) => "string";
        serialize_str(&str) => "string";
        serialize_bytes(&[u8]) => "bytes";
        serialize_unit_struct(&'static str) => "unit struct";
    }

    fn serialize_none(self) -> Result<Failure, NotATable> {
        Err(NotATable("none".into()))
    }

    fn serialize_some<V>(self, value: &V) -> Result<Failure, NotATable>
    where
        V: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Failure, NotATable> {
        Err(NotATable("unit".into()))
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<Failure, NotATable> {
        Err(NotATable("enum".into()))
    }

    fn serialize_newtype_struct<V>(self, _: &'static str, value: &V) -> Result<Failure, NotATable>
    where
        V: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<V>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &V,
    ) -> Result<Failure, NotATable>
    where
        V: ?Sized + Serialize,
    {
        Err(NotATable("enum".into()))
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, NotATable> {
        Err(NotATable("array".into()))
    }

    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, NotATable> {
        Err(NotATable("array".into()))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, NotATable> {
        Err(NotATable("array".into()))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, NotATable> {
        Err(NotATable("enum".into()))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<ScanMap, NotATable> {
        Ok(ScanMap::default())
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<ScanStruct, NotATable> {
        Ok(ScanStruct::default())
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, NotATable> {
        Err(NotATable("enum".into()))
    }
}

#[derive(Default)]
struct ScanStruct {
    failure: Failure,
}

impl ser::SerializeStruct for ScanStruct {
    type Ok = Failure;
    type Error = NotATable;

    fn serialize_field<V>(&mut self, key: &'static str, value: &V) -> Result<(), NotATable>
    where
        V: ?Sized + Serialize,
    {
        if self.failure.is_none() {
            self.failure = field_failure(key, value);
        }
        Ok(())
    }

    fn end(self) -> Result<Failure, NotATable> {
        Ok(self.failure)
    }
}

/// Maps show up for records using `#[serde(flatten)]`.
#[derive(Default)]
struct ScanMap {
    key: String,
    failure: Failure,
}

impl ser::SerializeMap for ScanMap {
    type Ok = Failure;
    type Error = NotATable;

    fn serialize_key<K>(&mut self, key: &K) -> Result<(), NotATable>
    where
        K: ?Sized + Serialize,
    {
        self.key = match Value::try_from(key) {
            Ok(Value::String(key)) => key,
            Ok(other) => other.to_string(),
            Err(err) => err.to_string(),
        };
        Ok(())
    }

    fn serialize_value<V>(&mut self, value: &V) -> Result<(), NotATable>
    where
        V: ?Sized + Serialize,
    {
        if self.failure.is_none() {
            self.failure = field_failure(&self.key, value);
        }
        Ok(())
    }

    fn end(self) -> Result<Failure, NotATable> {
        Ok(self.failure)
    }
}
