//! `serde` support: values and views serialize to their plain structured form.
//!
//! Records become maps in schema order, arrays become sequences, raw blocks
//! become byte strings. Views are decoded eagerly at serialization time.

use serde::{
    Serialize, Serializer,
    ser::{Error as _, SerializeMap},
};

use crate::{ArrayView, RecordView, Value, ValueView};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::I8(value) => serializer.serialize_i8(*value),
            Value::U8(value) => serializer.serialize_u8(*value),
            Value::I16(value) => serializer.serialize_i16(*value),
            Value::U16(value) => serializer.serialize_u16(*value),
            Value::I32(value) => serializer.serialize_i32(*value),
            Value::U32(value) => serializer.serialize_u32(*value),
            Value::I64(value) => serializer.serialize_i64(*value),
            Value::U64(value) => serializer.serialize_u64(*value),
            #[cfg(feature = "i128")]
            Value::I128(value) => serializer.serialize_i128(*value),
            #[cfg(feature = "i128")]
            Value::U128(value) => serializer.serialize_u128(*value),
            Value::F32(value) => serializer.serialize_f32(*value),
            Value::F64(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Bytes(value) => serializer.serialize_bytes(value),
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Value::Array(items) => serializer.collect_seq(items),
        }
    }
}

impl Serialize for ValueView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValueView::Plain(value) => value.serialize(serializer),
            ValueView::Bytes(block) => block
                .with(|bytes| serializer.serialize_bytes(bytes))
                .map_err(S::Error::custom)?,
            ValueView::Record(record) => record.serialize(serializer),
            ValueView::Array(array) => array.serialize(serializer),
        }
    }
}

impl Serialize for RecordView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl Serialize for ArrayView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
