//! Plain structured values and the lazy results of field reads.
//!
//! [`Value`] is the owned, fully decoded form: what a field is assigned
//! from, and what [`RecordView::to_value`] and [`ArrayView::to_value`]
//! produce. [`ValueView`] is what a single field read returns: decoded
//! scalars and strings, or a view for raw blocks and nested structures.

use std::fmt;

use crate::{ArrayView, ByteBlock, Error, RecordView, Result, cold_path};

/// An owned, fully decoded value.
///
/// Records keep their fields in schema order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    #[cfg(feature = "i128")]
    I128(i128),
    #[cfg(feature = "i128")]
    U128(u128),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Record(Vec<(String, Value)>),
    Array(Vec<Value>),
}

impl Value {
    /// Builds a [`Value::Record`] from `(name, value)` pairs, keeping their order.
    pub fn record<N, V>(fields: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Short name of the variant, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::I8(_) => "i8",
            Value::U8(_) => "u8",
            Value::I16(_) => "i16",
            Value::U16(_) => "u16",
            Value::I32(_) => "i32",
            Value::U32(_) => "u32",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            #[cfg(feature = "i128")]
            Value::I128(_) => "i128",
            #[cfg(feature = "i128")]
            Value::U128(_) => "u128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Record(_) => "record",
            Value::Array(_) => "array",
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.wide_integer().is_some()
    }

    /// Returns the value as an `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.wide_integer()?.convert()
    }

    /// Returns the value as a `u64` if it is an integer that fits.
    pub fn as_u64(&self) -> Option<u64> {
        self.wide_integer()?.convert()
    }

    #[cfg(feature = "i128")]
    pub fn as_i128(&self) -> Option<i128> {
        self.wide_integer()?.convert()
    }

    #[cfg(feature = "i128")]
    pub fn as_u128(&self) -> Option<u128> {
        self.wide_integer()?.convert()
    }

    /// Returns the value of a float variant, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(value) => Some(value as f64),
            Value::F64(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field of a [`Value::Record`] by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Converts an integer variant into `T`, for assignment to a `kind` field.
    pub(crate) fn to_integer<T>(&self, kind: &'static str) -> Result<T>
    where
        T: TryFrom<i128> + TryFrom<u128>,
    {
        let Some(wide) = self.wide_integer() else {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: kind,
                found: self.type_name(),
            });
        };
        wide.convert().ok_or_else(|| {
            cold_path();
            Error::ValueOutOfRange {
                kind,
                value: wide.to_string(),
            }
        })
    }

    /// Converts a numeric variant into `f32`, for assignment to a `kind` field.
    ///
    /// `F32` values pass through untouched, NaN payloads included.
    pub(crate) fn to_f32(&self, kind: &'static str) -> Result<f32> {
        match *self {
            Value::F32(value) => Ok(value),
            _ => self.to_f64(kind).map(|value| value as f32),
        }
    }

    /// Converts a numeric variant into `f64`, for assignment to a `kind` field.
    pub(crate) fn to_f64(&self, kind: &'static str) -> Result<f64> {
        if let Some(value) = self.as_f64() {
            return Ok(value);
        }
        match self.wide_integer() {
            Some(Wide::Signed(value)) => Ok(value as f64),
            Some(Wide::Unsigned(value)) => Ok(value as f64),
            None => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: kind,
                    found: self.type_name(),
                })
            }
        }
    }

    fn wide_integer(&self) -> Option<Wide> {
        Some(match *self {
            Value::I8(value) => Wide::Signed(value as i128),
            Value::I16(value) => Wide::Signed(value as i128),
            Value::I32(value) => Wide::Signed(value as i128),
            Value::I64(value) => Wide::Signed(value as i128),
            #[cfg(feature = "i128")]
            Value::I128(value) => Wide::Signed(value),
            Value::U8(value) => Wide::Unsigned(value as u128),
            Value::U16(value) => Wide::Unsigned(value as u128),
            Value::U32(value) => Wide::Unsigned(value as u128),
            Value::U64(value) => Wide::Unsigned(value as u128),
            #[cfg(feature = "i128")]
            Value::U128(value) => Wide::Unsigned(value),
            _ => return None,
        })
    }
}

/// Any integer, widened without loss.
#[derive(Clone, Copy)]
enum Wide {
    Signed(i128),
    Unsigned(u128),
}

impl Wide {
    #[inline]
    fn convert<T: TryFrom<i128> + TryFrom<u128>>(self) -> Option<T> {
        match self {
            Wide::Signed(value) => <T as TryFrom<i128>>::try_from(value).ok(),
            Wide::Unsigned(value) => <T as TryFrom<u128>>::try_from(value).ok(),
        }
    }
}

impl fmt::Display for Wide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wide::Signed(value) => write!(f, "{value}"),
            Wide::Unsigned(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! value_from {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for Value {
                #[inline]
                fn from(value: $native) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
);

#[cfg(feature = "i128")]
value_from!(i128 => I128, u128 => U128);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Value {
    #[inline]
    fn from(value: [u8; N]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

/// The result of reading one field.
///
/// Scalars and strings are decoded on the spot. Raw blocks, nested records
/// and nested arrays come back as views over the same buffer, so writes
/// through them land in place.
#[derive(Clone, Debug)]
pub enum ValueView {
    Plain(Value),
    Bytes(ByteBlock),
    Record(RecordView),
    Array(ArrayView),
}

impl ValueView {
    /// Decodes everything reachable from this value.
    pub fn to_value(&self) -> Result<Value> {
        match self {
            ValueView::Plain(value) => Ok(value.clone()),
            ValueView::Bytes(block) => Ok(Value::Bytes(block.to_vec())),
            ValueView::Record(record) => record.to_value(),
            ValueView::Array(array) => array.to_value(),
        }
    }

    pub fn as_plain(&self) -> Option<&Value> {
        match self {
            ValueView::Plain(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_plain()?.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_plain()?.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_plain()?.as_f64()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_plain()?.as_str()
    }

    pub fn as_block(&self) -> Option<&ByteBlock> {
        match self {
            ValueView::Bytes(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordView> {
        match self {
            ValueView::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayView> {
        match self {
            ValueView::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<RecordView> {
        match self {
            ValueView::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<ArrayView> {
        match self {
            ValueView::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl From<Value> for ValueView {
    #[inline]
    fn from(value: Value) -> Self {
        ValueView::Plain(value)
    }
}

impl PartialEq<Value> for ValueView {
    fn eq(&self, other: &Value) -> bool {
        match self {
            ValueView::Plain(value) => value == other,
            _ => self.to_value().is_ok_and(|value| value == *other),
        }
    }
}
