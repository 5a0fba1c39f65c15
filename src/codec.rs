//! Field descriptors: a byte width plus a get/set pair against a buffer.
//!
//! Every builder in this module returns a [`Descriptor`], a shared handle to
//! an immutable [`Codec`]. Schemas are ordered lists of named descriptors.
//!
//! # Example
//!
//! ```
//! use schema_view::{Buffer, Endian, Value, float32, uint16};
//!
//! let buffer = Buffer::new(6);
//! let id = uint16(Endian::Little);
//! let value = float32(Endian::Big);
//!
//! id.set(&buffer, 0, &Value::U16(0x0102)).unwrap();
//! value.set(&buffer, 2, &Value::F32(3.5)).unwrap();
//!
//! assert_eq!(buffer.to_vec(), [0x02, 0x01, 0x40, 0x60, 0x00, 0x00]);
//! assert_eq!(id.get(&buffer, 0).unwrap(), Value::U16(0x0102));
//! ```

use std::{fmt, rc::Rc};

use zerocopy::{BigEndian, LittleEndian, NativeEndian, byteorder};

use crate::{Buffer, Result, Schema, Value, ValueView};

mod nested;
mod raw;
mod scalar;
mod text;

pub use nested::{NestedArray, NestedRecord};
pub use raw::{RawBytes, Reserved};
pub use text::Utf8;

use scalar::ScalarCodec;

/// The codec behind one field type.
///
/// `get` and `set` address the buffer directly, at the absolute byte offset
/// of the field. Implementations must touch no byte outside
/// `offset..offset + size()`, and a failing `set` must leave those bytes as
/// they were.
pub trait Codec: fmt::Debug {
    /// Width of the field in bytes.
    fn size(&self) -> usize;

    fn get(&self, buffer: &Buffer, offset: usize) -> Result<ValueView>;

    fn set(&self, buffer: &Buffer, offset: usize, value: &Value) -> Result<()>;

    /// Short type name, used in error messages.
    fn kind(&self) -> &'static str;

    /// Reserved fields only take up space: records hide them.
    fn is_reserved(&self) -> bool {
        false
    }
}

/// A shared, immutable field descriptor.
pub type Descriptor = Rc<dyn Codec>;

/// Byte order of a multi-byte scalar field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Endian {
    /// Most significant byte first (network byte order).
    #[default]
    Big,
    Little,
    /// Whatever the target platform uses.
    Native,
}

macro_rules! ordered {
    ($endian:expr, $wrapper:ident) => {
        match $endian {
            Endian::Big => Rc::new(ScalarCodec::<byteorder::$wrapper<BigEndian>>::new(Endian::Big))
                as Descriptor,
            Endian::Little => Rc::new(ScalarCodec::<byteorder::$wrapper<LittleEndian>>::new(
                Endian::Little,
            )) as Descriptor,
            Endian::Native => Rc::new(ScalarCodec::<byteorder::$wrapper<NativeEndian>>::new(
                Endian::Native,
            )) as Descriptor,
        }
    };
}

pub fn int8() -> Descriptor {
    Rc::new(ScalarCodec::<i8>::new(Endian::Native))
}

pub fn uint8() -> Descriptor {
    Rc::new(ScalarCodec::<u8>::new(Endian::Native))
}

pub fn int16(endian: Endian) -> Descriptor {
    ordered!(endian, I16)
}

pub fn uint16(endian: Endian) -> Descriptor {
    ordered!(endian, U16)
}

pub fn int32(endian: Endian) -> Descriptor {
    ordered!(endian, I32)
}

pub fn uint32(endian: Endian) -> Descriptor {
    ordered!(endian, U32)
}

pub fn int64(endian: Endian) -> Descriptor {
    ordered!(endian, I64)
}

pub fn uint64(endian: Endian) -> Descriptor {
    ordered!(endian, U64)
}

#[cfg(feature = "i128")]
pub fn int128(endian: Endian) -> Descriptor {
    ordered!(endian, I128)
}

#[cfg(feature = "i128")]
pub fn uint128(endian: Endian) -> Descriptor {
    ordered!(endian, U128)
}

pub fn float32(endian: Endian) -> Descriptor {
    ordered!(endian, F32)
}

pub fn float64(endian: Endian) -> Descriptor {
    ordered!(endian, F64)
}

/// `len` bytes of padding. Counts towards offsets and size, but is never
/// visible as a field.
pub fn reserved(len: usize) -> Descriptor {
    Rc::new(Reserved::new(len))
}

/// A UTF-8 string of at most `max_bytes` encoded bytes, NUL padded.
pub fn utf8(max_bytes: usize) -> Descriptor {
    Rc::new(Utf8::new(max_bytes))
}

/// `len` raw bytes, read as a [`ByteBlock`](crate::ByteBlock) sharing the buffer.
pub fn raw_bytes(len: usize) -> Descriptor {
    Rc::new(RawBytes::new(len))
}

/// A record laid out by `schema`, embedded in place.
pub fn nested_record(schema: &Schema) -> Descriptor {
    Rc::new(NestedRecord::new(schema))
}

/// `len` consecutive records laid out by `schema`, embedded in place.
pub fn nested_array(len: usize, schema: &Schema) -> Descriptor {
    Rc::new(NestedArray::new(len, schema))
}
