//! Error types for building views and accessing fields.
//!
//! This module contains the [`Error`] type which represents all possible errors
//! that can occur when binding a schema to a buffer or reading and writing
//! one of its fields.
//!
//! # Example
//!
//! ```
//! use schema_view::{Buffer, Error, RecordView, Result, Schema, ViewOptions, uint32, Endian};
//!
//! fn bind(buffer: &Buffer) -> Result<RecordView> {
//!     let schema = Schema::new([("id", uint32(Endian::Big))])?;
//!     match RecordView::new(buffer, &schema, ViewOptions::default()) {
//!         Err(Error::OutOfBounds { buffer_len, .. }) => {
//!             println!("buffer too small: {buffer_len} bytes");
//!             Err(Error::OutOfBounds { offset: 0, len: 4, buffer_len })
//!         }
//!         other => other,
//!     }
//! }
//!
//! assert!(bind(&Buffer::new(4)).is_ok());
//! assert!(bind(&Buffer::new(3)).is_err());
//! ```

use std::fmt::{self, Display};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when working with
/// record and array views.
///
/// Every error is raised at the operation that caused it. A failing `set`
/// never leaves a partial write behind.
#[derive(Debug)]
pub enum Error {
    Message(String),

    /// A byte range reaches past the end of the backing buffer.
    ///
    /// Raised when constructing a view whose `byte_offset + size` exceeds the
    /// buffer, or when a codec is asked to touch bytes outside of it.
    OutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    /// An array index outside of `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },

    /// The UTF-8 encoding of a string is longer than the field's capacity.
    EncodingOverflow { capacity: usize, actual: usize },

    /// A raw byte block was assigned from a source of a different length.
    SizeMismatch { expected: usize, actual: usize },

    /// A nested array was assigned from a sequence of a different length.
    LengthMismatch { expected: usize, actual: usize },

    /// A schema of total size zero was used where a positive element size is
    /// required.
    EmptySchema,

    /// The bytes of a string field are not valid UTF-8.
    InvalidUtf8(std::str::Utf8Error),

    /// The schema has no accessible field with this name.
    ///
    /// Reserved fields are never accessible and report this error too.
    UnknownField(String),

    /// Two fields of one schema share a name.
    DuplicateField(String),

    /// A value of the wrong shape was assigned to a field.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An integer does not fit into the field it was assigned to.
    ValueOutOfRange { kind: &'static str, value: String },

    /// The buffer was accessed from inside a scoped access to the same
    /// buffer, for example writing one raw field from within
    /// [`ByteBlock::with`](crate::ByteBlock::with) on another.
    BufferBusy,
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::OutOfBounds {
                offset,
                len,
                buffer_len,
            } => write!(
                formatter,
                "byte range {offset}..{} is out of bounds for a buffer of {buffer_len} bytes",
                offset + len
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(formatter, "index {index} out of range for length {len}")
            }
            Error::EncodingOverflow { capacity, actual } => write!(
                formatter,
                "encoded string of {actual} bytes exceeds capacity of {capacity} bytes"
            ),
            Error::SizeMismatch { expected, actual } => write!(
                formatter,
                "size mismatch: expected {expected} bytes, got {actual}"
            ),
            Error::LengthMismatch { expected, actual } => write!(
                formatter,
                "length mismatch: expected {expected} items, got {actual}"
            ),
            Error::EmptySchema => formatter.write_str("schema has a total size of zero"),
            Error::InvalidUtf8(error) => write!(formatter, "invalid utf-8: {error}"),
            Error::UnknownField(name) => write!(formatter, "unknown field: {name}"),
            Error::DuplicateField(name) => write!(formatter, "duplicate field: {name}"),
            Error::TypeMismatch { expected, found } => {
                write!(formatter, "type mismatch: expected {expected}, got {found}")
            }
            Error::ValueOutOfRange { kind, value } => {
                write!(formatter, "value {value} out of range for {kind}")
            }
            Error::BufferBusy => formatter.write_str("buffer is already in use by a scoped access"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUtf8(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(error: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8(error)
    }
}
