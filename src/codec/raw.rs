use crate::{Buffer, ByteBlock, Codec, Error, Result, Value, ValueView, cold_path};

/// A block of raw bytes, read as a [`ByteBlock`] sharing the buffer.
#[derive(Clone, Copy, Debug)]
pub struct RawBytes {
    len: usize,
}

impl RawBytes {
    pub const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Codec for RawBytes {
    #[inline]
    fn size(&self) -> usize {
        self.len
    }

    fn get(&self, buffer: &Buffer, offset: usize) -> Result<ValueView> {
        ByteBlock::new(buffer, offset, self.len).map(ValueView::Bytes)
    }

    fn set(&self, buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
        let Value::Bytes(bytes) = value else {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: self.kind(),
                found: value.type_name(),
            });
        };
        if bytes.len() != self.len {
            cold_path();
            return Err(Error::SizeMismatch {
                expected: self.len,
                actual: bytes.len(),
            });
        }
        buffer.write_bytes(offset, bytes)
    }

    #[inline]
    fn kind(&self) -> &'static str {
        "bytes"
    }
}

/// Padding. Takes up space in the layout and nothing else.
#[derive(Clone, Copy, Debug)]
pub struct Reserved {
    len: usize,
}

impl Reserved {
    pub const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Codec for Reserved {
    #[inline]
    fn size(&self) -> usize {
        self.len
    }

    fn get(&self, _buffer: &Buffer, _offset: usize) -> Result<ValueView> {
        cold_path();
        Err(Error::TypeMismatch {
            expected: "accessible field",
            found: self.kind(),
        })
    }

    fn set(&self, _buffer: &Buffer, _offset: usize, _value: &Value) -> Result<()> {
        cold_path();
        Err(Error::TypeMismatch {
            expected: "accessible field",
            found: self.kind(),
        })
    }

    #[inline]
    fn kind(&self) -> &'static str {
        "reserved"
    }

    #[inline]
    fn is_reserved(&self) -> bool {
        true
    }
}
