use crate::{Buffer, Codec, Error, Result, Value, ValueView, cold_path};

/// A UTF-8 string stored in a fixed number of bytes.
///
/// Shorter strings are padded with NUL bytes, and trailing NULs are stripped
/// again on read. A string whose encoding is longer than the capacity is
/// rejected with [`Error::EncodingOverflow`].
///
/// Reads decode strictly: bytes that are not valid UTF-8 fail with
/// [`Error::InvalidUtf8`], and so does decoding any record or array that
/// contains the field.
#[derive(Clone, Copy, Debug)]
pub struct Utf8 {
    capacity: usize,
}

impl Utf8 {
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Codec for Utf8 {
    #[inline]
    fn size(&self) -> usize {
        self.capacity
    }

    fn get(&self, buffer: &Buffer, offset: usize) -> Result<ValueView> {
        let text = buffer.with_range(offset, self.capacity, |bytes| {
            std::str::from_utf8(bytes).map(|text| text.trim_end_matches('\0').to_owned())
        })??;
        Ok(ValueView::Plain(Value::String(text)))
    }

    fn set(&self, buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
        let Value::String(text) = value else {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: self.kind(),
                found: value.type_name(),
            });
        };
        let encoded = text.as_bytes();
        if encoded.len() > self.capacity {
            cold_path();
            return Err(Error::EncodingOverflow {
                capacity: self.capacity,
                actual: encoded.len(),
            });
        }
        buffer.with_range_mut(offset, self.capacity, |dst| {
            let (head, padding) = dst.split_at_mut(encoded.len());
            head.copy_from_slice(encoded);
            padding.fill(0);
        })
    }

    #[inline]
    fn kind(&self) -> &'static str {
        "string"
    }
}
