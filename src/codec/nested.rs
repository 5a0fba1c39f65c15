use std::fmt;

use crate::{ArrayView, Buffer, Codec, RecordView, Result, Schema, Value, ValueView};

/// A record embedded in its parent, read as a [`RecordView`] over the
/// parent's buffer.
#[derive(Clone)]
pub struct NestedRecord {
    schema: Schema,
}

impl NestedRecord {
    pub fn new(schema: &Schema) -> Self {
        Self {
            schema: schema.clone(),
        }
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl fmt::Debug for NestedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedRecord").field(&self.schema).finish()
    }
}

impl Codec for NestedRecord {
    #[inline]
    fn size(&self) -> usize {
        self.schema.size()
    }

    fn get(&self, buffer: &Buffer, offset: usize) -> Result<ValueView> {
        RecordView::at(buffer, &self.schema, offset).map(ValueView::Record)
    }

    fn set(&self, buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
        RecordView::at(buffer, &self.schema, offset)?.assign(value)
    }

    #[inline]
    fn kind(&self) -> &'static str {
        "record"
    }
}

/// A fixed number of records embedded back to back, read as an
/// [`ArrayView`] over the parent's buffer.
#[derive(Clone)]
pub struct NestedArray {
    len: usize,
    schema: Schema,
}

impl NestedArray {
    pub fn new(len: usize, schema: &Schema) -> Self {
        Self {
            len,
            schema: schema.clone(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl fmt::Debug for NestedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedArray")
            .field("len", &self.len)
            .field("schema", &self.schema)
            .finish()
    }
}

impl Codec for NestedArray {
    #[inline]
    fn size(&self) -> usize {
        self.len.saturating_mul(self.schema.size())
    }

    fn get(&self, buffer: &Buffer, offset: usize) -> Result<ValueView> {
        ArrayView::with_len(buffer, &self.schema, offset, self.len).map(ValueView::Array)
    }

    fn set(&self, buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
        ArrayView::with_len(buffer, &self.schema, offset, self.len)?.assign(value)
    }

    #[inline]
    fn kind(&self) -> &'static str {
        "array"
    }
}
