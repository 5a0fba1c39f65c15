//! Record views: one schema bound to one buffer at one offset.

use std::fmt;

use crate::{Buffer, Descriptor, Error, Result, Schema, Value, ValueView, ViewOptions, cold_path};

/// A structured accessor over `schema.size()` bytes of a buffer.
///
/// Nothing is decoded up front: every [`get`](RecordView::get) reads the field
/// from the buffer, and every [`set`](RecordView::set) writes it back in
/// place. Views that overlap the same bytes observe each other's writes.
///
/// # Example
///
/// ```
/// use schema_view::{Buffer, Endian, RecordView, Schema, Value, uint32, utf8};
///
/// let schema = Schema::new([("id", uint32(Endian::Big)), ("name", utf8(8))]).unwrap();
/// let buffer = Buffer::new(schema.size());
/// let record = RecordView::at(&buffer, &schema, 0).unwrap();
///
/// record.set("id", 7u32).unwrap();
/// record.set("name", "crab").unwrap();
///
/// assert_eq!(record.get("name").unwrap().as_str(), Some("crab"));
/// assert_eq!(
///     record.to_value().unwrap(),
///     Value::record([("id", Value::U32(7)), ("name", Value::from("crab"))])
/// );
/// ```
#[derive(Clone)]
pub struct RecordView {
    buffer: Buffer,
    schema: Schema,
    offset: usize,
}

impl RecordView {
    /// Binds `schema` to `buffer` at `options.byte_offset`.
    ///
    /// Fails with [`Error::OutOfBounds`] if the record does not fit.
    pub fn new(buffer: &Buffer, schema: &Schema, options: ViewOptions) -> Result<Self> {
        Self::at(buffer, schema, options.byte_offset)
    }

    /// Binds `schema` to `buffer` at `byte_offset`.
    pub fn at(buffer: &Buffer, schema: &Schema, byte_offset: usize) -> Result<Self> {
        buffer.check_range(byte_offset, schema.size())?;
        Ok(Self::new_unchecked(buffer, schema, byte_offset))
    }

    /// The caller has checked that the record fits.
    #[inline]
    pub(crate) fn new_unchecked(buffer: &Buffer, schema: &Schema, byte_offset: usize) -> Self {
        Self {
            buffer: buffer.clone(),
            schema: schema.clone(),
            offset: byte_offset,
        }
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.schema.size()
    }

    /// Reads one field.
    ///
    /// Fails with [`Error::UnknownField`] for names that are not in the
    /// schema and for reserved fields.
    pub fn get(&self, name: &str) -> Result<ValueView> {
        let (descriptor, offset) = self.locate(name)?;
        descriptor.get(&self.buffer, offset)
    }

    /// Writes one field. On error the field's bytes are left untouched.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let (descriptor, offset) = self.locate(name)?;
        descriptor.set(&self.buffer, offset, &value.into())
    }

    /// Reads every visible field, in schema order.
    pub fn fields(&self) -> Fields<'_> {
        Fields { record: self, next: 0 }
    }

    /// Decodes the whole record into a [`Value::Record`].
    ///
    /// Reserved fields are left out.
    pub fn to_value(&self) -> Result<Value> {
        self.fields()
            .map(|(name, value)| -> Result<(String, Value)> {
                Ok((name.to_owned(), value?.to_value()?))
            })
            .collect::<Result<_>>()
            .map(Value::Record)
    }

    /// Writes the fields of a [`Value::Record`], in schema order.
    ///
    /// Fields missing from `value` keep their bytes. Names that are not
    /// visible fields of the schema fail with [`Error::UnknownField`]. The
    /// assignment is all or nothing: if any field fails, the record is
    /// restored to its previous contents.
    pub fn assign(&self, value: &Value) -> Result<()> {
        let Value::Record(entries) = value else {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: "record",
                found: value.type_name(),
            });
        };
        for (name, _) in entries {
            self.locate(name)?;
        }

        self.buffer.transact(self.offset, self.schema.size(), || {
            for (name, descriptor, offset) in self.schema.iter() {
                if let Some((_, field)) = entries.iter().find(|(entry, _)| entry == name) {
                    descriptor.set(&self.buffer, self.offset + offset, field)?;
                }
            }
            Ok(())
        })
    }

    fn locate(&self, name: &str) -> Result<(&Descriptor, usize)> {
        match self.schema.lookup(name) {
            Some((descriptor, offset)) if !descriptor.is_reserved() => {
                Ok((descriptor, self.offset + offset))
            }
            _ => {
                cold_path();
                Err(Error::UnknownField(name.to_owned()))
            }
        }
    }
}

impl fmt::Debug for RecordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.fields() {
            match value.and_then(|value| value.to_value()) {
                Ok(value) => map.entry(&name, &value),
                Err(error) => map.entry(&name, &format_args!("<{error}>")),
            };
        }
        map.finish()
    }
}

/// Iterator over the visible fields of a record, see [`RecordView::fields`].
pub struct Fields<'a> {
    record: &'a RecordView,
    next: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = (&'a str, Result<ValueView>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((name, descriptor, offset)) = self.record.schema.entry(self.next) {
            self.next += 1;
            if descriptor.is_reserved() {
                continue;
            }
            let value = descriptor.get(&self.record.buffer, self.record.offset + offset);
            return Some((name, value));
        }
        None
    }
}
