//! Array views: back-to-back records of one schema over one buffer.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{Buffer, Error, RecordView, Result, Schema, Value, ViewOptions, cold_path};

/// A fixed-length sequence of [`RecordView`]s over one buffer.
///
/// Element `i` starts at `byte_offset + i * element_size`. Elements are
/// created on first access and cached, so repeated access to one index
/// returns the same `Rc`. Clones of an array view share the cache.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use schema_view::{ArrayView, Buffer, Endian, Schema, ViewOptions, uint16};
///
/// let schema = Schema::new([("id", uint16(Endian::Big))]).unwrap();
/// let buffer = Buffer::new(10);
/// let array = ArrayView::new(&buffer, &schema, ViewOptions::default()).unwrap();
///
/// assert_eq!(array.len(), 5);
/// array.get(3).unwrap().set("id", 9u16).unwrap();
/// assert!(Rc::ptr_eq(&array.get(3).unwrap(), &array.get(3).unwrap()));
/// assert_eq!(buffer.to_vec()[6..8], [0, 9]);
/// ```
#[derive(Clone)]
pub struct ArrayView {
    buffer: Buffer,
    schema: Schema,
    offset: usize,
    len: usize,
    elements: Rc<RefCell<HashMap<usize, Rc<RecordView>>>>,
}

impl ArrayView {
    /// Binds an array of `schema` records to `buffer`.
    ///
    /// With `options.length == 0` the length is inferred as the number of
    /// whole records that fit between `options.byte_offset` and the end of
    /// the buffer. Fails with [`Error::EmptySchema`] if the schema has size
    /// zero, and with [`Error::OutOfBounds`] if the records do not fit.
    pub fn new(buffer: &Buffer, schema: &Schema, options: ViewOptions) -> Result<Self> {
        let element_size = Self::element_size_of(schema)?;
        let len = if options.length == 0 {
            match buffer.len().checked_sub(options.byte_offset) {
                Some(remaining) => remaining / element_size,
                None => {
                    cold_path();
                    return Err(Error::OutOfBounds {
                        offset: options.byte_offset,
                        len: 0,
                        buffer_len: buffer.len(),
                    });
                }
            }
        } else {
            options.length
        };
        Self::bind(buffer, schema, options.byte_offset, len)
    }

    /// Binds exactly `len` records, zero included.
    pub(crate) fn with_len(
        buffer: &Buffer,
        schema: &Schema,
        byte_offset: usize,
        len: usize,
    ) -> Result<Self> {
        Self::element_size_of(schema)?;
        Self::bind(buffer, schema, byte_offset, len)
    }

    fn element_size_of(schema: &Schema) -> Result<usize> {
        match schema.size() {
            0 => {
                cold_path();
                Err(Error::EmptySchema)
            }
            size => Ok(size),
        }
    }

    fn bind(buffer: &Buffer, schema: &Schema, byte_offset: usize, len: usize) -> Result<Self> {
        buffer.check_range(byte_offset, len.saturating_mul(schema.size()))?;
        Ok(Self {
            buffer: buffer.clone(),
            schema: schema.clone(),
            offset: byte_offset,
            len,
            elements: Rc::default(),
        })
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
    pub fn element_size(&self) -> usize {
        self.schema.size()
    }

    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.len * self.schema.size()
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of elements created so far.
    pub fn cached_len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns the record at `index`, creating it on first access.
    ///
    /// Fails with [`Error::IndexOutOfRange`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<Rc<RecordView>> {
        if index >= self.len {
            cold_path();
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let element = self
            .elements
            .borrow_mut()
            .entry(index)
            .or_insert_with(|| {
                Rc::new(RecordView::new_unchecked(
                    &self.buffer,
                    &self.schema,
                    self.offset + index * self.schema.size(),
                ))
            })
            .clone();
        Ok(element)
    }

    pub fn first(&self) -> Option<Rc<RecordView>> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<Rc<RecordView>> {
        self.len.checked_sub(1).and_then(|index| self.get(index).ok())
    }

    /// Iterates the elements in index order, creating them as it goes.
    pub fn iter(&self) -> ArrayIter<'_> {
        ArrayIter {
            array: self,
            next: 0,
        }
    }

    /// Decodes every element into a [`Value::Array`] of records.
    pub fn to_value(&self) -> Result<Value> {
        self.iter()
            .map(|element| element.to_value())
            .collect::<Result<_>>()
            .map(Value::Array)
    }

    /// Assigns the records of a [`Value::Array`] to the elements, in order.
    ///
    /// Fails with [`Error::LengthMismatch`] unless `value` has exactly
    /// `len()` items. All or nothing, like [`RecordView::assign`].
    pub fn assign(&self, value: &Value) -> Result<()> {
        let Value::Array(items) = value else {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: "array",
                found: value.type_name(),
            });
        };
        if items.len() != self.len {
            cold_path();
            return Err(Error::LengthMismatch {
                expected: self.len,
                actual: items.len(),
            });
        }
        self.buffer.transact(self.offset, self.byte_len(), || {
            items
                .iter()
                .enumerate()
                .try_for_each(|(index, item)| self.get(index)?.assign(item))
        })
    }
}

impl fmt::Debug for ArrayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ArrayView {
    type Item = Rc<RecordView>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of an [`ArrayView`].
pub struct ArrayIter<'a> {
    array: &'a ArrayView,
    next: usize,
}

impl Iterator for ArrayIter<'_> {
    type Item = Rc<RecordView>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.array.get(self.next).ok()?;
        self.next += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}
