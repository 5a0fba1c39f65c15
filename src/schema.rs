//! Schemas and the layout planner.
//!
//! A [`Schema`] is an ordered list of named [`Descriptor`]s. Field order is
//! the byte order of the record: each field starts where the previous one
//! ends, so fields can never overlap. The [`Layout`] is planned once, when
//! the schema is built, and shared by every view created from it.

use std::{collections::HashMap, fmt, rc::Rc};

use crate::{Descriptor, Error, Result, cold_path};

/// Byte offsets of every field of a schema, and its total size.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Layout {
    offsets: Vec<usize>,
    size: usize,
}

impl Layout {
    /// Offset of the `index`-th field, relative to the start of the record.
    #[inline]
    pub fn offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Sum of all field sizes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Plans the layout of `fields`: each field is placed at the sum of the
/// sizes of all fields before it.
pub fn plan(fields: &[(String, Descriptor)]) -> Layout {
    let mut cursor = 0usize;
    let offsets = fields
        .iter()
        .map(|(_, descriptor)| {
            let offset = cursor;
            cursor = cursor.saturating_add(descriptor.size());
            offset
        })
        .collect();
    Layout {
        offsets,
        size: cursor,
    }
}

/// Total size in bytes of one record laid out by `schema`.
#[inline]
pub fn compute_size(schema: &Schema) -> usize {
    schema.size()
}

struct SchemaInner {
    fields: Vec<(String, Descriptor)>,
    index: HashMap<String, usize>,
    layout: Layout,
}

/// An ordered mapping from field name to descriptor, with its planned layout.
///
/// Cloning is cheap and keeps the identity: clones share one layout.
#[derive(Clone)]
pub struct Schema {
    inner: Rc<SchemaInner>,
}

impl Schema {
    /// Builds a schema from `(name, descriptor)` pairs, in layout order.
    ///
    /// Fails with [`Error::DuplicateField`] if a name appears twice.
    ///
    /// # Example
    ///
    /// ```
    /// use schema_view::{Endian, Schema, compute_size, float32, reserved, uint16};
    ///
    /// let schema = Schema::new([
    ///     ("id", uint16(Endian::Little)),
    ///     ("flag", reserved(1)),
    ///     ("value", float32(Endian::Big)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(compute_size(&schema), 7);
    /// assert_eq!(schema.offset_of("value"), Some(3));
    /// ```
    pub fn new<N, I>(fields: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Descriptor)>,
    {
        let fields: Vec<(String, Descriptor)> = fields
            .into_iter()
            .map(|(name, descriptor)| (name.into(), descriptor))
            .collect();

        let mut index = HashMap::with_capacity(fields.len());
        for (position, (name, _)) in fields.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                cold_path();
                return Err(Error::DuplicateField(name.clone()));
            }
        }

        let layout = plan(&fields);
        Ok(Self {
            inner: Rc::new(SchemaInner {
                fields,
                index,
                layout,
            }),
        })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.inner.layout
    }

    /// Total size in bytes of one record.
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.layout.size
    }

    /// Number of fields, reserved ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    /// Returns `true` if both handles share one planned layout.
    #[inline]
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.inner.index.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&Descriptor> {
        self.index_of(name).map(|index| &self.inner.fields[index].1)
    }

    /// Offset of the named field, relative to the start of the record.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.index_of(name).map(|index| self.inner.layout.offsets[index])
    }

    /// The `index`-th field with its offset.
    pub fn entry(&self, index: usize) -> Option<(&str, &Descriptor, usize)> {
        let (name, descriptor) = self.inner.fields.get(index)?;
        Some((name, descriptor, self.inner.layout.offsets[index]))
    }

    /// The named field's descriptor and offset.
    pub fn lookup(&self, name: &str) -> Option<(&Descriptor, usize)> {
        let (_, descriptor, offset) = self.entry(self.index_of(name)?)?;
        Some((descriptor, offset))
    }

    /// All fields in layout order, reserved ones included, with their offsets.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Descriptor, usize)> + '_ {
        self.inner
            .fields
            .iter()
            .zip(&self.inner.layout.offsets)
            .map(|((name, descriptor), offset)| (name.as_str(), descriptor, *offset))
    }

    /// Names of the visible fields, in layout order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .filter(|(_, descriptor, _)| !descriptor.is_reserved())
            .map(|(name, _, _)| name)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.inner.fields.iter().map(|(name, descriptor)| (name, descriptor)))
            .finish()
    }
}

/// Collects fields one at a time for [`Schema::new`].
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<(String, Descriptor)>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    pub fn build(self) -> Result<Schema> {
        Schema::new(self.fields)
    }
}
