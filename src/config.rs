/// Where a view starts in its buffer and, for arrays, how many elements it has.
///
/// # Example
///
/// ```
/// use schema_view::ViewOptions;
///
/// let options = ViewOptions::default().byte_offset(16).length(4);
/// assert_eq!(options.byte_offset, 16);
/// assert_eq!(options.length, 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ViewOptions {
    /// Offset of the first byte of the view.
    pub byte_offset: usize,
    /// Number of array elements. Zero means: as many as fit in the rest of
    /// the buffer. Ignored by records.
    pub length: usize,
}

impl ViewOptions {
    #[inline]
    pub const fn byte_offset(mut self, byte_offset: usize) -> Self {
        self.byte_offset = byte_offset;
        self
    }

    #[inline]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}
