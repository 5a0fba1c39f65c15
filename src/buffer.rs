//! The shared byte region that every view reads from and writes to.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{Error, Result, cold_path};

/// A fixed-length, mutable byte region shared by any number of views.
///
/// Cloning a `Buffer` clones the handle, not the bytes. A write through one
/// handle (or through any view holding one) is immediately visible through
/// every other handle. The region is freed when the last handle is dropped,
/// so a view can never outlive the bytes it points into.
///
/// Access is single-threaded: `Buffer` is neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct Buffer {
    data: Rc<RefCell<Box<[u8]>>>,
    len: usize,
}

impl Buffer {
    /// Allocates a zero-filled buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self::from_vec(vec![0; len])
    }

    /// Takes ownership of `bytes` without copying.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let data = bytes.into_boxed_slice();
        let len = data.len();
        Self {
            data: Rc::new(RefCell::new(data)),
            len,
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

    /// Returns `true` if both handles refer to the same region.
    #[inline]
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Fails with [`Error::OutOfBounds`] unless `offset..offset + len` lies
    /// inside the buffer.
    #[inline]
    pub fn check_range(&self, offset: usize, len: usize) -> Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => Ok(()),
            _ => {
                cold_path();
                Err(Error::OutOfBounds {
                    offset,
                    len,
                    buffer_len: self.len,
                })
            }
        }
    }

    /// Copies the whole region out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.borrow().to_vec()
    }

    /// Runs `f` over the whole region.
    ///
    /// `f` must not access this buffer again through another handle or view.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.data.borrow())
    }

    /// Runs `f` over the whole region, mutably.
    ///
    /// `f` must not access this buffer again through another handle or view.
    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        f(&mut self.data.borrow_mut())
    }

    /// Runs `f` over `offset..offset + len`.
    ///
    /// Fails with [`Error::BufferBusy`] if the buffer is being written by an
    /// enclosing scoped access. Every field read and write goes through
    /// here, so nested accesses fail instead of panicking.
    pub fn with_range<R>(&self, offset: usize, len: usize, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
        self.check_range(offset, len)?;
        let Ok(data) = self.data.try_borrow() else {
            cold_path();
            return Err(Error::BufferBusy);
        };
        Ok(f(&data[offset..offset + len]))
    }

    /// Runs `f` over `offset..offset + len`, mutably.
    ///
    /// Fails with [`Error::BufferBusy`] if the buffer is inside any other
    /// scoped access.
    pub fn with_range_mut<R>(
        &self,
        offset: usize,
        len: usize,
        f: impl FnOnce(&mut [u8]) -> R,
    ) -> Result<R> {
        self.check_range(offset, len)?;
        let Ok(mut data) = self.data.try_borrow_mut() else {
            cold_path();
            return Err(Error::BufferBusy);
        };
        Ok(f(&mut data[offset..offset + len]))
    }

    #[inline]
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        self.with_range(offset, N, |bytes| {
            let mut out = [0u8; N];
            out.copy_from_slice(bytes);
            out
        })
    }

    #[inline]
    pub fn write_array<const N: usize>(&self, offset: usize, bytes: [u8; N]) -> Result<()> {
        self.with_range_mut(offset, N, |dst| dst.copy_from_slice(&bytes))
    }

    /// Fills `dst` from the bytes starting at `offset`.
    pub fn read_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        self.with_range(offset, dst.len(), |src| dst.copy_from_slice(src))
    }

    /// Copies `src` into the buffer starting at `offset`.
    pub fn write_bytes(&self, offset: usize, src: &[u8]) -> Result<()> {
        self.with_range_mut(offset, src.len(), |dst| dst.copy_from_slice(src))
    }

    /// Sets every byte of `offset..offset + len` to `byte`.
    pub fn fill(&self, offset: usize, len: usize, byte: u8) -> Result<()> {
        self.with_range_mut(offset, len, |dst| dst.fill(byte))
    }

    /// Runs `f`, restoring `offset..offset + len` to its prior contents if
    /// `f` fails.
    ///
    /// Compound writes go through here so that an error half way through
    /// never leaves a partially written range behind.
    pub fn transact<R>(&self, offset: usize, len: usize, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let snapshot = self.with_range(offset, len, |bytes| bytes.to_vec())?;
        match f() {
            Ok(result) => Ok(result),
            Err(error) => {
                cold_path();
                self.write_bytes(offset, &snapshot)?;
                Err(error)
            }
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.len).finish()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Buffer {
    fn from(bytes: [u8; N]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

#[cfg(feature = "shared")]
impl From<bytes::BytesMut> for Buffer {
    fn from(bytes: bytes::BytesMut) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

#[cfg(feature = "shared")]
impl From<bytes::Bytes> for Buffer {
    fn from(bytes: bytes::Bytes) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

#[cfg(feature = "shared")]
impl Buffer {
    /// Returns a frozen copy of the current contents.
    pub fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_vec())
    }
}

/// A window onto `len` bytes of a [`Buffer`], returned for raw byte fields.
///
/// The window shares storage with the buffer: reads observe later writes
/// made through any view, and writes through the block are visible to them.
#[derive(Clone)]
pub struct ByteBlock {
    buffer: Buffer,
    offset: usize,
    len: usize,
}

impl ByteBlock {
    /// Creates a window, checking that it fits inside `buffer`.
    pub fn new(buffer: &Buffer, offset: usize, len: usize) -> Result<Self> {
        buffer.check_range(offset, len)?;
        Ok(Self {
            buffer: buffer.clone(),
            offset,
            len,
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
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn get(&self, index: usize) -> Result<u8> {
        self.check_index(index)?;
        Ok(self.buffer.read_array::<1>(self.offset + index)?[0])
    }

    pub fn set(&self, index: usize, byte: u8) -> Result<()> {
        self.check_index(index)?;
        self.buffer.write_array(self.offset + index, [byte])
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer
            .with_bytes(|bytes| bytes[self.offset..self.offset + self.len].to_vec())
    }

    /// Runs `f` over the bytes of the block.
    ///
    /// While `f` runs, writes to the same buffer through views or other
    /// blocks fail with [`Error::BufferBusy`]. Copy the bytes out with
    /// [`to_vec`](ByteBlock::to_vec) to move them between fields.
    pub fn with<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
        self.buffer.with_range(self.offset, self.len, f)
    }

    /// Overwrites the whole block.
    ///
    /// Fails with [`Error::SizeMismatch`], without touching any byte, unless
    /// `src` is exactly as long as the block.
    pub fn copy_from_slice(&self, src: &[u8]) -> Result<()> {
        if src.len() != self.len {
            cold_path();
            return Err(Error::SizeMismatch {
                expected: self.len,
                actual: src.len(),
            });
        }
        self.buffer.write_bytes(self.offset, src)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            cold_path();
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ByteBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("ByteBlock");
        match self.with(|bytes| {
            tuple.field(&bytes);
        }) {
            Ok(()) => tuple.finish(),
            Err(_) => tuple.field(&format_args!("<busy>")).finish(),
        }
    }
}

impl PartialEq<[u8]> for ByteBlock {
    fn eq(&self, other: &[u8]) -> bool {
        self.with(|bytes| bytes == other).unwrap_or(false)
    }
}

impl PartialEq<&[u8]> for ByteBlock {
    fn eq(&self, other: &&[u8]) -> bool {
        self.with(|bytes| bytes == *other).unwrap_or(false)
    }
}
