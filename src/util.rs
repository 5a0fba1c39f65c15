#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

pub trait ByteOrder: zerocopy::ByteOrder + 'static {}

impl<T: zerocopy::ByteOrder + 'static> ByteOrder for T {}
