use std::{fmt, marker::PhantomData};

use zerocopy::byteorder;

use crate::{Buffer, ByteOrder, Codec, Endian, Result, Value, ValueView};

/// A fixed-width number stored in the buffer.
pub(crate) trait Scalar: 'static {
    const KIND: &'static str;
    const SIZE: usize;

    fn read(buffer: &Buffer, offset: usize) -> Result<Value>;

    /// Converts `value` first, so nothing is written when it does not fit.
    fn write(buffer: &Buffer, offset: usize, value: &Value) -> Result<()>;
}

macro_rules! single_byte {
    ($native:ty, $variant:ident, $kind:literal) => {
        impl Scalar for $native {
            const KIND: &'static str = $kind;
            const SIZE: usize = 1;

            #[inline]
            fn read(buffer: &Buffer, offset: usize) -> Result<Value> {
                Ok(Value::$variant(<$native>::from_ne_bytes(
                    buffer.read_array::<1>(offset)?,
                )))
            }

            #[inline]
            fn write(buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
                let native: $native = value.to_integer(Self::KIND)?;
                buffer.write_array(offset, native.to_ne_bytes())
            }
        }
    };
}

single_byte!(i8, I8, "i8");
single_byte!(u8, U8, "u8");

macro_rules! ordered_integer {
    ($wrapper:ident, $native:ty, $size:literal, $variant:ident, $kind:literal) => {
        impl<O: ByteOrder> Scalar for byteorder::$wrapper<O> {
            const KIND: &'static str = $kind;
            const SIZE: usize = $size;

            #[inline]
            fn read(buffer: &Buffer, offset: usize) -> Result<Value> {
                let bytes = buffer.read_array::<$size>(offset)?;
                Ok(Value::$variant(
                    byteorder::$wrapper::<O>::from_bytes(bytes).get(),
                ))
            }

            #[inline]
            fn write(buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
                let native: $native = value.to_integer(Self::KIND)?;
                buffer.write_array(offset, byteorder::$wrapper::<O>::new(native).to_bytes())
            }
        }
    };
}

ordered_integer!(I16, i16, 2, I16, "i16");
ordered_integer!(U16, u16, 2, U16, "u16");
ordered_integer!(I32, i32, 4, I32, "i32");
ordered_integer!(U32, u32, 4, U32, "u32");
ordered_integer!(I64, i64, 8, I64, "i64");
ordered_integer!(U64, u64, 8, U64, "u64");
#[cfg(feature = "i128")]
ordered_integer!(I128, i128, 16, I128, "i128");
#[cfg(feature = "i128")]
ordered_integer!(U128, u128, 16, U128, "u128");

macro_rules! ordered_float {
    ($wrapper:ident, $size:literal, $variant:ident, $kind:literal, $convert:ident) => {
        impl<O: ByteOrder> Scalar for byteorder::$wrapper<O> {
            const KIND: &'static str = $kind;
            const SIZE: usize = $size;

            #[inline]
            fn read(buffer: &Buffer, offset: usize) -> Result<Value> {
                let bytes = buffer.read_array::<$size>(offset)?;
                Ok(Value::$variant(
                    byteorder::$wrapper::<O>::from_bytes(bytes).get(),
                ))
            }

            #[inline]
            fn write(buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
                let native = value.$convert(Self::KIND)?;
                buffer.write_array(offset, byteorder::$wrapper::<O>::new(native).to_bytes())
            }
        }
    };
}

ordered_float!(F32, 4, F32, "f32", to_f32);
ordered_float!(F64, 8, F64, "f64", to_f64);

pub(crate) struct ScalarCodec<T> {
    endian: Endian,
    _marker: PhantomData<T>,
}

impl<T: Scalar> ScalarCodec<T> {
    pub(crate) fn new(endian: Endian) -> Self {
        Self {
            endian,
            _marker: PhantomData,
        }
    }
}

impl<T: Scalar> fmt::Debug for ScalarCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if T::SIZE == 1 {
            f.write_str(T::KIND)
        } else {
            write!(f, "{}({:?})", T::KIND, self.endian)
        }
    }
}

impl<T: Scalar> Codec for ScalarCodec<T> {
    #[inline]
    fn size(&self) -> usize {
        T::SIZE
    }

    #[inline]
    fn get(&self, buffer: &Buffer, offset: usize) -> Result<ValueView> {
        T::read(buffer, offset).map(ValueView::Plain)
    }

    #[inline]
    fn set(&self, buffer: &Buffer, offset: usize, value: &Value) -> Result<()> {
        T::write(buffer, offset, value)
    }

    #[inline]
    fn kind(&self) -> &'static str {
        T::KIND
    }
}
