pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

mod array;
mod buffer;
pub mod codec;
mod config;
mod error;
mod record;
pub mod schema;
#[cfg(feature = "serde")]
mod ser;
mod util;
mod value;

pub use array::*;
pub use buffer::*;
pub use codec::*;
pub use config::*;
pub use error::*;
pub use record::*;
pub use schema::*;
pub use util::*;
pub use value::*;
