//! Byte sinks and sources.
//!
//! The codec writes through [`BinaryWrite`] and reads through [`BinaryRead`].
//! Both are implemented over fixed buffers ([`BufferWriter`], [`BufferReader`]),
//! over any `std::io` stream ([`StreamWriter`], [`StreamReader`]), and, for
//! writing, over `Vec<u8>`.

mod binary;
mod buffer_stream;
mod memory_stream;
mod stream;

pub use binary::*;
pub use buffer_stream::*;
pub use memory_stream::*;
pub use stream::*;
