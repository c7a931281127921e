//! Self-describing binary persistence.
//!
//! A list of values is persisted as two independent byte strings:
//!
//! - a *descriptor*, derived purely from the static types of the values
//!   (see [`descriptor`]), and
//! - a *payload*, the values themselves in a compact little-endian layout
//!   (see [`dispatch`]).
//!
//! Holders of only the raw bytes can walk the descriptor with a
//! [`DescriptorCursor`], and decode the payload dynamically with [`Value`].

pub mod descriptor;
pub mod dispatch;
mod error;
pub mod format;
pub mod io;
pub mod types;
pub mod value;
pub mod varint;

pub use descriptor::{Descriptor, DescriptorCursor, Entry, EntryKind};
pub use dispatch::{ReadLen, WriteLen};
pub use error::*;
pub use format::{Persist, PersistRead, ReadArgs, TypeList};
pub use types::*;
pub use value::{Printer, Value};
