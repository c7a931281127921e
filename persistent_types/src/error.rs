use crate::descriptor::EntryKind;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Expected a {expected} descriptor entry, found {found}")]
    StructuralMismatch {
        expected: EntryKind,
        found: EntryKind,
    },

    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Buffer overflow: {needed} bytes needed, {available} available")]
    BufferOverflow { needed: usize, available: usize },

    #[error("Invalid format string: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
