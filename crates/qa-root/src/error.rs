//! Error type for container reading.

use thiserror::Error;

/// Errors produced while opening or reading a results container.
#[derive(Error, Debug)]
pub enum RootError {
    /// The file does not start with the ROOT magic bytes.
    #[error("not a ROOT file (bad magic)")]
    BadMagic,

    /// A read ran past the end of the available bytes.
    #[error("buffer underflow at offset {offset}: need {need} bytes, have {have}")]
    BufferUnderflow {
        /// Offset of the failed read.
        offset: usize,
        /// Bytes requested.
        need: usize,
        /// Bytes remaining.
        have: usize,
    },

    /// A named key was not found in its directory.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The stored object's class has no reader.
    #[error("unsupported object class: {0}")]
    UnsupportedClass(String),

    /// Malformed streamer data.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Compressed payload could not be inflated.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RootError>;
