//! Error types shared by the decoder, the value model and the host bridge.
//!
//! # Error Taxonomy
//!
//! | Error | Raised by | Recoverable |
//! |-------|-----------|-------------|
//! | [`DecodeError`] | [`Decoder`](crate::codec::Decoder), value decoding | No, aborts the enclosing load |
//! | [`ValueError`] | typed accessors on [`Value`](crate::value::Value) | Yes |
//! | [`HostError`] | [`Host`](crate::host::Host) implementations | No, aborts the invocation |
//!
//! Join misses are not errors: they produce empty results.

use thiserror::Error;

/// A malformed, truncated or unexpected MessagePack buffer.
///
/// Positions are byte offsets into the buffer being decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of buffer at {position}: needed {needed} byte(s), {remaining} remaining")]
    UnexpectedEof {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("expected {expected} at {position}, found marker 0x{marker:02x}")]
    UnexpectedMarker {
        position: usize,
        expected: &'static str,
        marker: u8,
    },

    #[error("integer at {position} does not fit into {target}")]
    IntegerOutOfRange {
        position: usize,
        target: &'static str,
    },

    #[error("invalid UTF-8 string at {position}")]
    InvalidUtf8 { position: usize },

    #[error("invalid hex integer '{0}'")]
    InvalidHex(String),

    #[error("unknown `Value` type: {0}")]
    UnknownValueTag(String),

    #[error("value tag map at {position} must have exactly one entry, found {len}")]
    InvalidTagMap { position: usize, len: u32 },

    #[error("struct value at {position} must be a 2-element array, found {len}")]
    InvalidStructArity { position: usize, len: u32 },

    #[error("value nesting exceeds the configured depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("{remaining} trailing byte(s) after decoding at {position}")]
    TrailingBytes { position: usize, remaining: usize },
}

/// A typed accessor was called on a [`Value`](crate::value::Value) of another variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("wrong value variant: expected {expected}, found {found}")]
    WrongVariant {
        expected: &'static str,
        found: &'static str,
    },
}

/// Failures reported by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("memory read out of bounds: offset {offset}, length {length}, memory size {memory_size}")]
    OutOfBounds {
        offset: u32,
        length: u32,
        memory_size: usize,
    },

    #[error("No parameter found with key \"{0}\"")]
    MissingParameter(String),
}
