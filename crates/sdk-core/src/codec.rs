//! # MessagePack Decoding
//!
//! A forward-only cursor over host buffers, built on `rmp::decode`. The format
//! does not describe record layouts: callers must invoke the reader matching
//! each field in the order the host wrote it.
//!
//! ## Supported Readers
//!
//! | Reader | Accepted markers | Notes |
//! |--------|------------------|-------|
//! | `read_u8` .. `read_u64` | any integer | value must be non-negative and fit |
//! | `read_i8` .. `read_i64` | any integer | value must fit |
//! | `read_f64` | float32, float64 | |
//! | `read_bool` | true, false | |
//! | `read_string` | fixstr, str8/16/32 | UTF-8 validated |
//! | `read_byte_array` | bin8/16/32 | raw form |
//! | `read_byte_list` | array of integers | one integer <= 255 per byte |
//! | `read_array_len` / `read_map_len` | fix, 16, 32 forms | |
//! | `peek_nil` / `try_read_nil` / `read_nil` | nil | |
//!
//! Records are decoded through the [`Decode`] trait; [`decode_collection`] handles
//! the outer array of a collection and the per-record array header.

use rmp::decode::bytes::BytesReadError;
use rmp::decode::{self as wire, Bytes, NumValueReadError, ValueReadError};
use rmp::Marker;
use tracing::warn;

use crate::config::SdkConfig;
use crate::errors::DecodeError;

// =============================================================================
// Buffers
// =============================================================================

/// An owned, immutable buffer copied out of host memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Start decoding from the first byte.
    pub fn decoder(&self, config: &SdkConfig) -> Decoder<'_> {
        Decoder::with_config(&self.data, config)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

// =============================================================================
// Decoder
// =============================================================================

/// Sequential MessagePack reader over [`rmp::decode::Bytes`]. The cursor only
/// moves forward.
///
/// Marker handling is delegated to `rmp::decode`; this type adds byte offsets to
/// errors, borrowed string/binary payloads and the nesting guard.
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    rd: Bytes<'a>,
    depth: usize,
    max_depth: usize,
    reject_trailing_bytes: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, &SdkConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: &SdkConfig) -> Self {
        Self {
            data,
            rd: Bytes::new(data),
            depth: 0,
            max_depth: config.max_value_depth,
            reject_trailing_bytes: config.reject_trailing_bytes,
        }
    }

    /// Current byte offset into the buffer.
    pub fn position(&self) -> usize {
        self.data.len() - self.remaining()
    }

    pub fn remaining(&self) -> usize {
        self.rd.remaining_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail if any bytes are left unread.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes {
                position: self.position(),
                remaining: self.remaining(),
            })
        }
    }

    /// Apply the configured trailing-byte policy once `what` has been decoded.
    ///
    /// Leftover bytes are logged, or rejected when `reject_trailing_bytes` is set.
    pub fn check_trailing(&self, what: &'static str) -> Result<(), DecodeError> {
        if self.is_empty() {
            return Ok(());
        }

        if self.reject_trailing_bytes {
            return self.finish();
        }

        warn!(
            position = self.position(),
            remaining = self.remaining(),
            "trailing bytes after {}",
            what
        );
        Ok(())
    }

    /// Run `f` one nesting level deeper, enforcing the configured depth limit.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }

    // -------------------------------------------------------------------------
    // Raw access
    // -------------------------------------------------------------------------

    /// Borrow the next `needed` payload bytes.
    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        let rest = self.rd.remaining_slice();
        if needed > rest.len() {
            return Err(DecodeError::UnexpectedEof {
                position: self.position(),
                needed,
                remaining: rest.len(),
            });
        }

        let (head, tail) = rest.split_at(needed);
        self.rd = Bytes::new(tail);

        Ok(head)
    }

    fn peek_marker(&self) -> Option<Marker> {
        self.rd.remaining_slice().first().map(|byte| Marker::from_u8(*byte))
    }

    /// A short read. `Bytes` checks before consuming, so `actual` is what was left.
    fn eof(&self, err: BytesReadError) -> DecodeError {
        match err {
            BytesReadError::InsufficientBytes {
                expected, actual, ..
            } => DecodeError::UnexpectedEof {
                position: self.data.len() - actual,
                needed: expected,
                remaining: actual,
            },
            _ => DecodeError::UnexpectedEof {
                position: self.data.len(),
                needed: 1,
                remaining: 0,
            },
        }
    }

    /// Run one `rmp` reader on a copy of the cursor, committing only on success.
    fn read_value<T>(
        &mut self,
        expected: &'static str,
        read: impl FnOnce(&mut Bytes<'a>) -> Result<T, ValueReadError<BytesReadError>>,
    ) -> Result<T, DecodeError> {
        let position = self.position();
        let mut rd = self.rd;

        let value = read(&mut rd).map_err(|err| match err {
            ValueReadError::InvalidMarkerRead(err) | ValueReadError::InvalidDataRead(err) => {
                self.eof(err)
            }
            ValueReadError::TypeMismatch(marker) => DecodeError::UnexpectedMarker {
                position,
                expected,
                marker: marker.to_u8(),
            },
        })?;

        self.rd = rd;
        Ok(value)
    }

    fn read_number<T>(
        &mut self,
        target: &'static str,
        read: impl FnOnce(&mut Bytes<'a>) -> Result<T, NumValueReadError<BytesReadError>>,
    ) -> Result<T, DecodeError> {
        let position = self.position();
        let mut rd = self.rd;

        let value = read(&mut rd).map_err(|err| match err {
            NumValueReadError::InvalidMarkerRead(err) | NumValueReadError::InvalidDataRead(err) => {
                self.eof(err)
            }
            NumValueReadError::TypeMismatch(marker) => DecodeError::UnexpectedMarker {
                position,
                expected: "integer",
                marker: marker.to_u8(),
            },
            NumValueReadError::OutOfRange => DecodeError::IntegerOutOfRange { position, target },
        })?;

        self.rd = rd;
        Ok(value)
    }

    // -------------------------------------------------------------------------
    // Nil and booleans
    // -------------------------------------------------------------------------

    /// Whether the next value is nil. Does not move the cursor.
    pub fn peek_nil(&self) -> bool {
        matches!(self.peek_marker(), Some(Marker::Null))
    }

    /// Consume a nil marker if one is next. Returns whether it was consumed.
    pub fn try_read_nil(&mut self) -> bool {
        self.peek_nil() && self.read_nil().is_ok()
    }

    pub fn read_nil(&mut self) -> Result<(), DecodeError> {
        self.read_value("nil", |rd| wire::read_nil(rd))
    }

    /// Decode an optional field: nil yields `None`, anything else goes to `read`.
    pub fn read_optional<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.try_read_nil() {
            Ok(None)
        } else {
            read(self).map(Some)
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        self.read_value("bool", |rd| wire::read_bool(rd))
    }

    // -------------------------------------------------------------------------
    // Numbers
    // -------------------------------------------------------------------------

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_number("u8", |rd| wire::read_int(rd))
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_number("u16", |rd| wire::read_int(rd))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_number("u32", |rd| wire::read_int(rd))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.read_number("u64", |rd| wire::read_int(rd))
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        self.read_number("i8", |rd| wire::read_int(rd))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.read_number("i16", |rd| wire::read_int(rd))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.read_number("i32", |rd| wire::read_int(rd))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.read_number("i64", |rd| wire::read_int(rd))
    }

    /// Read a float32 or float64.
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        match self.peek_marker() {
            Some(Marker::F32) => self
                .read_value("float", |rd| wire::read_f32(rd))
                .map(f64::from),
            _ => self.read_value("float", |rd| wire::read_f64(rd)),
        }
    }

    // -------------------------------------------------------------------------
    // Strings and bytes
    // -------------------------------------------------------------------------

    pub fn read_str(&mut self) -> Result<&'a str, DecodeError> {
        let len = self.read_value("string", |rd| wire::read_str_len(rd))? as usize;
        let start = self.position();
        let bytes = self.take(len)?;

        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { position: start })
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        self.read_str().map(str::to_owned)
    }

    /// Read a raw `bin` payload.
    pub fn read_byte_array(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_value("binary", |rd| wire::read_bin_len(rd))? as usize;
        Ok(self.take(len)?.to_vec())
    }

    /// Read bytes written as an array of integers, one per byte.
    ///
    /// Hosts serializing `Vec<u8>` without a `bin` hint produce this form; values
    /// 128..=255 arrive as `uint8`, not as positive fixints.
    pub fn read_byte_list(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_array_len()? as usize;
        let mut bytes = Vec::with_capacity(len.min(self.remaining()));

        for _ in 0..len {
            bytes.push(self.read_u8()?);
        }

        Ok(bytes)
    }

    // -------------------------------------------------------------------------
    // Containers
    // -------------------------------------------------------------------------

    pub fn read_array_len(&mut self) -> Result<u32, DecodeError> {
        self.read_value("array", |rd| wire::read_array_len(rd))
    }

    pub fn read_map_len(&mut self) -> Result<u32, DecodeError> {
        self.read_value("map", |rd| wire::read_map_len(rd))
    }

    /// Read an array header followed by `len` elements decoded with `read`.
    pub fn read_array<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let len = self.read_array_len()? as usize;
        // Every element takes at least one byte, so this never over-allocates.
        let mut items = Vec::with_capacity(len.min(self.remaining()));

        for _ in 0..len {
            items.push(read(self)?);
        }

        Ok(items)
    }
}

// =============================================================================
// Records
// =============================================================================

/// A record with a fixed wire field order.
pub trait Decode: Sized {
    /// Read the record's fields. The per-record array header has already been consumed.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}

/// Decode a whole collection: an outer array whose elements are field arrays.
///
/// The inner array length is read and discarded; field order is the contract.
pub fn decode_collection<T: Decode>(bytes: &[u8], config: &SdkConfig) -> Result<Vec<T>, DecodeError> {
    let mut decoder = Decoder::with_config(bytes, config);

    let records = decoder.read_array(|decoder| {
        let _ = decoder.read_array_len()?;
        T::decode(decoder)
    })?;

    decoder.check_trailing("collection")?;

    Ok(records)
}

// =============================================================================
// Tests
// =============================================================================
