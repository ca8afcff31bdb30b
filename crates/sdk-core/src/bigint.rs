//! 256-bit integers carried in hex strings.
//!
//! Unsigned values use [`U256`] from `primitive-types`. Signed values are the
//! same 256 bits read as two's complement, wrapped in [`I256`].

use std::fmt;

pub use primitive_types::U256;

use crate::encoding::strip_hex_prefix;
use crate::errors::DecodeError;

const MAX_HEX_DIGITS: usize = 64;

/// Parse a big-endian hex string, with or without `0x`, into a [`U256`].
///
/// Leading zeros are accepted. An empty digit string, more than 64 digits or
/// anything other than hex digits after the prefix is rejected.
pub fn hex_to_u256(input: &str) -> Result<U256, DecodeError> {
    let digits = strip_hex_prefix(input);

    if digits.is_empty()
        || digits.len() > MAX_HEX_DIGITS
        || !digits.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(DecodeError::InvalidHex(input.to_string()));
    }

    U256::from_str_radix(digits, 16).map_err(|_| DecodeError::InvalidHex(input.to_string()))
}

/// A signed 256-bit integer stored as its two's-complement bit pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct I256(U256);

impl I256 {
    pub const ZERO: I256 = I256(U256::zero());

    pub fn from_bits(bits: U256) -> Self {
        Self(bits)
    }

    pub fn into_bits(self) -> U256 {
        self.0
    }

    /// Parse the two's-complement hex form used by the host.
    pub fn from_hex(input: &str) -> Result<Self, DecodeError> {
        hex_to_u256(input).map(Self)
    }

    pub fn is_negative(&self) -> bool {
        self.0.bit(255)
    }

    /// Magnitude of the value. `I256::MIN` maps to `2^255`.
    pub fn unsigned_abs(&self) -> U256 {
        if self.is_negative() {
            (!self.0).overflowing_add(U256::one()).0
        } else {
            self.0
        }
    }

    /// Narrow to `i64` if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        let magnitude = self.unsigned_abs();
        if magnitude.bits() > 64 {
            return None;
        }

        let low = magnitude.low_u64();
        if self.is_negative() {
            if low <= i64::MAX as u64 {
                Some(-(low as i64))
            } else if low == 1u64 << 63 {
                Some(i64::MIN)
            } else {
                None
            }
        } else {
            i64::try_from(low).ok()
        }
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        let magnitude = U256::from(value.unsigned_abs());
        if value < 0 {
            Self((!magnitude).overflowing_add(U256::one()).0)
        } else {
            Self(magnitude)
        }
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.unsigned_abs())
        } else {
            write!(f, "{}", self.0)
        }
    }
}
