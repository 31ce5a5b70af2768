/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

/// Errors returned by the streams of this crate.
///
/// Every variant carries enough context to identify the failing condition;
/// nothing is retried or partially recovered.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A read needed more bytes (or bits) than the source has left.
    #[error(
        "Unexpected end of data: requested {requested} byte(s) at position {pos}, but the source ends at {len}"
    )]
    EndOfData { pos: u64, requested: u64, len: u64 },

    /// A bit width larger than the supported maximum was requested.
    #[error("Invalid bit width {bits}: at most {max} bits can be read at once")]
    InvalidBitWidth { bits: usize, max: usize },

    /// A bit index outside of the valid range of the value.
    #[error("Bit index {index} out of range: it must be >= 0 and < {width}")]
    OutOfRange { index: u32, width: u32 },

    /// A position cannot be represented with 32 bits.
    #[error("Position {pos} does not fit in 32 bits, use the 64-bit position instead")]
    PositionOverflow { pos: u64 },

    /// The operation was attempted on a resource that was already closed.
    #[error("Cannot {op}: the resource has been closed")]
    ClosedResource { op: &'static str },

    /// A seek beyond the end of a source that cannot grow.
    #[error("Position {pos} is beyond the end of the source ({len} bytes)")]
    SeekOutOfBounds { pos: u64, len: u64 },

    /// Alignment to a zero boundary.
    #[error("Invalid alignment {pad}: the boundary must be nonzero")]
    InvalidAlignment { pad: u64 },

    /// An encoded string does not fit in its fixed-length field.
    #[error("Encoded string is {len} bytes long, but the field is only {max} bytes")]
    StringTooLong { len: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
