/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

/// Hexadecimal rendering of integers.
pub trait ToHex {
    /// Uppercase hex, zero-padded to two digits per byte of the type, no prefix.
    fn to_whex(&self) -> String;

    /// Uppercase hex with a `0x` prefix and no padding. Signed values are
    /// rendered as their two's complement bit pattern.
    fn to_hex(&self) -> String;
}

macro_rules! impl_to_hex {
    ($($ty:ty => $unsigned:ty),*) => {$(
        impl ToHex for $ty {
            #[inline]
            fn to_whex(&self) -> String {
                format!("{:0width$X}", *self as $unsigned, width = 2 * size_of::<$ty>())
            }

            #[inline]
            fn to_hex(&self) -> String {
                format!("0x{:X}", *self as $unsigned)
            }
        }
    )*};
}

impl_to_hex!(
    u8 => u8, u16 => u16, u32 => u32, u64 => u64,
    i8 => u8, i16 => u16, i32 => u32, i64 => u64
);

/// Uppercase hex with a `0x` prefix, and a leading minus sign for negative
/// values.
pub fn to_signed_hex(value: i64) -> String {
    if value >= 0 {
        format!("0x{:X}", value)
    } else {
        format!("-0x{:X}", value.unsigned_abs())
    }
}

/// Render `bytes` as two uppercase hex digits per byte, without separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}
