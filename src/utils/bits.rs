/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{Error, Result};

/// Range-checked manipulation of single bits of an integer.
///
/// Bits are indexed from the least significant one, starting at zero. Every
/// method fails with [`Error::OutOfRange`] if the index is not smaller than
/// [`BitOps::WIDTH`].
pub trait BitOps: Sized {
    /// Number of bits of the type.
    const WIDTH: u32;

    fn is_bit_set(self, bit: u32) -> Result<bool>;
    fn set_bit(self, bit: u32) -> Result<Self>;
    fn toggle_bit(self, bit: u32) -> Result<Self>;
    fn reset_bit(self, bit: u32) -> Result<Self>;
}

#[inline(always)]
fn check_in_range(bit: u32, width: u32) -> Result<()> {
    if bit >= width {
        return Err(Error::OutOfRange { index: bit, width });
    }
    Ok(())
}

macro_rules! impl_bit_ops {
    ($($ty:ty),*) => {$(
        impl BitOps for $ty {
            const WIDTH: u32 = <$ty>::BITS;

            #[inline]
            fn is_bit_set(self, bit: u32) -> Result<bool> {
                check_in_range(bit, Self::WIDTH)?;
                Ok(self & (1 << bit) != 0)
            }

            #[inline]
            fn set_bit(self, bit: u32) -> Result<Self> {
                check_in_range(bit, Self::WIDTH)?;
                Ok(self | (1 << bit))
            }

            #[inline]
            fn toggle_bit(self, bit: u32) -> Result<Self> {
                check_in_range(bit, Self::WIDTH)?;
                Ok(self ^ (1 << bit))
            }

            #[inline]
            fn reset_bit(self, bit: u32) -> Result<Self> {
                check_in_range(bit, Self::WIDTH)?;
                Ok(self & !(1 << bit))
            }
        }
    )*};
}

impl_bit_ops!(u8, u32);

/// The bits of a byte; index `i` holds bit `i`.
pub fn byte_bits(value: u8) -> [bool; 8] {
    core::array::from_fn(|bit| value & (1 << bit) != 0)
}

/// The lower 16 bits of a word.
#[inline(always)]
pub fn low_bits(value: u32) -> u32 {
    value & 0xFFFF
}

/// The upper 16 bits of a word.
#[inline(always)]
pub fn high_bits(value: u32) -> u32 {
    value >> 16
}

/// Reverse the byte order of a word.
#[inline(always)]
pub fn swap_bytes(value: u32) -> u32 {
    value.swap_bytes()
}
