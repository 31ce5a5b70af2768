/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{Error, Result};
use crate::traits::Endianness;

/// The largest number of bits [`BitRead::read_int`] can assemble.
pub const MAX_INT_BITS: usize = 32;

/// Sequential, streaming bit-by-bit reads.
///
/// The endianness parameter `E` selects which bit of each byte is consumed
/// first. It does not affect how the bits are packed by
/// [`read_byte`](BitRead::read_byte) and [`read_int`](BitRead::read_int):
/// the first bit read always becomes the most significant bit of the result.
pub trait BitRead<E: Endianness> {
    /// Read the next bit.
    fn read_bit(&mut self) -> Result<bool>;

    /// Read 8 bits and pack them most significant bit first.
    fn read_byte(&mut self) -> Result<u8> {
        let mut value = 0;
        for k in 0..8 {
            value |= (self.read_bit()? as u8) << (7 - k);
        }
        Ok(value)
    }

    /// Read `n_bits` bits, with `n_bits` at most [`MAX_INT_BITS`], and pack
    /// them most significant bit first.
    fn read_int(&mut self, n_bits: usize) -> Result<u32> {
        if n_bits > MAX_INT_BITS {
            return Err(Error::InvalidBitWidth {
                bits: n_bits,
                max: MAX_INT_BITS,
            });
        }
        let mut value = 0;
        for k in 0..n_bits {
            value |= (self.read_bit()? as u32) << (n_bits - 1 - k);
        }
        Ok(value)
    }
}

/// Seekability for [`BitRead`] streams.
pub trait BitSeek {
    /// Get the current position in bits from the start of the stream.
    fn bit_pos(&self) -> u64;

    /// Set the current position in bits from the start of the stream to `bit_pos`.
    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<()>;
}
