/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{Error, Result};
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`BitRead`] and [`BitSeek`] for a slice of bytes.
///
/// The endianness parameter selects the bit order within each byte:
/// [`BE`] reads from the most significant bit, [`LE`] from the least
/// significant one. Bytes are always consumed in increasing order.
///
/// Once every bit has been read the reader is at end of data, and further
/// reads fail with [`Error::EndOfData`].
///
/// # Example
/// ```
/// use binio::prelude::*;
///
/// let bytes = [0b0110_0001, 0b0111_1111, 0b0000_0000, 0b0110_1000];
/// let mut reader = <BitReader<BE, _>>::new(&bytes);
/// assert!(!reader.read_bit().unwrap());
/// assert!(reader.read_bit().unwrap());
/// assert_eq!(reader.read_int(6).unwrap(), 0b10_0001);
/// assert_eq!(reader.byte_pos(), 1);
/// assert_eq!(reader.read_int(24).unwrap(), 0x7F0068);
/// assert!(reader.is_at_end());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitReader<E: Endianness, B: AsRef<[u8]>> {
    /// The bytes we read bits from.
    data: B,
    /// The index of the current byte.
    byte_index: usize,
    /// The number of bits already read from the current byte, in `0..8`.
    bit_offset: u8,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness, B: AsRef<[u8]>> BitReader<E, B> {
    /// Create a new [`BitReader`] positioned at the first bit of `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
            bit_offset: 0,
            _marker: core::marker::PhantomData,
        }
    }

    /// The index of the byte containing the next bit.
    #[inline(always)]
    pub fn byte_pos(&self) -> usize {
        self.byte_index
    }

    /// The number of bits already read from the current byte.
    #[inline(always)]
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// Whether every bit has been read.
    #[inline(always)]
    pub fn is_at_end(&self) -> bool {
        self.byte_index == self.data.as_ref().len()
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<E: Endianness, B: AsRef<[u8]>> BitRead<E> for BitReader<E, B> {
    #[inline]
    fn read_bit(&mut self) -> Result<bool> {
        let data = self.data.as_ref();
        let Some(&byte) = data.get(self.byte_index) else {
            return Err(Error::EndOfData {
                pos: self.byte_index as u64,
                requested: 1,
                len: data.len() as u64,
            });
        };
        let value = byte & (1 << E::bit_index(self.bit_offset)) != 0;
        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.byte_index += 1;
            self.bit_offset = 0;
        }
        Ok(value)
    }
}

impl<E: Endianness, B: AsRef<[u8]>> BitSeek for BitReader<E, B> {
    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.byte_index as u64 * 8 + self.bit_offset as u64
    }

    /// Fails with [`Error::SeekOutOfBounds`], whose fields are in bits, if
    /// `bit_pos` is past the last bit.
    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<()> {
        let len = self.data.as_ref().len() as u64 * 8;
        if bit_pos > len {
            return Err(Error::SeekOutOfBounds { pos: bit_pos, len });
        }
        self.byte_index = (bit_pos / 8) as usize;
        self.bit_offset = (bit_pos % 8) as u8;
        Ok(())
    }
}
