/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use num_traits::ops::bytes::{FromBytes, ToBytes};

/// Inner private trait used to make implementing [`Endianness`]
/// impossible for other structs.
mod private {
    /// This is a [SealedTrait](https://predr.ag/blog/definitive-guide-to-sealed-traits-in-rust/).
    pub trait Sealed {}
}

/// Marker trait for endianness selector types.
///
/// Its only implementations are [`LittleEndian`] and [`BigEndian`].
///
/// For byte streams the selector decides the order in which the bytes of a
/// multi-byte scalar are assembled. For bit streams it decides which bit of
/// a byte is read first: [`BigEndian`] reads from the most significant bit,
/// [`LittleEndian`] from the least significant one.
pub trait Endianness: private::Sealed + 'static {
    /// Human-readable name of the selector.
    const NAME: &'static str;

    /// Decode a scalar from its byte representation in this endianness.
    fn decode<T: FromBytes>(bytes: &T::Bytes) -> T;

    /// Encode a scalar into its byte representation in this endianness.
    fn encode<T: ToBytes>(value: &T) -> T::Bytes;

    /// The index, counting from the least significant bit, of the `k`-th bit
    /// read from a byte.
    fn bit_index(k: u8) -> u8;
}

/// Selector type for little-endian streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndian;

/// Selector type for big-endian streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigEndian;

/// Alias for [`BigEndian`]
pub type BE = BigEndian;

/// Alias for [`LittleEndian`]
pub type LE = LittleEndian;

impl private::Sealed for LittleEndian {}
impl private::Sealed for BigEndian {}

impl Endianness for LittleEndian {
    const NAME: &'static str = "little";

    #[inline(always)]
    fn decode<T: FromBytes>(bytes: &T::Bytes) -> T {
        T::from_le_bytes(bytes)
    }

    #[inline(always)]
    fn encode<T: ToBytes>(value: &T) -> T::Bytes {
        value.to_le_bytes()
    }

    #[inline(always)]
    fn bit_index(k: u8) -> u8 {
        k
    }
}

impl Endianness for BigEndian {
    const NAME: &'static str = "big";

    #[inline(always)]
    fn decode<T: FromBytes>(bytes: &T::Bytes) -> T {
        T::from_be_bytes(bytes)
    }

    #[inline(always)]
    fn encode<T: ToBytes>(value: &T) -> T::Bytes {
        value.to_be_bytes()
    }

    #[inline(always)]
    fn bit_index(k: u8) -> u8 {
        7 - k
    }
}
