/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::charset::Charset;
use crate::error::{Error, Result};
use crate::impls::{ByteCursor, MemByteReader};
use crate::traits::*;
use crate::utils::{align_up, bytes_to_hex, find_bytes_in};
use num_traits::ops::bytes::FromBytes;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sequential and random-access decoding of scalars and strings from a
/// [`ByteRead`] of known length.
///
/// The endianness parameter `E` is fixed for the whole life of the reader
/// and applies to every multi-byte scalar. The position is the one of the
/// underlying source; the reader only adds the knowledge of where the data
/// ends, so that a read past the end fails with [`Error::EndOfData`] before
/// touching the source.
///
/// Methods that move to an absolute address (the `read_*_at` family,
/// [`temporary_jump`](BinaryReader::temporary_jump),
/// [`skip_while_byte_equals`](BinaryReader::skip_while_byte_equals)) need a
/// source that is also a [`ByteSeek`].
///
/// A reader is not thread-safe: it must be used by one thread at a time.
///
/// # Example
/// ```
/// use binio::prelude::*;
///
/// let bytes = [0x2A, 0x00, b'h', b'i', 0x00, 0x10, 0x20, 0x30, 0x40];
/// let mut reader = <BinaryReader<LE, _>>::from_bytes(&bytes);
///
/// assert_eq!(reader.read_u16().unwrap(), 42);
/// assert_eq!(reader.read_null_terminated_string(Charset::Utf8).unwrap(), "hi");
/// assert_eq!(reader.read_u32_at(5).unwrap(), 0x40302010);
/// assert_eq!(reader.byte_pos(), 5);
/// assert_eq!(reader.read_bytes_as_hex(4).unwrap(), "10203040");
/// assert!(reader.is_at_end());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<E: Endianness, S> {
    source: S,
    len: u64,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness, S: ByteSeek> BinaryReader<E, S> {
    /// Create a new [`BinaryReader`] over a seekable source, whose length is
    /// asked to the source.
    pub fn new(mut source: S) -> Result<Self> {
        let len = source.byte_len()?;
        Ok(Self::with_len(source, len))
    }
}

impl<E: Endianness, S> BinaryReader<E, S> {
    /// Create a new [`BinaryReader`] over a source of the given length.
    ///
    /// This is the constructor for streaming sources, whose length cannot be
    /// asked. Pass [`u64::MAX`] if the length is unknown: reads past the end
    /// of the data will then be reported by the source itself.
    pub fn with_len(source: S, len: u64) -> Self {
        Self {
            source,
            len,
            _marker: core::marker::PhantomData,
        }
    }

    /// The total length of the data in bytes.
    #[inline(always)]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Consume the reader, returning the source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<E: Endianness, B: AsRef<[u8]>> BinaryReader<E, MemByteReader<B>> {
    /// Create a new [`BinaryReader`] over bytes in memory.
    pub fn from_bytes(data: B) -> Self {
        let source = MemByteReader::new(data);
        let len = source.len() as u64;
        Self::with_len(source, len)
    }
}

impl<E: Endianness> BinaryReader<E, ByteCursor<BufReader<File>>> {
    /// Open a file for reading.
    ///
    /// The file is closed when the reader is dropped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        log::debug!(
            "Opened {} for reading ({} bytes, {}-endian)",
            path.as_ref().display(),
            len,
            E::NAME
        );
        Ok(Self::with_len(ByteCursor::new(BufReader::new(file)), len))
    }
}

impl<E: Endianness, S: BytePos> BinaryReader<E, S> {
    /// The current position in bytes.
    #[inline(always)]
    pub fn byte_pos(&self) -> u64 {
        self.source.byte_pos()
    }

    /// The current position as a 32-bit value.
    ///
    /// Fails with [`Error::PositionOverflow`] if the position does not fit.
    #[inline(always)]
    pub fn pos32(&self) -> Result<u32> {
        self.source.pos32()
    }

    /// Whether the current position is the end of the data.
    #[inline(always)]
    pub fn is_at_end(&self) -> bool {
        self.byte_pos() >= self.len
    }

    /// Fail unless `n` more bytes are available.
    #[inline]
    fn ensure(&self, n: u64) -> Result<()> {
        let pos = self.byte_pos();
        if n > self.len.saturating_sub(pos) {
            return Err(Error::EndOfData {
                pos,
                requested: n,
                len: self.len,
            });
        }
        Ok(())
    }
}

macro_rules! read_scalars {
    ($($read:ident, $read_at:ident => $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Read a `", stringify!($ty), "`.")]
        #[inline]
        pub fn $read(&mut self) -> Result<$ty> {
            self.read_scalar::<$ty>()
        }
    )*};
}

macro_rules! read_scalars_at {
    ($($read:ident, $read_at:ident => $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Read a `", stringify!($ty), "` at `addr`, leaving the position unchanged.")]
        #[inline]
        pub fn $read_at(&mut self, addr: u64) -> Result<$ty> {
            self.temporary_jump(addr, |reader| reader.$read())
        }
    )*};
}

macro_rules! for_all_scalars {
    ($mac:ident) => {
        $mac!(
            read_u8, read_u8_at => u8,
            read_i8, read_i8_at => i8,
            read_u16, read_u16_at => u16,
            read_i16, read_i16_at => i16,
            read_u32, read_u32_at => u32,
            read_i32, read_i32_at => i32,
            read_u64, read_u64_at => u64,
            read_i64, read_i64_at => i64,
            read_f32, read_f32_at => f32,
            read_f64, read_f64_at => f64,
        );
    };
}

impl<E: Endianness, S: ByteRead> BinaryReader<E, S> {
    /// Fill `buf` with the next bytes.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.ensure(buf.len() as u64)?;
        self.source.read_exact(buf)
    }

    /// Read the next `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure(count as u64)?;
        let mut bytes = vec![0; count];
        self.source.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Read any primitive number in the endianness of the reader.
    #[inline]
    pub fn read_scalar<T: FromBytes>(&mut self) -> Result<T>
    where
        T::Bytes: Sized + Default,
    {
        let mut bytes = <T::Bytes as Default>::default();
        self.read_exact(bytes.as_mut())?;
        Ok(E::decode::<T>(&bytes))
    }

    for_all_scalars!(read_scalars);

    /// Read bytes up to a zero byte, which is consumed but not included, and
    /// decode them.
    pub fn read_null_terminated_string(&mut self, charset: Charset) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            match self.read_u8()? {
                0 => break,
                b => bytes.push(b),
            }
        }
        Ok(charset.decode(&bytes))
    }

    /// Read pairs of bytes up to a pair of zero bytes, which is consumed but
    /// not included, and decode them.
    ///
    /// This is the terminator of wide encodings such as UTF-16: a zero byte
    /// inside a pair does not end the string.
    pub fn read_double_null_terminated_string(&mut self, charset: Charset) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            let mut pair = [0; 2];
            self.read_exact(&mut pair)?;
            if pair == [0, 0] {
                break;
            }
            bytes.extend_from_slice(&pair);
        }
        Ok(charset.decode(&bytes))
    }

    /// Read exactly `len` bytes and decode them.
    pub fn read_fixed_string(&mut self, len: usize, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.read_bytes(len)?))
    }

    /// Read exactly `len` bytes, decode them, and remove every NUL character
    /// from the result (not only the trailing ones).
    pub fn read_fixed_string_trimmed(&mut self, len: usize, charset: Charset) -> Result<String> {
        Ok(self.read_fixed_string(len, charset)?.replace('\0', ""))
    }

    /// Read `count` bytes and render them as uppercase hex digits, two per
    /// byte, without separators.
    pub fn read_bytes_as_hex(&mut self, count: usize) -> Result<String> {
        Ok(bytes_to_hex(&self.read_bytes(count)?))
    }

    /// Advance by `n` bytes without interpreting them.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        self.ensure(n)?;
        self.source.skip_bytes(n)
    }

    /// Skip to the next multiple of `pad`; does nothing if the position is
    /// already aligned. The skipped bytes are not checked.
    pub fn align(&mut self, pad: u64) -> Result<()> {
        let pos = self.byte_pos();
        let target = align_up(pos, pad)?;
        self.skip(target - pos)
    }
}

impl<E: Endianness, S: ByteRead + ByteSeek> BinaryReader<E, S> {
    /// Move to the absolute position `pos`, which must be within the data.
    pub fn set_byte_pos(&mut self, pos: u64) -> Result<()> {
        if pos > self.len {
            return Err(Error::SeekOutOfBounds { pos, len: self.len });
        }
        self.source.set_byte_pos(pos)
    }

    for_all_scalars!(read_scalars_at);

    /// Run `body` with the reader moved to `addr`, then move back to the
    /// current position.
    ///
    /// The position is restored even if `body` fails; in that case the error
    /// of `body` is returned. Jumps can be nested.
    ///
    /// # Example
    /// ```
    /// use binio::prelude::*;
    ///
    /// // a table of two little-endian offsets followed by the strings
    /// let bytes = b"\x04\x00\x07\x00ab\0cd\0";
    /// let mut reader = <BinaryReader<LE, _>>::from_bytes(bytes);
    /// let mut names = vec![];
    /// for _ in 0..2 {
    ///     let offset = reader.read_u16().unwrap() as u64;
    ///     names.push(reader.temporary_jump(offset, |r| {
    ///         r.read_null_terminated_string(Charset::Utf8)
    ///     }).unwrap());
    /// }
    /// assert_eq!(names, ["ab", "cd"]);
    /// assert_eq!(reader.byte_pos(), 4);
    /// ```
    pub fn temporary_jump<T>(
        &mut self,
        addr: u64,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.byte_pos();
        self.set_byte_pos(addr)?;
        log::trace!("Temporary jump from {} to {}", saved, addr);
        let result = body(self);
        let restored = self.source.set_byte_pos(saved);
        let value = result?;
        restored?;
        Ok(value)
    }

    /// Advance past every consecutive byte equal to `value`, stopping on the
    /// first different byte or at the end of the data.
    pub fn skip_while_byte_equals(&mut self, value: u8) -> Result<()> {
        while !self.is_at_end() {
            if self.read_u8()? != value {
                let pos = self.byte_pos() - 1;
                return self.source.set_byte_pos(pos);
            }
        }
        Ok(())
    }

    /// Advance past every consecutive zero byte.
    pub fn skip_null_bytes(&mut self) -> Result<()> {
        self.skip_while_byte_equals(0)
    }

    /// Find the first occurrence of `needle` at or after `start`, leaving the
    /// position unchanged.
    ///
    /// See [`find_bytes_in`] for the details of the search.
    pub fn find(&mut self, needle: &[u8], start: u64) -> Result<Option<u64>> {
        find_bytes_in(&mut self.source, needle, start)
    }
}
