/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::charset::Charset;
use crate::error::{Error, Result};
use crate::impls::{ByteCursor, MemByteWriterVec};
use crate::traits::*;
use crate::utils::align_up;
use num_traits::ops::bytes::ToBytes;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Encoding of scalars and strings into a [`ByteWrite`].
///
/// This is the counterpart of [`BinaryReader`](crate::impls::BinaryReader):
/// everything written by a [`BinaryWriter`] can be read back by a
/// [`BinaryReader`](crate::impls::BinaryReader) of the same endianness with
/// the corresponding methods.
///
/// Seekable sinks also support [`set_byte_pos`](BinaryWriter::set_byte_pos)
/// and [`temporary_jump`](BinaryWriter::temporary_jump), which are the usual
/// way to back-patch an offset or a length once it is known.
///
/// # Example
/// ```
/// use binio::prelude::*;
///
/// let mut writer = <BinaryWriter<BE, _>>::from_vec(Vec::new());
/// writer.write_u16(0).unwrap(); // placeholder for the length
/// writer.write_null_terminated_string("hello", Charset::Utf8).unwrap();
/// let len = writer.byte_pos() as u16;
/// writer.temporary_jump(0, |w| w.write_u16(len)).unwrap();
///
/// let bytes = writer.into_inner().into_inner();
/// assert_eq!(bytes, b"\x00\x08hello\0");
/// ```
#[derive(Debug, Clone)]
pub struct BinaryWriter<E: Endianness, S> {
    sink: S,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness, S> BinaryWriter<E, S> {
    /// Create a new [`BinaryWriter`] over a sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Consume the writer, returning the sink.
    ///
    /// Buffered sinks should be flushed first.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<E: Endianness> BinaryWriter<E, MemByteWriterVec<Vec<u8>>> {
    /// Create a new [`BinaryWriter`] appending to a vector.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self::new(MemByteWriterVec::new(data))
    }
}

impl<E: Endianness> BinaryWriter<E, ByteCursor<BufWriter<File>>> {
    /// Create (or truncate) a file for writing.
    ///
    /// Dropping the writer flushes the buffer but ignores errors: use
    /// [`close`](BinaryWriter::close) to observe them.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        log::debug!(
            "Created {} for writing ({}-endian)",
            path.as_ref().display(),
            E::NAME
        );
        Ok(Self::new(ByteCursor::new(BufWriter::new(file))))
    }

    /// Flush the buffer and close the file.
    pub fn close(mut self) -> Result<()> {
        self.sink.flush()?;
        log::debug!("Closed file after {} bytes", self.sink.byte_pos());
        Ok(())
    }
}

impl<E: Endianness, S: BytePos> BinaryWriter<E, S> {
    /// The current position in bytes, that is, the number of bytes written
    /// so far by a writer that never seeked.
    #[inline(always)]
    pub fn byte_pos(&self) -> u64 {
        self.sink.byte_pos()
    }

    /// The current position as a 32-bit value.
    ///
    /// Fails with [`Error::PositionOverflow`] if the position does not fit.
    #[inline(always)]
    pub fn pos32(&self) -> Result<u32> {
        self.sink.pos32()
    }
}

macro_rules! write_scalars {
    ($($write:ident => $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Write a `", stringify!($ty), "`.")]
        #[inline]
        pub fn $write(&mut self, value: $ty) -> Result<()> {
            self.write_scalar(value)
        }
    )*};
}

impl<E: Endianness, S: ByteWrite> BinaryWriter<E, S> {
    /// Write any primitive number in the endianness of the writer.
    #[inline]
    pub fn write_scalar<T: ToBytes>(&mut self, value: T) -> Result<()> {
        self.sink.write_all(E::encode(&value).as_ref())
    }

    write_scalars!(
        write_u8 => u8,
        write_i8 => i8,
        write_u16 => u16,
        write_i16 => i16,
        write_u32 => u32,
        write_i32 => i32,
        write_u64 => u64,
        write_i64 => i64,
        write_f32 => f32,
        write_f64 => f64,
    );

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.sink.write_all(buf)
    }

    /// Write `count` zero bytes.
    pub fn write_zero_bytes(&mut self, count: u64) -> Result<()> {
        let zeros = [0; 256];
        let mut left = count;
        while left > 0 {
            let chunk = left.min(zeros.len() as u64) as usize;
            self.sink.write_all(&zeros[..chunk])?;
            left -= chunk as u64;
        }
        Ok(())
    }

    /// Write the encoding of `s`, without terminator or length.
    pub fn write_string(&mut self, s: &str, charset: Charset) -> Result<()> {
        self.sink.write_all(&charset.encode(s))
    }

    /// Write the encoding of `s` followed by a zero byte.
    pub fn write_null_terminated_string(&mut self, s: &str, charset: Charset) -> Result<()> {
        self.write_string(s, charset)?;
        self.sink.write_byte(0)
    }

    /// Write the encoding of `s` followed by two zero bytes.
    pub fn write_double_null_terminated_string(
        &mut self,
        s: &str,
        charset: Charset,
    ) -> Result<()> {
        self.write_string(s, charset)?;
        self.sink.write_all(&[0, 0])
    }

    /// Write the encoding of `s` zero-padded to exactly `len` bytes.
    ///
    /// Fails with [`Error::StringTooLong`], writing nothing, if the encoding
    /// is longer than `len`.
    pub fn write_fixed_string(&mut self, s: &str, len: usize, charset: Charset) -> Result<()> {
        let bytes = charset.encode(s);
        if bytes.len() > len {
            return Err(Error::StringTooLong {
                len: bytes.len(),
                max: len,
            });
        }
        self.sink.write_all(&bytes)?;
        self.write_zero_bytes((len - bytes.len()) as u64)
    }

    /// Write zeros up to the next multiple of `pad`; does nothing if the
    /// position is already aligned.
    pub fn align(&mut self, pad: u64) -> Result<()> {
        let pos = self.byte_pos();
        let target = align_up(pos, pad)?;
        self.write_zero_bytes(target - pos)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }
}

impl<E: Endianness, S: ByteWrite + ByteSeek> BinaryWriter<E, S> {
    /// Move to the absolute position `pos`.
    ///
    /// Whether positions past the end are allowed depends on the sink.
    pub fn set_byte_pos(&mut self, pos: u64) -> Result<()> {
        self.sink.set_byte_pos(pos)
    }

    /// Run `body` with the writer moved to `addr`, then move back to the
    /// current position.
    ///
    /// The position is restored even if `body` fails; in that case the error
    /// of `body` is returned.
    pub fn temporary_jump<T>(
        &mut self,
        addr: u64,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.byte_pos();
        self.sink.set_byte_pos(addr)?;
        log::trace!("Temporary jump from {} to {}", saved, addr);
        let result = body(self);
        let restored = self.sink.set_byte_pos(saved);
        let value = result?;
        restored?;
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::MemByteWriter;

    #[test]
    fn test_scalars() -> Result<()> {
        let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
        writer.write_u8(1)?;
        writer.write_u16(0x0302)?;
        writer.write_i32(-2)?;
        assert_eq!(writer.byte_pos(), 7);
        assert_eq!(
            writer.into_inner().into_inner(),
            [1, 2, 3, 0xFE, 0xFF, 0xFF, 0xFF]
        );

        let mut writer = <BinaryWriter<BE, _>>::from_vec(Vec::new());
        writer.write_u16(0x0302)?;
        writer.write_f32(1.0)?;
        writer.write_i8(-1)?;
        assert_eq!(
            writer.into_inner().into_inner(),
            [3, 2, 0x3F, 0x80, 0, 0, 0xFF]
        );
        Ok(())
    }

    #[test]
    fn test_strings() -> Result<()> {
        let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
        writer.write_null_terminated_string("ab", Charset::Utf8)?;
        writer.write_double_null_terminated_string("c", Charset::Utf16Le)?;
        writer.write_fixed_string("xy", 4, Charset::Ascii)?;
        writer.write_string("z", Charset::Latin1)?;
        assert_eq!(
            writer.into_inner().into_inner(),
            b"ab\0c\0\0\0xy\0\0z"
        );
        Ok(())
    }

    #[test]
    fn test_fixed_string_too_long() -> Result<()> {
        let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
        writer.write_fixed_string("four", 4, Charset::Utf8)?;
        assert!(matches!(
            writer.write_fixed_string("five!", 4, Charset::Utf8),
            Err(Error::StringTooLong { len: 5, max: 4 })
        ));
        // "é" takes two bytes in UTF-8
        assert!(writer.write_fixed_string("é", 1, Charset::Utf8).is_err());
        assert_eq!(writer.byte_pos(), 4);
        Ok(())
    }

    #[test]
    fn test_align_and_zeros() -> Result<()> {
        let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
        writer.align(4)?;
        assert_eq!(writer.byte_pos(), 0);
        writer.write_u8(0xAA)?;
        writer.align(4)?;
        assert_eq!(writer.byte_pos(), 4);
        writer.align(4)?;
        assert_eq!(writer.byte_pos(), 4);
        writer.write_zero_bytes(600)?;
        assert_eq!(writer.byte_pos(), 604);
        assert!(writer.align(0).is_err());
        let bytes = writer.into_inner().into_inner();
        assert_eq!(bytes[0], 0xAA);
        assert!(bytes[1..].iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn test_back_patch() -> Result<()> {
        let mut writer = <BinaryWriter<BE, _>>::from_vec(Vec::new());
        writer.write_u32(0)?;
        writer.write_bytes(&[1, 2, 3])?;
        let end = writer.pos32()?;
        writer.temporary_jump(0, |w| w.write_u32(end))?;
        assert_eq!(writer.byte_pos(), 7);
        writer.write_u8(4)?;
        assert_eq!(
            writer.into_inner().into_inner(),
            [0, 0, 0, 7, 1, 2, 3, 4]
        );
        Ok(())
    }

    #[test]
    fn test_far_seek() -> Result<()> {
        let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
        writer.set_byte_pos(usize::MAX as u64)?;
        assert!(matches!(
            writer.write_u8(1),
            Err(Error::SeekOutOfBounds { len: 0, .. })
        ));
        writer.set_byte_pos(0)?;
        writer.write_u8(1)?;
        assert_eq!(writer.into_inner().into_inner(), [1]);
        Ok(())
    }

    #[test]
    fn test_fixed_sink() -> Result<()> {
        let mut bytes = [0; 4];
        let mut writer = <BinaryWriter<LE, _>>::new(MemByteWriter::new(&mut bytes));
        writer.write_u16(0xBBAA)?;
        assert!(matches!(
            writer.write_u32(0),
            Err(Error::EndOfData { pos: 2, .. })
        ));
        // a failed body still restores the position
        assert!(writer.temporary_jump(3, |w| w.write_u16(0)).is_err());
        assert_eq!(writer.byte_pos(), 2);
        writer.write_u16(0xDDCC)?;
        assert_eq!(bytes, [0xAA, 0xBB, 0xCC, 0xDD]);
        Ok(())
    }
}
