/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::charset::Charset;
use crate::error::{Error, Result};
use crate::impls::ByteCursor;
use crate::traits::*;
use crate::utils::{align_up, find_bytes_in};
use std::fs::{File, OpenOptions};
use std::io::Seek;
use std::path::Path;

/// A file that can be read, written, and repositioned through a single
/// handle, with little-endian scalars.
///
/// Multi-byte integers are assembled and disassembled one byte at a time,
/// lowest byte first, so the layout does not depend on the host. Floats go
/// through their bit pattern.
///
/// The file is released when the handle is dropped, or earlier by
/// [`close`](RandomAccessBinaryFile::close); after closing every operation
/// fails with [`Error::ClosedResource`].
///
/// The handle implements [`ByteRead`], [`ByteWrite`], and [`ByteSeek`], so it
/// can also back a [`BinaryReader`](crate::impls::BinaryReader) or a
/// [`BinaryWriter`](crate::impls::BinaryWriter) when big-endian data or
/// strings with other terminators are needed.
#[derive(Debug)]
pub struct RandomAccessBinaryFile {
    cursor: Option<ByteCursor<File>>,
}

macro_rules! le_scalars {
    ($($read:ident, $write:ident => $ty:ty, $uty:ty),* $(,)?) => {$(
        #[doc = concat!("Read a little-endian `", stringify!($ty), "`.")]
        pub fn $read(&mut self) -> Result<$ty> {
            let bytes = self.read_array::<{ size_of::<$uty>() }>(stringify!($read))?;
            Ok(bytes
                .iter()
                .rev()
                .fold(0, |acc: $uty, &b| acc << 8 | b as $uty) as $ty)
        }

        #[doc = concat!("Write a little-endian `", stringify!($ty), "`.")]
        pub fn $write(&mut self, value: $ty) -> Result<()> {
            let value = value as $uty;
            let mut bytes = [0; size_of::<$uty>()];
            for (i, b) in bytes.iter_mut().enumerate() {
                *b = (value >> (8 * i)) as u8;
            }
            self.cursor(stringify!($write))?.write_all(&bytes)
        }
    )*};
}

impl RandomAccessBinaryFile {
    /// Open a file for reading and writing, creating it if it does not
    /// exist. Its content is kept.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        log::debug!(
            "Opened {} for reading and writing ({} bytes)",
            path.display(),
            file.metadata()?.len()
        );
        Ok(Self::with_cursor(ByteCursor::new(file)))
    }

    /// Open an existing file for reading only; writes will fail with the
    /// error of the operating system.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        log::debug!(
            "Opened {} for reading ({} bytes)",
            path.display(),
            file.metadata()?.len()
        );
        Ok(Self::with_cursor(ByteCursor::new(file)))
    }

    /// Wrap an already open file, keeping its current position.
    pub fn from_file(mut file: File) -> Result<Self> {
        let pos = file.stream_position()?;
        Ok(Self::with_cursor(ByteCursor::with_pos(file, pos)))
    }

    fn with_cursor(cursor: ByteCursor<File>) -> Self {
        Self {
            cursor: Some(cursor),
        }
    }

    #[inline]
    fn cursor(&mut self, op: &'static str) -> Result<&mut ByteCursor<File>> {
        self.cursor.as_mut().ok_or(Error::ClosedResource { op })
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, op: &'static str) -> Result<[u8; N]> {
        let mut bytes = [0; N];
        self.cursor(op)?.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Whether [`close`](RandomAccessBinaryFile::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.cursor.is_none()
    }

    /// Release the file. Closing an already closed handle does nothing.
    pub fn close(&mut self) -> Result<()> {
        if let Some(cursor) = self.cursor.take() {
            log::debug!("Closed file at position {}", cursor.byte_pos());
        }
        Ok(())
    }

    /// The current position in bytes.
    pub fn file_pointer(&mut self) -> Result<u64> {
        Ok(self.cursor("file_pointer")?.byte_pos())
    }

    /// Move to the absolute position `pos`, which may be past the end of the
    /// file; a write there extends the file.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        self.cursor("seek")?.set_byte_pos(pos)
    }

    /// The length of the file in bytes.
    pub fn length(&mut self) -> Result<u64> {
        Ok(self.cursor("length")?.get_ref().metadata()?.len())
    }

    /// Truncate or extend (with zeros) the file to `len` bytes.
    ///
    /// If the current position is past the new length it is moved to the
    /// new length.
    pub fn set_length(&mut self, len: u64) -> Result<()> {
        let cursor = self.cursor("set_length")?;
        cursor.get_ref().set_len(len)?;
        if cursor.byte_pos() > len {
            cursor.set_byte_pos(len)?;
        }
        log::debug!("Set file length to {} bytes", len);
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>("read_u8")?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_array::<1>("read_i8")?[0] as i8)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.cursor("write_u8")?.write_byte(value)
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.cursor("write_i8")?.write_byte(value as u8)
    }

    /// Read a byte and return whether it is nonzero.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_array::<1>("read_bool")?[0] != 0)
    }

    /// Write `true` as one and `false` as zero.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.cursor("write_bool")?.write_byte(value as u8)
    }

    le_scalars!(
        read_u16, write_u16 => u16, u16,
        read_i16, write_i16 => i16, u16,
        read_u32, write_u32 => u32, u32,
        read_i32, write_i32 => i32, u32,
        read_u64, write_u64 => u64, u64,
        read_i64, write_i64 => i64, u64,
    );

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    /// Fill `buf` completely.
    pub fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        self.cursor("read_fully")?.read_exact(buf)
    }

    /// Read the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0; n];
        self.cursor("read_bytes")?.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.cursor("write_bytes")?.write_all(buf)
    }

    /// Read exactly `size` bytes and decode them.
    pub fn read_string(&mut self, size: usize, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.read_bytes(size)?))
    }

    /// Write the encoding of `s`, without terminator.
    pub fn write_string(&mut self, s: &str, charset: Charset) -> Result<()> {
        self.cursor("write_string")?.write_all(&charset.encode(s))
    }

    /// Read bytes up to a zero byte, which is consumed but not included, and
    /// decode them.
    pub fn read_null_terminated_string(&mut self, charset: Charset) -> Result<String> {
        let cursor = self.cursor("read_null_terminated_string")?;
        let mut bytes = Vec::new();
        loop {
            match cursor.read_byte()? {
                0 => break,
                b => bytes.push(b),
            }
        }
        Ok(charset.decode(&bytes))
    }

    /// Write the encoding of `s` followed by a zero byte.
    pub fn write_null_terminated_string(&mut self, s: &str, charset: Charset) -> Result<()> {
        let cursor = self.cursor("write_null_terminated_string")?;
        cursor.write_all(&charset.encode(s))?;
        cursor.write_byte(0)
    }

    /// Run `body` with the file pointer moved to `addr`, then move it back.
    ///
    /// The position is restored even if `body` fails; in that case the error
    /// of `body` is returned.
    pub fn temporary_jump<T>(
        &mut self,
        addr: u64,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.cursor("temporary_jump")?.byte_pos();
        self.seek(addr)?;
        log::trace!("Temporary jump from {} to {}", saved, addr);
        let result = body(self);
        let restored = self.cursor("temporary_jump").and_then(|c| c.set_byte_pos(saved));
        let value = result?;
        restored?;
        Ok(value)
    }

    /// Write zeros from the file pointer up to the next multiple of `pad`;
    /// does nothing if the file pointer is already aligned.
    pub fn align(&mut self, pad: u64) -> Result<()> {
        let cursor = self.cursor("align")?;
        let pos = cursor.byte_pos();
        let zeros = [0; 256];
        let mut left = align_up(pos, pad)? - pos;
        while left > 0 {
            let chunk = left.min(zeros.len() as u64) as usize;
            cursor.write_all(&zeros[..chunk])?;
            left -= chunk as u64;
        }
        Ok(())
    }

    /// Advance past every consecutive byte equal to `value`, stopping on the
    /// first different byte or at the end of the file.
    pub fn skip_while_byte_equals(&mut self, value: u8) -> Result<()> {
        let len = self.length()?;
        let cursor = self.cursor("skip_while_byte_equals")?;
        while cursor.byte_pos() < len {
            if cursor.read_byte()? != value {
                let pos = cursor.byte_pos() - 1;
                return cursor.set_byte_pos(pos);
            }
        }
        Ok(())
    }

    /// Advance past every consecutive zero byte.
    pub fn skip_null_bytes(&mut self) -> Result<()> {
        self.skip_while_byte_equals(0)
    }

    /// Find the first occurrence of `needle` at or after `start`, leaving the
    /// file pointer unchanged.
    pub fn find(&mut self, needle: &[u8], start: u64) -> Result<Option<u64>> {
        self.cursor("find")?;
        find_bytes_in(self, needle, start)
    }
}

/// The position of a closed handle is zero.
impl BytePos for RandomAccessBinaryFile {
    #[inline]
    fn byte_pos(&self) -> u64 {
        self.cursor.as_ref().map_or(0, |cursor| cursor.byte_pos())
    }
}

impl ByteRead for RandomAccessBinaryFile {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_fully(buf)
    }
}

impl ByteWrite for RandomAccessBinaryFile {
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> Result<()> {
        self.cursor("flush")?.flush()
    }
}

impl ByteSeek for RandomAccessBinaryFile {
    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<()> {
        self.seek(byte_pos)
    }

    fn byte_len(&mut self) -> Result<u64> {
        self.length()
    }
}
