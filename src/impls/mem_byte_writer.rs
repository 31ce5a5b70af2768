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

/// An implementation of [`ByteRead`], [`ByteWrite`], and [`ByteSeek`] for a
/// mutable slice of memory.
///
/// Writes past the end of the slice fail with [`Error::EndOfData`].
///
/// # Example
/// ```
/// use binio::prelude::*;
///
/// let mut bytes = [0_u8; 4];
/// let mut byte_writer = MemByteWriter::new(&mut bytes);
///
/// assert!(byte_writer.write_all(&[0, 1, 2]).is_ok());
/// assert!(byte_writer.write_byte(3).is_ok());
/// assert_eq!(byte_writer.byte_pos(), 4);
/// assert!(byte_writer.write_byte(4).is_err());
///
/// // we can read back what we wrote
/// assert!(byte_writer.set_byte_pos(2).is_ok());
/// assert_eq!(byte_writer.read_byte().unwrap(), 2);
/// assert_eq!(bytes, [0, 1, 2, 3]);
/// ```
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteWriter<B: AsMut<[u8]>> {
    data: B,
    byte_index: usize,
}

impl<B: AsMut<[u8]> + AsRef<[u8]>> MemByteWriter<B> {
    /// Create a new [`MemByteWriter`] over a slice. Its current content is
    /// kept until it is overwritten.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsMut<[u8]>> BytePos for MemByteWriter<B> {
    #[inline(always)]
    fn byte_pos(&self) -> u64 {
        self.byte_index as u64
    }
}

impl<B: AsMut<[u8]>> ByteWrite for MemByteWriter<B> {
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let data = self.data.as_mut();
        let len = data.len() as u64;
        match data.get_mut(self.byte_index..self.byte_index + buf.len()) {
            Some(dest) => {
                dest.copy_from_slice(buf);
                self.byte_index += buf.len();
                Ok(())
            }
            None => Err(Error::EndOfData {
                pos: self.byte_index as u64,
                requested: buf.len() as u64,
                len,
            }),
        }
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: AsMut<[u8]>> ByteRead for MemByteWriter<B> {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let data = self.data.as_mut();
        let len = data.len() as u64;
        match data.get(self.byte_index..self.byte_index + buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.byte_index += buf.len();
                Ok(())
            }
            None => Err(Error::EndOfData {
                pos: self.byte_index as u64,
                requested: buf.len() as u64,
                len,
            }),
        }
    }
}

impl<B: AsMut<[u8]>> ByteSeek for MemByteWriter<B> {
    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<()> {
        let len = self.data.as_mut().len() as u64;
        if byte_pos > len {
            return Err(Error::SeekOutOfBounds { pos: byte_pos, len });
        }
        self.byte_index = byte_pos as usize;
        Ok(())
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64> {
        Ok(self.data.as_mut().len() as u64)
    }
}

/// An implementation of [`ByteRead`], [`ByteWrite`], and [`ByteSeek`] for a
/// growable [`Vec<u8>`].
///
/// The core difference with [`MemByteWriter`] is that writing past the end
/// extends the vector. Seeking past the end is allowed, and the gap is filled
/// with zeros by the next write.
///
/// # Example
/// ```
/// use binio::prelude::*;
///
/// let mut byte_writer = MemByteWriterVec::new(Vec::<u8>::new());
///
/// assert!(byte_writer.write_all(&[0x41, 0x42]).is_ok());
/// assert!(byte_writer.write_byte(0x43).is_ok());
/// assert_eq!(byte_writer.at(1), Some(0x42));
/// assert_eq!(byte_writer.len(), 3);
/// assert_eq!(byte_writer.as_slice(), [0x41, 0x42, 0x43]);
/// ```
#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteWriterVec<B: AsMut<Vec<u8>> = Vec<u8>> {
    data: B,
    byte_index: usize,
}

impl<B: AsMut<Vec<u8>> + AsRef<Vec<u8>>> MemByteWriterVec<B> {
    /// Create a new [`MemByteWriterVec`] positioned at the start of `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte at `index`, if it has been written.
    pub fn at(&self, index: usize) -> Option<u8> {
        self.data.as_ref().get(index).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsMut<Vec<u8>>> BytePos for MemByteWriterVec<B> {
    #[inline(always)]
    fn byte_pos(&self) -> u64 {
        self.byte_index as u64
    }
}

impl<B: AsMut<Vec<u8>>> ByteWrite for MemByteWriterVec<B> {
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let data = self.data.as_mut();
        let Some(end) = self.byte_index.checked_add(buf.len()) else {
            return Err(Error::SeekOutOfBounds {
                pos: self.byte_index as u64,
                len: data.len() as u64,
            });
        };
        if end > data.len() {
            data.resize(end, 0);
        }
        data[self.byte_index..end].copy_from_slice(buf);
        self.byte_index = end;
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: AsMut<Vec<u8>>> ByteRead for MemByteWriterVec<B> {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let data = self.data.as_mut();
        let len = data.len() as u64;
        let range = self
            .byte_index
            .checked_add(buf.len())
            .and_then(|end| data.get(self.byte_index..end));
        match range {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.byte_index += buf.len();
                Ok(())
            }
            None => Err(Error::EndOfData {
                pos: self.byte_index as u64,
                requested: buf.len() as u64,
                len,
            }),
        }
    }
}

impl<B: AsMut<Vec<u8>>> ByteSeek for MemByteWriterVec<B> {
    /// Any position addressable in memory is accepted.
    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<()> {
        self.byte_index = usize::try_from(byte_pos).map_err(|_| Error::SeekOutOfBounds {
            pos: byte_pos,
            len: self.data.as_mut().len() as u64,
        })?;
        Ok(())
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64> {
        Ok(self.data.as_mut().len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_bytes() -> Result<()> {
        let mut bytes = [0; 4];
        let mut writer = MemByteWriter::new(&mut bytes);
        assert_eq!(writer.byte_pos(), 0);
        assert_eq!(writer.len(), 4);
        for b in 0..4 {
            writer.write_byte(b)?;
        }
        assert_eq!(writer.byte_pos(), 4);
        assert!(matches!(
            writer.write_all(&[4]),
            Err(Error::EndOfData { pos: 4, .. })
        ));
        assert_eq!(bytes, [0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_write_multiple_bytes() -> Result<()> {
        let mut bytes = [0; 4];
        let mut writer = MemByteWriter::new(&mut bytes);
        writer.write_all(&[0, 1, 2, 3])?;
        assert_eq!(writer.byte_pos(), 4);
        assert_eq!(bytes, [0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_vec_grows() -> Result<()> {
        let mut writer = MemByteWriterVec::new(Vec::<u8>::new());
        writer.write_all(&[0x41, 0x42, 0x43])?;
        assert_eq!(writer.len(), 3);
        assert_eq!(writer.at(0), Some(0x41));
        assert_eq!(writer.at(2), Some(0x43));
        assert_eq!(writer.at(3), None);

        // overwrite in place
        writer.set_byte_pos(1)?;
        writer.write_byte(0x58)?;
        assert_eq!(writer.as_slice(), [0x41, 0x58, 0x43]);

        // gaps are zero-filled
        writer.set_byte_pos(5)?;
        writer.write_byte(1)?;
        assert_eq!(writer.into_inner(), [0x41, 0x58, 0x43, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn test_vec_far_seek() -> Result<()> {
        let mut writer = MemByteWriterVec::new(vec![1_u8, 2, 3]);
        writer.set_byte_pos(usize::MAX as u64)?;
        assert!(matches!(
            writer.write_all(&[1]),
            Err(Error::SeekOutOfBounds { len: 3, .. })
        ));
        let mut buf = [0; 2];
        assert!(matches!(
            writer.read_exact(&mut buf),
            Err(Error::EndOfData {
                requested: 2,
                len: 3,
                ..
            })
        ));
        // nothing was written
        assert_eq!(writer.len(), 3);
        writer.set_byte_pos(3)?;
        writer.write_byte(4)?;
        assert_eq!(writer.into_inner(), [1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_vec_read_back() -> Result<()> {
        let mut data: Vec<u8> = vec![];
        let mut writer = MemByteWriterVec::new(&mut data);
        writer.write_all(&[1, 2, 3])?;
        writer.set_byte_pos(0)?;
        let mut buf = [0; 3];
        writer.read_exact(&mut buf)?;
        assert_eq!(buf, [1, 2, 3]);
        assert!(writer.read_byte().is_err());
        Ok(())
    }
}
