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

/// An implementation of [`ByteRead`] and [`ByteSeek`] for a slice.
///
/// # Example
/// ```
/// use binio::prelude::*;
///
/// let bytes = [0_u8, 1, 2, 3];
///
/// let mut byte_reader = MemByteReader::new(&bytes);
///
/// // the stream is read sequentially
/// assert_eq!(byte_reader.byte_pos(), 0);
/// assert_eq!(byte_reader.read_byte().unwrap(), 0);
/// assert_eq!(byte_reader.byte_pos(), 1);
/// let mut rest = [0; 3];
/// byte_reader.read_exact(&mut rest).unwrap();
/// assert_eq!(rest, [1, 2, 3]);
/// assert!(byte_reader.read_byte().is_err());
///
/// // you can change position
/// assert!(byte_reader.set_byte_pos(1).is_ok());
/// assert_eq!(byte_reader.read_byte().unwrap(), 1);
///
/// // errored set position doesn't change the current position
/// assert!(byte_reader.set_byte_pos(100).is_err());
/// assert_eq!(byte_reader.byte_pos(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteReader<B: AsRef<[u8]>> {
    data: B,
    byte_index: usize,
}

impl<B: AsRef<[u8]>> MemByteReader<B> {
    /// Create a new [`MemByteReader`] from a slice of data
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

    /// The bytes not read yet.
    pub fn remaining(&self) -> &[u8] {
        &self.data.as_ref()[self.byte_index..]
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> BytePos for MemByteReader<B> {
    #[inline(always)]
    fn byte_pos(&self) -> u64 {
        self.byte_index as u64
    }
}

impl<B: AsRef<[u8]>> ByteRead for MemByteReader<B> {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let data = self.data.as_ref();
        match data.get(self.byte_index..self.byte_index + buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.byte_index += buf.len();
                Ok(())
            }
            None => Err(Error::EndOfData {
                pos: self.byte_index as u64,
                requested: buf.len() as u64,
                len: data.len() as u64,
            }),
        }
    }

    #[inline]
    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let len = self.len() as u64;
        let pos = self.byte_index as u64;
        if n > len - pos {
            return Err(Error::EndOfData {
                pos,
                requested: n,
                len,
            });
        }
        self.byte_index += n as usize;
        Ok(())
    }
}

impl<B: AsRef<[u8]>> ByteSeek for MemByteReader<B> {
    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<()> {
        let len = self.len() as u64;
        if byte_pos > len {
            return Err(Error::SeekOutOfBounds { pos: byte_pos, len });
        }
        self.byte_index = byte_pos as usize;
        Ok(())
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64> {
        Ok(self.len() as u64)
    }
}
