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
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// An adapter from [`Read`], [`Write`], and [`Seek`], to [`ByteRead`],
/// [`ByteWrite`], and [`ByteSeek`], respectively.
///
/// Instances of this struct can be created using [`ByteCursor::new`]. They
/// turn every standard (possibly seekable) source or destination of bytes
/// (such as [`std::fs::File`], [`std::io::BufReader`], pipes, sockets, etc.)
/// into a position-tracked byte stream.
///
/// The position is counted by the cursor itself and is never asked to the
/// backend. [`ByteCursor::new`] thus assumes that the backend is at its start;
/// use [`ByteCursor::with_pos`] to adapt a backend that has already been
/// read from or written to.
///
/// When the backend ends in the middle of a [`read_exact`](ByteRead::read_exact)
/// the bytes already consumed are accounted in the position, as a
/// non-seekable backend cannot give them back.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct ByteCursor<B> {
    backend: B,
    position: u64,
}

impl<B> ByteCursor<B> {
    /// Create a new [`ByteCursor`] over a backend positioned at its start.
    pub fn new(backend: B) -> Self {
        Self::with_pos(backend, 0)
    }

    /// Create a new [`ByteCursor`] over a backend whose current position is
    /// `position`.
    pub fn with_pos(backend: B, position: u64) -> Self {
        Self { backend, position }
    }

    pub fn get_ref(&self) -> &B {
        &self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B> BytePos for ByteCursor<B> {
    #[inline(always)]
    fn byte_pos(&self) -> u64 {
        self.position
    }
}

/// Convert [`Read`] to [`ByteRead`]
impl<B: Read> ByteRead for ByteCursor<B> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.backend.read(&mut buf[filled..]) {
                Ok(0) => {
                    let pos = self.position;
                    self.position += filled as u64;
                    return Err(Error::EndOfData {
                        pos,
                        requested: buf.len() as u64,
                        len: pos + filled as u64,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.position += filled as u64;
                    return Err(e.into());
                }
            }
        }
        self.position += filled as u64;
        Ok(())
    }
}

/// Convert [`Write`] to [`ByteWrite`]
impl<B: Write> ByteWrite for ByteCursor<B> {
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.backend.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.backend.flush()?;
        Ok(())
    }
}

/// Convert [`Seek`] to [`ByteSeek`]
impl<B: Seek> ByteSeek for ByteCursor<B> {
    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<()> {
        self.backend.seek(SeekFrom::Start(byte_pos))?;
        self.position = byte_pos;
        Ok(())
    }

    fn byte_len(&mut self) -> Result<u64> {
        let len = self.backend.seek(SeekFrom::End(0))?;
        self.backend.seek(SeekFrom::Start(self.position))?;
        Ok(len)
    }
}
