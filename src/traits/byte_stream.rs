/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{Error, Result};

/// Position tracking shared by byte sources and sinks.
///
/// The position is an owned counter of the implementing type, updated by
/// every read, write, and seek. It is never queried from the backend.
pub trait BytePos {
    /// Get the current position in bytes from the start of the stream.
    #[must_use]
    fn byte_pos(&self) -> u64;

    /// The current position as a 32-bit value.
    ///
    /// Fails with [`Error::PositionOverflow`] if the position does not fit.
    fn pos32(&self) -> Result<u32> {
        let pos = self.byte_pos();
        u32::try_from(pos).map_err(|_| Error::PositionOverflow { pos })
    }
}

/// Sequential, streaming byte reads.
pub trait ByteRead: BytePos {
    /// Fill `buf` completely and advance the current position.
    ///
    /// If the source ends before `buf` is full, the error is
    /// [`Error::EndOfData`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read a single byte.
    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Skip `n` bytes without interpreting them.
    ///
    /// The default implementation reads and discards the bytes; seekable
    /// sources override it.
    fn skip_bytes(&mut self, mut n: u64) -> Result<()> {
        let mut scratch = [0; 256];
        while n > 0 {
            let chunk = n.min(scratch.len() as u64) as usize;
            self.read_exact(&mut scratch[..chunk])?;
            n -= chunk as u64;
        }
        Ok(())
    }
}

/// Sequential, streaming byte writes.
pub trait ByteWrite: BytePos {
    /// Write all of `buf` and advance the current position.
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Write a single byte.
    #[inline]
    fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write_all(&[value])
    }

    /// Flush the sink.
    fn flush(&mut self) -> Result<()>;
}

/// Seekability for [`ByteRead`] and [`ByteWrite`] streams.
pub trait ByteSeek: BytePos {
    /// Set the current position in bytes from the start of the stream.
    ///
    /// Sources that cannot grow fail with [`Error::SeekOutOfBounds`] when
    /// `byte_pos` is beyond their length; on error the position is unchanged.
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<()>;

    /// Total length of the stream in bytes.
    fn byte_len(&mut self) -> Result<u64>;
}
