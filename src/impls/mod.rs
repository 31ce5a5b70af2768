/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

/*!

Implementations of byte and bit streams.

If you need to read or write bytes from a file or any backend implementing
[`std::io::Read`] or [`std::io::Write`] you just need to wrap it in a
[`ByteCursor`], which also forwards [`std::io::Seek`].

If instead you want to read or write directly from memory, you can use
[`MemByteReader`], [`MemByteWriter`] (a fixed slice) and
[`MemByteWriterVec`] (a growable vector).

Once you have a byte stream, [`BinaryReader`] and [`BinaryWriter`] decode and
encode scalars and strings on top of it, with a statically selectable
endianness. [`RandomAccessBinaryFile`] is a single little-endian file handle
that reads, writes, and seeks; it is also a byte stream, so it can back a
[`BinaryReader`] or a [`BinaryWriter`] of the other endianness.

[`BitReader`] reads single bits and small integers from memory, most
significant bit first with [`BE`](crate::traits::BE) and least significant
bit first with [`LE`](crate::traits::LE).

*/

mod mem_byte_reader;
pub use mem_byte_reader::*;

mod mem_byte_writer;
pub use mem_byte_writer::*;

mod byte_cursor;
pub use byte_cursor::*;

mod bit_reader;
pub use bit_reader::BitReader;

mod binary_reader;
pub use binary_reader::BinaryReader;

mod binary_writer;
pub use binary_writer::BinaryWriter;

mod random_access_file;
pub use random_access_file::RandomAccessBinaryFile;
