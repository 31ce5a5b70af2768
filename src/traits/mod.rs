/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

/*!

Traits

[`ByteRead`], [`ByteWrite`], and [`ByteSeek`] abstract over the sources and
sinks of bytes; [`BitRead`] and [`BitSeek`] over bit streams. The marker
types [`LE`] and [`BE`] select byte order and bit order.

*/

mod bit_stream;
pub use bit_stream::*;

mod byte_stream;
pub use byte_stream::*;

mod endianness;
pub use endianness::*;
