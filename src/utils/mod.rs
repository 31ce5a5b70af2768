/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

/*!

Helpers shared by the streams.

[`find_bytes`] and [`find_bytes_in`] locate a byte pattern in memory or in a
seekable source. [`BitOps`] and [`ToHex`] test and render the bits of
integers, and [`align_up`] computes alignment targets.

*/

mod bits;
pub use bits::*;

mod hex;
pub use hex::*;

mod pad;
pub use pad::*;

pub mod search;
pub use search::{find_bytes, find_bytes_in};
