/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

//! Byte-pattern search.
//!
//! Both functions use the same sliding window: every candidate start from
//! `start` to `len - needle.len()` is tried in order, the comparison stops at
//! the first mismatching byte, and the window advances by one. The worst case
//! is thus O((n − m)·m), which is fine for the bounded files this crate is
//! meant for.

use crate::error::Result;
use crate::traits::*;

/// Find the first occurrence of `needle` in `haystack` at or after `start`.
///
/// An empty needle matches at `start` if `start` is within the haystack
/// (its length included).
///
/// # Example
/// ```
/// use binio::utils::find_bytes;
///
/// let data = [0, 0, 0, 1, 2, 3, 0, 0, 3, 2];
/// assert_eq!(find_bytes(&data, &[1, 2, 3], 0), Some(3));
/// assert_eq!(find_bytes(&data, &[3, 2], 4), Some(8));
/// assert_eq!(find_bytes(&data, &[9, 9], 0), None);
/// ```
pub fn find_bytes(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    let last = haystack.len().checked_sub(needle.len())?;
    (start..=last).find(|&i| {
        needle
            .iter()
            .zip(&haystack[i..])
            .all(|(expected, actual)| expected == actual)
    })
}

/// Find the first occurrence of `needle` in a seekable source at or after
/// `start`.
///
/// Each compared byte is fetched with a seek followed by a one-byte read, so
/// nothing is loaded in bulk. The position of the source is restored before
/// returning, also on error.
pub fn find_bytes_in<S: ByteRead + ByteSeek>(
    source: &mut S,
    needle: &[u8],
    start: u64,
) -> Result<Option<u64>> {
    let saved = source.byte_pos();
    let result = scan(source, needle, start);
    let restored = source.set_byte_pos(saved);
    let found = result?;
    restored?;
    log::trace!(
        "Searched {} byte(s) from position {}: {:?}",
        needle.len(),
        start,
        found
    );
    Ok(found)
}

fn scan<S: ByteRead + ByteSeek>(source: &mut S, needle: &[u8], start: u64) -> Result<Option<u64>> {
    let len = source.byte_len()?;
    let Some(last) = len.checked_sub(needle.len() as u64) else {
        return Ok(None);
    };
    'outer: for i in start..=last {
        for (j, &expected) in needle.iter().enumerate() {
            source.set_byte_pos(i + j as u64)?;
            if source.read_byte()? != expected {
                continue 'outer;
            }
        }
        return Ok(Some(i));
    }
    Ok(None)
}
