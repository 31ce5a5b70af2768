/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{Error, Result};

/// The smallest multiple of `pad` that is greater than or equal to `pos`.
///
/// Fails with [`Error::InvalidAlignment`] if `pad` is zero.
#[inline]
pub fn align_up(pos: u64, pad: u64) -> Result<u64> {
    if pad == 0 {
        return Err(Error::InvalidAlignment { pad });
    }
    match pos % pad {
        0 => Ok(pos),
        rem => Ok(pos + (pad - rem)),
    }
}

/// A copy of `src` extended with zeros to the next multiple of `pad`.
///
/// Slices whose length is already a multiple of `pad` are returned
/// unchanged.
pub fn pad_array(src: &[u8], pad: usize) -> Result<Vec<u8>> {
    let target = align_up(src.len() as u64, pad as u64)? as usize;
    let mut dest = Vec::with_capacity(target);
    dest.extend_from_slice(src);
    dest.resize(target, 0);
    Ok(dest)
}
