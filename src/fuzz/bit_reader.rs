/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    init: Vec<u8>,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    ReadBit,
    ReadByte,
    ReadInt(u8),
    SetBitPos(u16),
}

/// The bit at `pos` in `data`, with bits numbered in reading order.
fn model_bit(data: &[u8], pos: usize, msb_first: bool) -> bool {
    let shift = if msb_first { 7 - pos % 8 } else { pos % 8 };
    data[pos / 8] & (1 << shift) != 0
}

fn model_int(data: &[u8], pos: usize, n_bits: usize, msb_first: bool) -> u32 {
    (pos..pos + n_bits).fold(0, |acc, i| acc << 1 | model_bit(data, i, msb_first) as u32)
}

pub fn harness(data: FuzzCase) {
    let init = &data.init;
    let len = init.len() * 8;
    let mut idx = 0;
    let mut big = <BitReader<BE, _>>::new(init);
    let mut little = <BitReader<LE, _>>::new(init);

    for command in data.commands {
        match command {
            RandomCommand::ReadBit => {
                let (b, l) = (big.read_bit(), little.read_bit());
                if idx < len {
                    assert_eq!(b.unwrap(), model_bit(init, idx, true));
                    assert_eq!(l.unwrap(), model_bit(init, idx, false));
                    idx += 1;
                } else {
                    assert!(b.is_err() && l.is_err());
                }
            }
            RandomCommand::ReadByte => {
                let (b, l) = (big.read_byte(), little.read_byte());
                if idx + 8 <= len {
                    assert_eq!(b.unwrap() as u32, model_int(init, idx, 8, true));
                    assert_eq!(l.unwrap() as u32, model_int(init, idx, 8, false));
                    idx += 8;
                } else {
                    // the bits before the end are consumed
                    assert!(b.is_err() && l.is_err());
                    idx = len;
                }
            }
            RandomCommand::ReadInt(n_bits) => {
                let n_bits = (n_bits % 40) as usize;
                let (b, l) = (big.read_int(n_bits), little.read_int(n_bits));
                if n_bits > MAX_INT_BITS {
                    assert!(matches!(b, Err(Error::InvalidBitWidth { .. })));
                    assert!(matches!(l, Err(Error::InvalidBitWidth { .. })));
                } else if idx + n_bits <= len {
                    assert_eq!(b.unwrap(), model_int(init, idx, n_bits, true));
                    assert_eq!(l.unwrap(), model_int(init, idx, n_bits, false));
                    idx += n_bits;
                } else {
                    assert!(b.is_err() && l.is_err());
                    idx = len;
                }
            }
            RandomCommand::SetBitPos(pos) => {
                let pos = pos as usize;
                let (b, l) = (big.set_bit_pos(pos as u64), little.set_bit_pos(pos as u64));
                if pos <= len {
                    assert!(b.is_ok() && l.is_ok());
                    idx = pos;
                } else {
                    assert!(b.is_err() && l.is_err());
                }
            }
        };
        assert_eq!(big.bit_pos(), idx as u64);
        assert_eq!(little.bit_pos(), idx as u64);
        assert_eq!(big.is_at_end(), idx == len);
    }
}
