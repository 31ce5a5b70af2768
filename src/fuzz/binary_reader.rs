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
    GetPosition,
    SetPosition(u16),
    ReadU8,
    ReadU16,
    ReadU32,
    ReadU64,
    ReadU32At(u16),
    Skip(u16),
    Align(u8),
    SkipWhile(u8),
    ReadNullTerminated,
    Find(Vec<u8>, u16),
}

fn le_value(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0, |acc, &b| acc << 8 | b as u64)
}

pub fn harness(data: FuzzCase) {
    let init = &data.init;
    let len = init.len();
    let mut idx = 0;
    let mut reader = <BinaryReader<LE, _>>::from_bytes(init);

    macro_rules! check_read {
        ($read:ident, $n:expr) => {{
            let result = reader.$read();
            if idx + $n <= len {
                assert_eq!(result.unwrap() as u64, le_value(&init[idx..idx + $n]));
                idx += $n;
            } else {
                assert!(result.is_err());
            }
        }};
    }

    for command in data.commands {
        match command {
            RandomCommand::GetPosition => {
                assert_eq!(reader.byte_pos(), idx as u64);
                assert_eq!(reader.is_at_end(), idx == len);
            }
            RandomCommand::SetPosition(pos) => {
                let pos = pos as usize;
                let result = reader.set_byte_pos(pos as u64);
                if pos <= len {
                    assert!(result.is_ok());
                    idx = pos;
                } else {
                    assert!(result.is_err());
                }
            }
            RandomCommand::ReadU8 => check_read!(read_u8, 1),
            RandomCommand::ReadU16 => check_read!(read_u16, 2),
            RandomCommand::ReadU32 => check_read!(read_u32, 4),
            RandomCommand::ReadU64 => check_read!(read_u64, 8),
            RandomCommand::ReadU32At(addr) => {
                let addr = addr as usize;
                let result = reader.read_u32_at(addr as u64);
                if addr + 4 <= len {
                    assert_eq!(result.unwrap() as u64, le_value(&init[addr..addr + 4]));
                } else {
                    assert!(result.is_err());
                }
            }
            RandomCommand::Skip(n) => {
                let n = n as usize;
                let result = reader.skip(n as u64);
                if idx + n <= len {
                    assert!(result.is_ok());
                    idx += n;
                } else {
                    assert!(result.is_err());
                }
            }
            RandomCommand::Align(pad) => {
                let result = reader.align(pad as u64);
                if pad == 0 {
                    assert!(result.is_err());
                } else {
                    let target = idx.next_multiple_of(pad as usize);
                    if target <= len {
                        assert!(result.is_ok());
                        idx = target;
                    } else {
                        assert!(result.is_err());
                    }
                }
            }
            RandomCommand::SkipWhile(value) => {
                reader.skip_while_byte_equals(value).unwrap();
                while idx < len && init[idx] == value {
                    idx += 1;
                }
            }
            RandomCommand::ReadNullTerminated => {
                let result = reader.read_null_terminated_string(Charset::Latin1);
                match init[idx..].iter().position(|&b| b == 0) {
                    Some(zero) => {
                        let expected: String =
                            init[idx..idx + zero].iter().map(|&b| b as char).collect();
                        assert_eq!(result.unwrap(), expected);
                        idx += zero + 1;
                    }
                    None => {
                        assert!(result.is_err());
                        idx = len;
                    }
                }
            }
            RandomCommand::Find(needle, start) => {
                let found = reader.find(&needle, start as u64).unwrap();
                assert_eq!(
                    found,
                    find_bytes(init, &needle, start as usize).map(|i| i as u64)
                );
            }
        };
        assert_eq!(reader.byte_pos(), idx as u64);
    }
}
