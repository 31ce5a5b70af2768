/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    WriteU8(u8),
    WriteU16(u16),
    WriteU32(u32),
    WriteI64(i64),
    WriteF64(f64),
    WriteNullTerminated(String),
    WriteFixed(String, u8),
    Align(u8),
    SetPosition(u16),
    Patch(u16, u32),
}

/// Write `bytes` at `pos` in `model`, zero-filling any gap.
fn model_write(model: &mut Vec<u8>, pos: usize, bytes: &[u8]) -> usize {
    let end = pos + bytes.len();
    if end > model.len() {
        model.resize(end, 0);
    }
    model[pos..end].copy_from_slice(bytes);
    end
}

pub fn harness(data: FuzzCase) {
    let mut model = Vec::new();
    let mut idx = 0;
    let mut writer = <BinaryWriter<BE, _>>::from_vec(Vec::new());

    for command in data.commands {
        match command {
            RandomCommand::WriteU8(value) => {
                writer.write_u8(value).unwrap();
                idx = model_write(&mut model, idx, &[value]);
            }
            RandomCommand::WriteU16(value) => {
                writer.write_u16(value).unwrap();
                idx = model_write(&mut model, idx, &value.to_be_bytes());
            }
            RandomCommand::WriteU32(value) => {
                writer.write_u32(value).unwrap();
                idx = model_write(&mut model, idx, &value.to_be_bytes());
            }
            RandomCommand::WriteI64(value) => {
                writer.write_i64(value).unwrap();
                idx = model_write(&mut model, idx, &value.to_be_bytes());
            }
            RandomCommand::WriteF64(value) => {
                writer.write_f64(value).unwrap();
                idx = model_write(&mut model, idx, &value.to_bits().to_be_bytes());
            }
            RandomCommand::WriteNullTerminated(s) => {
                writer
                    .write_null_terminated_string(&s, Charset::Utf8)
                    .unwrap();
                idx = model_write(&mut model, idx, s.as_bytes());
                idx = model_write(&mut model, idx, &[0]);
            }
            RandomCommand::WriteFixed(s, len) => {
                let len = len as usize;
                let result = writer.write_fixed_string(&s, len, Charset::Utf8);
                if s.len() <= len {
                    assert!(result.is_ok());
                    let mut bytes = s.into_bytes();
                    bytes.resize(len, 0);
                    idx = model_write(&mut model, idx, &bytes);
                } else {
                    assert!(matches!(result, Err(Error::StringTooLong { .. })));
                }
            }
            RandomCommand::Align(pad) => {
                let result = writer.align(pad as u64);
                if pad == 0 {
                    assert!(result.is_err());
                } else {
                    assert!(result.is_ok());
                    let target = idx.next_multiple_of(pad as usize);
                    if target > idx {
                        idx = model_write(&mut model, idx, &vec![0; target - idx]);
                    }
                }
            }
            RandomCommand::SetPosition(pos) => {
                writer.set_byte_pos(pos as u64).unwrap();
                idx = pos as usize;
            }
            RandomCommand::Patch(addr, value) => {
                writer
                    .temporary_jump(addr as u64, |w| w.write_u32(value))
                    .unwrap();
                model_write(&mut model, addr as usize, &value.to_be_bytes());
            }
        };
        assert_eq!(writer.byte_pos(), idx as u64);
    }

    // a trailing seek past the end is not materialized until a write
    let written = writer.into_inner().into_inner();
    assert_eq!(written, model);
}
