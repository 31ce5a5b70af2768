/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::Result;
use binio::prelude::*;

macro_rules! test_round_trip {
    ($endianness: ident, $name: ident) => {
        #[test]
        fn $name() -> Result<()> {
            let mut writer = <BinaryWriter<$endianness, _>>::from_vec(Vec::new());
            for v in [0, 1, u8::MAX] {
                writer.write_u8(v)?;
            }
            for v in [i8::MIN, -1, 0, i8::MAX] {
                writer.write_i8(v)?;
            }
            for v in [0, u16::MAX] {
                writer.write_u16(v)?;
            }
            for v in [i16::MIN, i16::MAX] {
                writer.write_i16(v)?;
            }
            for v in [0, 0xDEADBEEF, u32::MAX] {
                writer.write_u32(v)?;
            }
            for v in [i32::MIN, -1, i32::MAX] {
                writer.write_i32(v)?;
            }
            for v in [0, u64::MAX] {
                writer.write_u64(v)?;
            }
            for v in [i64::MIN, i64::MAX] {
                writer.write_i64(v)?;
            }
            for v in [0.0, -0.0, f32::MIN_POSITIVE, f32::MAX, f32::INFINITY] {
                writer.write_f32(v)?;
            }
            for v in [f64::MIN, f64::EPSILON, f64::NEG_INFINITY] {
                writer.write_f64(v)?;
            }
            writer.write_f64(f64::NAN)?;
            let bytes = writer.into_inner().into_inner();

            let mut reader = <BinaryReader<$endianness, _>>::from_bytes(&bytes);
            for v in [0, 1, u8::MAX] {
                assert_eq!(reader.read_u8()?, v);
            }
            for v in [i8::MIN, -1, 0, i8::MAX] {
                assert_eq!(reader.read_i8()?, v);
            }
            for v in [0, u16::MAX] {
                assert_eq!(reader.read_u16()?, v);
            }
            for v in [i16::MIN, i16::MAX] {
                assert_eq!(reader.read_i16()?, v);
            }
            for v in [0, 0xDEADBEEF, u32::MAX] {
                assert_eq!(reader.read_u32()?, v);
            }
            for v in [i32::MIN, -1, i32::MAX] {
                assert_eq!(reader.read_i32()?, v);
            }
            for v in [0, u64::MAX] {
                assert_eq!(reader.read_u64()?, v);
            }
            for v in [i64::MIN, i64::MAX] {
                assert_eq!(reader.read_i64()?, v);
            }
            for v in [0.0_f32, -0.0, f32::MIN_POSITIVE, f32::MAX, f32::INFINITY] {
                assert_eq!(reader.read_f32()?.to_bits(), v.to_bits());
            }
            for v in [f64::MIN, f64::EPSILON, f64::NEG_INFINITY] {
                assert_eq!(reader.read_f64()?, v);
            }
            assert!(reader.read_f64()?.is_nan());
            assert!(reader.is_at_end());
            assert!(reader.read_u8().is_err());
            Ok(())
        }
    };
}

test_round_trip!(LE, test_round_trip_le);
test_round_trip!(BE, test_round_trip_be);

#[test]
fn test_byte_order() -> Result<()> {
    let bytes = [0x12, 0x34, 0x56, 0x78];
    let mut le = <BinaryReader<LE, _>>::from_bytes(&bytes);
    let mut be = <BinaryReader<BE, _>>::from_bytes(&bytes);
    assert_eq!(le.read_u32()?, 0x78563412);
    assert_eq!(be.read_u32()?, 0x12345678);
    Ok(())
}

#[test]
fn test_utf16_double_null() -> Result<()> {
    for charset in [Charset::Utf16Le, Charset::Utf16Be] {
        let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
        writer.write_double_null_terminated_string("Zażółć", charset)?;
        writer.write_double_null_terminated_string("", charset)?;
        let bytes = writer.into_inner().into_inner();
        assert_eq!(bytes.len(), 6 * 2 + 2 + 2);

        let mut reader = <BinaryReader<LE, _>>::from_bytes(&bytes);
        assert_eq!(
            reader.read_double_null_terminated_string(charset)?,
            "Zażółć"
        );
        assert_eq!(reader.read_double_null_terminated_string(charset)?, "");
        // no trailing bytes are left
        assert!(reader.is_at_end());
    }
    Ok(())
}

#[test]
fn test_fixed_strings() -> Result<()> {
    let mut writer = <BinaryWriter<BE, _>>::from_vec(Vec::new());
    writer.write_fixed_string("NAME", 8, Charset::Ascii)?;
    writer.write_fixed_string("", 2, Charset::Ascii)?;
    writer.write_fixed_string("exact", 5, Charset::Utf8)?;
    let bytes = writer.into_inner().into_inner();
    assert_eq!(bytes.len(), 15);

    let mut reader = <BinaryReader<BE, _>>::from_bytes(&bytes);
    assert_eq!(reader.read_fixed_string(8, Charset::Ascii)?, "NAME\0\0\0\0");
    reader.set_byte_pos(0)?;
    assert_eq!(reader.read_fixed_string_trimmed(8, Charset::Ascii)?, "NAME");
    assert_eq!(reader.read_fixed_string_trimmed(2, Charset::Ascii)?, "");
    assert_eq!(reader.read_fixed_string_trimmed(5, Charset::Utf8)?, "exact");
    Ok(())
}

#[test]
fn test_align_idempotent() -> Result<()> {
    for pad in [1, 2, 3, 4, 8, 16] {
        for start in 0..20 {
            let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
            writer.write_zero_bytes(start)?;
            writer.align(pad)?;
            let aligned = writer.byte_pos();
            assert_eq!(aligned % pad, 0);
            assert!(aligned >= start && aligned < start + pad);
            writer.align(pad)?;
            assert_eq!(writer.byte_pos(), aligned);

            let bytes = writer.into_inner().into_inner();
            let mut reader = <BinaryReader<LE, _>>::from_bytes(&bytes);
            reader.skip(start)?;
            reader.align(pad)?;
            assert_eq!(reader.byte_pos(), aligned);
            assert!(reader.is_at_end());
        }
    }
    Ok(())
}

#[test]
fn test_offset_table() -> Result<()> {
    // a header with the offsets of the strings, back-patched after writing them
    let names = ["alpha", "beta", "gamma"];
    let mut writer = <BinaryWriter<BE, _>>::from_vec(Vec::new());
    writer.write_u32(names.len() as u32)?;
    let table = writer.byte_pos();
    writer.write_zero_bytes(4 * names.len() as u64)?;
    for (i, name) in names.iter().enumerate() {
        let offset = writer.pos32()?;
        writer.temporary_jump(table + 4 * i as u64, |w| w.write_u32(offset))?;
        writer.write_null_terminated_string(name, Charset::Utf8)?;
        writer.align(4)?;
    }
    let bytes = writer.into_inner().into_inner();

    let mut reader = <BinaryReader<BE, _>>::from_bytes(&bytes);
    let count = reader.read_u32()?;
    let mut read = vec![];
    for _ in 0..count {
        let offset = reader.read_u32()? as u64;
        read.push(reader.temporary_jump(offset, |r| {
            r.read_null_terminated_string(Charset::Utf8)
        })?);
    }
    assert_eq!(read, names);
    assert_eq!(reader.byte_pos(), 16);
    assert_eq!(reader.find(b"gamma\0", 0)?, Some(32));
    Ok(())
}

#[test]
fn test_nested_jumps() -> Result<()> {
    let bytes: Vec<u8> = (0..32).collect();
    let mut reader = <BinaryReader<LE, _>>::from_bytes(&bytes);
    reader.skip(1)?;
    let sum = reader.temporary_jump(10, |r| {
        let a = r.read_u8()?;
        let b = r.temporary_jump(20, |r| {
            let c = r.temporary_jump(30, |r| r.read_u8())?;
            assert_eq!(r.byte_pos(), 20);
            Ok(c + r.read_u8()?)
        })?;
        assert_eq!(r.byte_pos(), 11);
        Ok(a + b)
    })?;
    assert_eq!(sum, 10 + 30 + 20);
    assert_eq!(reader.byte_pos(), 1);

    // the inner failure propagates, every level is restored
    let failed = reader.temporary_jump(10, |r| r.temporary_jump(31, |r| r.read_u16()));
    assert!(matches!(failed, Err(Error::EndOfData { pos: 31, .. })));
    assert_eq!(reader.byte_pos(), 1);
    Ok(())
}

#[test]
fn test_skip_while() -> Result<()> {
    let mut reader = <BinaryReader<LE, _>>::from_bytes([0_u8, 0, 0, 1, 2]);
    reader.skip_while_byte_equals(0)?;
    assert_eq!(reader.byte_pos(), 3);
    assert_eq!(reader.read_u8()?, 1);
    reader.skip_while_byte_equals(2)?;
    assert!(reader.is_at_end());
    Ok(())
}

#[test]
fn test_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.bin");

    let mut writer = <BinaryWriter<BE, _>>::create(&path)?;
    writer.write_u16(0xFEFF)?;
    writer.write_null_terminated_string("file", Charset::Latin1)?;
    writer.align(8)?;
    writer.write_i64(-42)?;
    writer.close()?;
    assert_eq!(std::fs::metadata(&path)?.len(), 16);

    let mut reader = <BinaryReader<BE, _>>::open(&path)?;
    assert_eq!(reader.len(), 16);
    assert_eq!(reader.read_u16()?, 0xFEFF);
    assert_eq!(reader.read_null_terminated_string(Charset::Latin1)?, "file");
    reader.align(8)?;
    assert_eq!(reader.read_i64()?, -42);
    assert!(reader.is_at_end());
    assert_eq!(reader.read_u16_at(0)?, 0xFEFF);
    assert_eq!(reader.find(b"le", 0)?, Some(4));

    // the same file through a cursor on the standard library file
    let file = std::fs::File::open(&path)?;
    let mut reader = <BinaryReader<LE, _>>::new(ByteCursor::new(file))?;
    assert_eq!(reader.read_u16()?, 0xFFFE);
    assert_eq!(reader.read_bytes_as_hex(4)?, "66696C65");
    Ok(())
}

#[test]
fn test_random_access_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("raf.bin");

    let mut file = RandomAccessBinaryFile::open(&path)?;
    assert_eq!(file.length()?, 0);
    file.write_u32(0x11223344)?;
    file.write_null_terminated_string("ok", Charset::Utf8)?;
    file.align(4)?;
    assert_eq!(file.length()?, 8);

    // big-endian access to the same handle
    file.seek(0)?;
    let mut reader = <BinaryReader<BE, _>>::new(file)?;
    assert_eq!(reader.read_u32()?, 0x44332211);
    let mut file = reader.into_inner();
    assert_eq!(file.file_pointer()?, 4);
    assert_eq!(file.read_null_terminated_string(Charset::Utf8)?, "ok");
    file.skip_null_bytes()?;
    assert_eq!(file.file_pointer()?, 8);

    file.set_length(2)?;
    assert_eq!(file.file_pointer()?, 2);
    file.close()?;
    assert!(matches!(
        file.seek(0),
        Err(Error::ClosedResource { op: "seek" })
    ));

    // reopening keeps the content
    let mut file = RandomAccessBinaryFile::open(&path)?;
    assert_eq!(file.length()?, 2);
    assert_eq!(file.read_u16()?, 0x3344);
    Ok(())
}

#[test]
fn test_pos32() -> Result<()> {
    let mut writer = <BinaryWriter<LE, _>>::from_vec(Vec::new());
    writer.set_byte_pos(u32::MAX as u64)?;
    assert_eq!(writer.pos32()?, u32::MAX);
    writer.set_byte_pos(u32::MAX as u64 + 1)?;
    assert!(matches!(
        writer.pos32(),
        Err(Error::PositionOverflow { pos }) if pos == u32::MAX as u64 + 1
    ));
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_charset_serde() -> Result<()> {
    let json = serde_json::to_string(&Charset::Utf16Le)?;
    assert_eq!(json, "\"Utf16Le\"");
    assert_eq!(serde_json::from_str::<Charset>(&json)?, Charset::Utf16Le);
    assert_eq!(Charset::default(), Charset::Utf8);
    Ok(())
}
