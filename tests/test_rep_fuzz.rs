/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

#[cfg(feature = "fuzz")]
use anyhow::Result;

macro_rules! impl_fuzz_repr {
    ($func_name:ident, $fuzz_name:ident) => {
        #[cfg(feature = "fuzz")]
        #[test]
        fn $func_name() -> Result<()> {
            use arbitrary::Arbitrary;
            use binio::fuzz::$fuzz_name::*;
            let dir = format!("fuzz/corpus/{}", stringify!($fuzz_name));
            // the corpus is only there after a fuzzing session
            let Ok(entries) = std::fs::read_dir(&dir) else {
                return Ok(());
            };
            for file in entries {
                let file = file?;
                if file.file_type()?.is_dir() {
                    continue;
                }
                let file_bytes = std::fs::read(file.path())?;
                let mut unstructured = arbitrary::Unstructured::new(&file_bytes);
                let data = FuzzCase::arbitrary(&mut unstructured)?;
                harness(data);
            }
            Ok(())
        }
    };
}

impl_fuzz_repr!(test_rep_fuzz_binary_reader, binary_reader);
impl_fuzz_repr!(test_rep_fuzz_binary_writer, binary_writer);
impl_fuzz_repr!(test_rep_fuzz_bit_reader, bit_reader);

macro_rules! impl_fuzz_random {
    ($func_name:ident, $fuzz_name:ident) => {
        #[cfg(feature = "fuzz")]
        #[test]
        fn $func_name() -> Result<()> {
            use arbitrary::Arbitrary;
            use binio::fuzz::$fuzz_name::*;
            use rand::rngs::SmallRng;
            use rand::{Rng, SeedableRng};
            let mut r = SmallRng::seed_from_u64(0);
            for _ in 0..1000 {
                let len = r.gen_range(0..512);
                let bytes: Vec<u8> = (0..len).map(|_| r.r#gen()).collect();
                let mut unstructured = arbitrary::Unstructured::new(&bytes);
                if let Ok(data) = FuzzCase::arbitrary(&mut unstructured) {
                    harness(data);
                }
            }
            Ok(())
        }
    };
}

impl_fuzz_random!(test_random_fuzz_binary_reader, binary_reader);
impl_fuzz_random!(test_random_fuzz_binary_writer, binary_writer);
impl_fuzz_random!(test_random_fuzz_bit_reader, bit_reader);
