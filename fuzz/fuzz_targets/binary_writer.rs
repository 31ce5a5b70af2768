#![no_main]

use binio::fuzz::binary_writer::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| harness(data));
