#![no_main]

use binio::fuzz::bit_reader::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| harness(data));
