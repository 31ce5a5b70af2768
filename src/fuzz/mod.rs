/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

//! Fuzzing harnesses.
//!
//! Each module exposes a `FuzzCase` built with [`arbitrary`] and a `harness`
//! function that runs it against a plain model of the stream, so that the
//! same cases can be run by `cargo fuzz` and replayed by the tests.

pub mod binary_reader;
pub mod binary_writer;
pub mod bit_reader;
