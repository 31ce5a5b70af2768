/*
 * SPDX-FileCopyrightText: 2024 binio contributors
 *
 * SPDX-License-Identifier: Apache-2.0
 */

//! Text encodings accepted by the string operations of the streams.
//!
//! Decoding never fails: malformed input is replaced by U+FFFD, matching what
//! tools working on undocumented formats need when a guess about the
//! encoding is wrong. Encoding replaces characters that have no
//! representation in the target charset with `?`.

use std::borrow::Cow;

/// A text encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Charset {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1: each byte is the code point with the same value.
    Latin1,
}

impl Charset {
    /// Decode `bytes` into a string.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => match String::from_utf8_lossy(bytes) {
                Cow::Borrowed(s) => s.to_owned(),
                Cow::Owned(s) => s,
            },
            Charset::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Charset::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Charset::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        b as char
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Charset::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    /// Encode `s` into bytes.
    pub fn encode(self, s: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => s.as_bytes().to_vec(),
            Charset::Utf16Le => s.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Charset::Utf16Be => s.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Ascii => s
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Charset::Latin1 => s
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let mut s: String = char::decode_utf16(chunks.map(|c| unit([c[0], c[1]])))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        s.push(char::REPLACEMENT_CHARACTER);
    }
    s
}
