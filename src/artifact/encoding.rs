// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact byte decoding.
//!
//! ```text
//! bytes --BOM?--> UTF-8 / UTF-16LE / UTF-16BE (BOM stripped)
//!       --valid UTF-8?--> as is
//!       --otherwise--> Windows-1252
//! ```
//!
//! Uses `encoding_rs`. Windows-1252 maps every byte, so decoding never fails.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Which decoder produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Plain UTF-8 without a BOM.
    Utf8,
    /// Text carried a byte-order mark; holds the encoding's label.
    Bom(&'static str),
    /// Not valid UTF-8; decoded as Windows-1252.
    Legacy,
}

/// Decode artifact bytes into text.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> (String, SourceEncoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text.into_owned(), SourceEncoding::Bom(encoding.name()));
    }

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text.into_owned(), SourceEncoding::Utf8);
    }

    let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text.into_owned(), SourceEncoding::Legacy)
}
