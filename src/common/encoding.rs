//! Character encoding utilities for FlowJo tables and PDF text.
//!
//! FlowJo exports its statistics tables in Mac OS Roman. PDF's built-in
//! Helvetica is addressed through WinAnsiEncoding (Windows-1252). Both
//! conversions go through `encoding_rs`.

use encoding_rs::{EncoderResult, Encoding};

/// Encoding of FlowJo table exports.
pub const TABLE_ENCODING: &Encoding = encoding_rs::MACINTOSH;

/// Byte written for characters WinAnsiEncoding cannot represent.
const UNMAPPABLE: u8 = b'?';

/// Decode a FlowJo table to UTF-8.
///
/// A leading byte order mark overrides the Mac OS Roman default, so tables
/// re-saved as UTF-8 or UTF-16 by other tools still load.
///
/// # Examples
/// ```
/// use fjstatplot::common::encoding::decode_table_bytes;
///
/// // 0x8E is e-acute in Mac OS Roman
/// assert_eq!(decode_table_bytes(b"CD4\x8E"), "CD4\u{e9}");
/// ```
#[inline]
pub fn decode_table_bytes(bytes: &[u8]) -> String {
    decode_with(bytes, TABLE_ENCODING)
}

/// Decode bytes with an explicit fallback encoding, honouring a BOM.
pub fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "input contained undecodable bytes");
    }
    text.into_owned()
}

/// Encode text as Windows-1252 for PDF string literals.
///
/// Characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut encoder = encoding_rs::WINDOWS_1252.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buffer = [0u8; 256];
    let mut remaining = text;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(remaining, &mut buffer, true);
        out.extend_from_slice(&buffer[..written]);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(_) => out.push(UNMAPPABLE),
        }
    }

    out
}
