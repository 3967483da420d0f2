//! PDF text strings and chapter titles.

use lopdf::{Object, StringFormat};

const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Title of the chapter for a file: its name without a trailing `.pdf`
/// (any case).
pub fn chapter_title(display_name: &str) -> &str {
    let len = display_name.len();
    if len >= 4
        && display_name.is_char_boundary(len - 4)
        && display_name[len - 4..].eq_ignore_ascii_case(".pdf")
    {
        &display_name[..len - 4]
    } else {
        display_name
    }
}

/// Encode text as a PDF text string: UTF-16BE with a byte-order mark,
/// written in hexadecimal form.
pub fn encode_text_string(text: &str) -> Object {
    let mut bytes = Vec::with_capacity(UTF16BE_BOM.len() + text.len() * 2);
    bytes.extend_from_slice(&UTF16BE_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string.
///
/// UTF-16BE and UTF-8 strings are recognised by their byte-order marks;
/// anything else is read as PDFDocEncoding, approximated by Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16BE_BOM) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    bytes.iter().map(|&b| char::from(b)).collect()
}
