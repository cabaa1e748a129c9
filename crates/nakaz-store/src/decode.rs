//! Decoding of the legacy reference file.
//!
//! The file is tab-separated, one article version per line, with an ASCII
//! header. Its text columns were written with every byte shifted down by
//! 0xB0 from windows-1251, so they are shifted back before decoding:
//!
//! - column 0 (caption): spaces, dots and digits are stored as-is; any other
//!   printable ASCII byte is shifted only when the result is a Cyrillic
//!   letter (0xC0..=0xFF, Ё 0xA8, ё 0xB8)
//! - columns 7 and 8: every byte except whitespace is shifted
//! - all other columns are ASCII, read as Latin-1 if they are not
//!
//! A few repeal markers survive the shift garbled and are patched afterwards.

use encoding_rs::WINDOWS_1251;

const SHIFT: u8 = 0xB0;

/// Garbled repeal markers and their repaired text, applied in order.
/// Longer forms come first so a shorter one never rewrites part of them.
const ENCODING_FIXES: &[(&str, &str)] = &[
    ("(8A:;NG5=0)", "(Исключена)"),
    ("(8A:;NG5=)", "(Исключен)"),
    ("8A:;NG5=0", "Исключена"),
    ("8A:;NG5=", "Исключен"),
];

const CAPTION_COLUMN: usize = 0;
const SHIFTED_TEXT_COLUMNS: [usize; 2] = [7, 8];

/// Split raw file bytes into lines of decoded fields. The first line is the
/// header.
pub fn decode_reference(bytes: &[u8]) -> Vec<Vec<String>> {
    bytes
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if i == 0 {
                decode_header(line)
            } else {
                decode_row(line)
            }
        })
        .collect()
}

fn decode_header(line: &[u8]) -> Vec<String> {
    line.split(|&b| b == b'\t')
        .map(|field| {
            field
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect()
        })
        .collect()
}

fn decode_row(line: &[u8]) -> Vec<String> {
    line.split(|&b| b == b'\t')
        .enumerate()
        .map(|(i, field)| repair(decode_field(field, i)))
        .collect()
}

pub fn decode_field(field: &[u8], column: usize) -> String {
    if field.is_empty() {
        return String::new();
    }
    if column == CAPTION_COLUMN {
        decode_caption(field)
    } else if SHIFTED_TEXT_COLUMNS.contains(&column) {
        decode_shifted_text(field)
    } else {
        // ASCII, or Latin-1 where every byte is its own code point.
        field.iter().map(|&b| b as char).collect()
    }
}

fn decode_caption(field: &[u8]) -> String {
    let restored: Vec<u8> = field
        .iter()
        .map(|&b| match b {
            b' ' | b'.' | b'0'..=b'9' => b,
            0x21..=0x7E => {
                let shifted = b.wrapping_add(SHIFT);
                if shifted >= 0xC0 || shifted == 0xA8 || shifted == 0xB8 {
                    shifted
                } else {
                    b
                }
            }
            _ => b,
        })
        .collect();
    cp1251(&restored)
}

fn decode_shifted_text(field: &[u8]) -> String {
    let restored: Vec<u8> = field
        .iter()
        .map(|&b| match b {
            b' ' | b'\t' | b'\n' | b'\r' => b,
            _ => b.wrapping_add(SHIFT),
        })
        .collect();
    cp1251(&restored)
}

fn cp1251(bytes: &[u8]) -> String {
    let (text, _had_errors) = WINDOWS_1251.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn repair(mut text: String) -> String {
    for (broken, fixed) in ENCODING_FIXES {
        if text.contains(broken) {
            text = text.replace(broken, fixed);
        }
    }
    text
}

/// Inverse of the caption and text column shift, for building fixtures.
#[cfg(test)]
pub(crate) fn encode_shifted(text: &str) -> Vec<u8> {
    let (bytes, _, _) = WINDOWS_1251.encode(text);
    bytes
        .iter()
        .map(|&b| match b {
            b' ' | b'.' | b'0'..=b'9' | b'\t' | b'\n' | b'\r' => b,
            _ => b.wrapping_sub(SHIFT),
        })
        .collect()
}
