//! # PC437 Text Encoding
//!
//! ESC/POS printers start up in code page PC437 (USA, Standard Europe).
//! Text is sent as single bytes in that code page: ASCII is unchanged, the
//! upper half carries accented Latin letters, box drawing, shade blocks and
//! a few Greek/math symbols. Anything else prints as `?`.

use tracing::warn;

/// PC437 bytes 0x80..=0xFF in order, sixteen per row.
const UPPER_HALF: [&str; 8] = [
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»",
    "░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩",
    "≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{00A0}",
];

/// Encode `text` as PC437 bytes, replacing unmapped characters with `?`.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        out.push(encode_char(ch).unwrap_or_else(|| {
            warn!(character = %ch, "no PC437 mapping, printing '?'");
            b'?'
        }));
    }
    out
}

/// Single-character lookup. `None` when PC437 has no glyph for `ch`.
pub fn encode_char(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    UPPER_HALF
        .iter()
        .flat_map(|row| row.chars())
        .position(|c| c == ch)
        .map(|index| 0x80 + index as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_128_entries() {
        let total: usize = UPPER_HALF.iter().map(|row| row.chars().count()).sum();
        assert_eq!(total, 128);
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Hello, typewriter!"), b"Hello, typewriter!");
    }

    #[test]
    fn test_row_boundaries() {
        assert_eq!(encode_char('Ç'), Some(0x80));
        assert_eq!(encode_char('Å'), Some(0x8F));
        assert_eq!(encode_char('á'), Some(0xA0));
        assert_eq!(encode_char('■'), Some(0xFE));
        assert_eq!(encode_char('\u{00A0}'), Some(0xFF));
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(encode("Café 20°"), vec![b'C', b'a', b'f', 0x82, b' ', b'2', b'0', 0xF8]);
        assert_eq!(encode("┌─┐"), vec![0xDA, 0xC4, 0xBF]);
    }

    #[test]
    fn test_unmapped_becomes_question_mark() {
        assert_eq!(encode("☕"), vec![b'?']);
        assert_eq!(encode_char('★'), None);
    }
}
