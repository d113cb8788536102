//! Hex encoding, escape grouping, and the fixed-width wrap.

/// Column width of the wrapped literal segments.
pub const WRAP_COLUMNS: usize = 80;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Render bytes as contiguous uppercase hex, two digits per byte.
///
/// The result length is always exactly `2 * bytes.len()`.
pub fn hex_upper(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        hex.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
    }
    hex
}

/// Regroup a hex string into concatenated `\xHH` escape tokens.
///
/// Digits are consumed two at a time; a trailing odd digit is dropped
/// silently. [`hex_upper`] always produces an even count, so the drop is
/// unreachable in the pipeline and exists only as slack in this function's
/// input contract.
pub fn escape_tokens(hex: &str) -> String {
    let mut tokens = String::with_capacity(hex.len() * 2);
    for pair in hex.as_bytes().chunks_exact(2) {
        tokens.push_str("\\x");
        tokens.push(pair[0] as char);
        tokens.push(pair[1] as char);
    }
    tokens
}

/// Cut `text` into consecutive segments of at most `width` characters.
///
/// The cut is a raw fixed-width one and may land in the middle of a `\xHH`
/// token; generated headers must stay byte-identical with ones produced by
/// the earlier packaging scripts, whose wrap behaved exactly like this.
/// `text` must be ASCII, which holds for escape-token input.
pub fn wrap_columns(text: &str, width: usize) -> Vec<&str> {
    debug_assert!(width > 0, "wrap width must be positive");
    debug_assert!(text.is_ascii(), "wrap input must be ASCII");

    let mut segments = Vec::with_capacity(text.len() / width + 1);
    let mut rest = text;
    while rest.len() > width {
        let (head, tail) = rest.split_at(width);
        segments.push(head);
        rest = tail;
    }
    segments.push(rest);
    segments
}
