//! Header rendering and the inverse transform back to script bytes.

use anyhow::{anyhow, Result};
use regex::Regex;

use crate::encode::{escape_tokens, hex_upper, wrap_columns, WRAP_COLUMNS};

/// Separator between wrapped segments: close quote, backslash continuation,
/// newline, tab indent, open quote.
const SEGMENT_JOIN: &str = "\"\\\n\t\"";

/// Render the C declaration embedding `body` as a hex-escaped literal.
///
/// Output shape, with no trailing newline after the semicolon:
///
/// ```text
/// static const char <array_name>[] = \
/// 	"\x61\x28...up to 80 columns..."\
/// 	"...";
/// ```
pub fn render_header(array_name: &str, body: &[u8]) -> String {
    let tokens = escape_tokens(&hex_upper(body));
    let segments = wrap_columns(&tokens, WRAP_COLUMNS);
    format!(
        "static const char {array_name}[] = \\\n\t\"{}\";",
        segments.join(SEGMENT_JOIN)
    )
}

/// Parsed form of a generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub array_name: String,
    pub bytes: Vec<u8>,
}

/// Parse a generated header back into the script bytes it embeds.
///
/// Accepts the shape [`render_header`] produces: one declaration whose quoted
/// segments are joined by backslash continuations. Segments are concatenated
/// before decoding, so wrap cuts that landed mid-token are harmless.
pub fn parse_header(text: &str) -> Result<ParsedHeader> {
    let decl = Regex::new(r"static const char ([A-Za-z_][A-Za-z0-9_]*)\[\] = \\\n")?;
    let captures = decl
        .captures(text)
        .ok_or_else(|| anyhow!("not a generated script header"))?;
    let array_name = captures[1].to_string();

    let quoted = Regex::new(r#""([^"]*)""#)?;
    let mut tokens = String::new();
    for segment in quoted.captures_iter(text) {
        tokens.push_str(&segment[1]);
    }

    Ok(ParsedHeader {
        array_name,
        bytes: decode_escapes(&tokens)?,
    })
}

/// Decode concatenated `\xHH` escape tokens back into raw bytes.
///
/// Strict about shape: every token is exactly four characters, so anything
/// that is not a whole number of well-formed tokens is an error. Lowercase
/// hex digits are accepted even though the generator only emits uppercase.
pub fn decode_escapes(tokens: &str) -> Result<Vec<u8>> {
    let raw = tokens.as_bytes();
    if raw.len() % 4 != 0 {
        return Err(anyhow!("truncated escape sequence (length {})", raw.len()));
    }

    let mut bytes = Vec::with_capacity(raw.len() / 4);
    for (index, token) in raw.chunks_exact(4).enumerate() {
        if token[0] != b'\\' || token[1] != b'x' {
            return Err(anyhow!("malformed escape at offset {}", index * 4));
        }
        let hi = hex_value(token[2])
            .ok_or_else(|| anyhow!("invalid hex digit at offset {}", index * 4 + 2))?;
        let lo = hex_value(token[3])
            .ok_or_else(|| anyhow!("invalid hex digit at offset {}", index * 4 + 3))?;
        bytes.push((hi << 4) | lo);
    }

    Ok(bytes)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
