//! Rendering compressed bytes as Rust source literals, and parsing those
//! literals back for round-trip verification.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Wrap column used when the caller does not pick one. Matches the classic
/// MIME base64 line length.
pub const DEFAULT_LINE_WIDTH: usize = 76;

/// How compressed bytes appear in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// A `&str` of standard base64, split into a `concat!` of fixed-width
    /// pieces. Decoded at first access. The default.
    #[default]
    Base64,
    /// A `b"\x0a\x0b..."` byte-string literal with every byte hex-escaped,
    /// wrapped with `\`-newline continuations. No decode step at runtime,
    /// at the cost of four source characters per byte.
    ByteString,
}

impl Encoding {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::ByteString => "byte-string",
        }
    }
}

/// Renders `data` as a Rust literal expression, wrapped near `width` columns.
///
/// Continuation lines are indented four spaces past `indent`, the indent of
/// the declaration the literal is spliced into. A width of 0 is treated
/// as 1. The result carries no trailing newline; the caller appends `;`.
#[must_use]
pub fn encode(data: &[u8], encoding: Encoding, width: usize, indent: &str) -> String {
    let width = width.max(1);
    match encoding {
        Encoding::Base64 => encode_base64(data, width, indent),
        Encoding::ByteString => encode_byte_string(data, width, indent),
    }
}

fn encode_base64(data: &[u8], width: usize, indent: &str) -> String {
    let encoded = STANDARD.encode(data);
    // Rust has no implicit literal concatenation, so a wrapped string must
    // go through concat!.
    if encoded.len() <= width {
        return format!("\"{encoded}\"");
    }
    let mut out = String::with_capacity(encoded.len() + encoded.len() / width * (indent.len() + 8) + 16);
    out.push_str("concat!(\n");
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (piece, tail) = rest.split_at(rest.len().min(width));
        let _ = writeln!(out, "{indent}    \"{piece}\",");
        rest = tail;
    }
    out.push_str(indent);
    out.push(')');
    out
}

fn encode_byte_string(data: &[u8], width: usize, indent: &str) -> String {
    if data.is_empty() {
        return "b\"\"".to_owned();
    }
    // Four columns per byte as "\xNN".
    let per_line = (width / 4).max(1);
    let mut out = String::with_capacity(data.len() * 4 + data.len() / per_line * (indent.len() + 6) + 4);
    out.push_str("b\"");
    for (i, byte) in data.iter().enumerate() {
        if i > 0 && i % per_line == 0 {
            out.push_str("\\\n");
            out.push_str(indent);
            out.push_str("    ");
        }
        let _ = write!(out, "\\x{byte:02x}");
    }
    out.push('"');
    out
}

/// Parses a literal produced by [`encode`] back into its bytes.
///
/// Implements exactly the subset of Rust literal syntax the encoder emits:
/// quoted base64 pieces (bare or inside `concat!`), and byte strings made of
/// `\xNN` escapes and `\`-newline continuations.
///
/// # Errors
///
/// Returns [`Error::Compression`] when the text is not a literal this
/// encoder could have produced.
pub fn decode(literal: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Base64 => decode_base64(literal),
        Encoding::ByteString => decode_byte_string(literal),
    }
}

fn decode_base64(literal: &str) -> Result<Vec<u8>> {
    // Base64 text contains no quotes or escapes, so the pieces are simply
    // everything between quote pairs.
    let mut collected = String::with_capacity(literal.len());
    let mut in_quotes = false;
    for ch in literal.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => collected.push(ch),
            _ => {}
        }
    }
    if in_quotes {
        return Err(Error::Compression("base64 literal: unterminated string".to_owned()));
    }
    STANDARD
        .decode(collected)
        .map_err(|e| Error::Compression(format!("base64 literal: {e}")))
}

fn decode_byte_string(literal: &str) -> Result<Vec<u8>> {
    let bad = |msg: String| Error::Compression(format!("byte-string literal: {msg}"));
    let inner = literal
        .trim()
        .strip_prefix("b\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| bad("not a b\"...\" literal".to_owned()))?;

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 4);
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            return Err(bad(format!("unexpected byte {:?}", bytes[i] as char)));
        }
        match bytes.get(i + 1).copied() {
            Some(b'x') => {
                let hex = inner
                    .get(i + 2..i + 4)
                    .ok_or_else(|| bad("truncated \\x escape".to_owned()))?;
                let value = u8::from_str_radix(hex, 16).map_err(|_| bad(format!("invalid hex {hex:?}")))?;
                out.push(value);
                i += 4;
            }
            // A backslash-newline continuation swallows the newline and all
            // leading whitespace on the next line, as rustc does.
            Some(b'\n' | b'\r') => {
                i += 2;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
            }
            _ => return Err(bad("unsupported escape".to_owned())),
        }
    }
    Ok(out)
}
