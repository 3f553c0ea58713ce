//! Legacy-compatible JSON encoding.
//!
//! Published `ncma.json` files were produced by a scripting-language encoder
//! running with default settings: `", "` between items, `": "` between keys
//! and values, no whitespace otherwise, and every non-ASCII character
//! written as a `\uXXXX` escape. [`LegacyFormatter`] reproduces that layout
//! on top of `serde_json` so regenerated files diff cleanly against old ones.
//!
//! Numbers arrive as their source literals (`arbitrary_precision`). Integers
//! are copied as written, except `-0` which the legacy encoder printed as
//! `0`. Floats are printed as the shortest round-trip repr with the legacy
//! layout: `1.1`, `100.0`, `0.0001`, `1e-05`, `1e+16`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/// `serde_json` formatter emitting the legacy byte layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        // serde_json has already split out quotes, backslashes and C0
        // controls; everything outside printable ASCII is escaped here.
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&bytes[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }

    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if !value.contains(['.', 'e', 'E']) {
            let digits = if value == "-0" { "0" } else { value };
            return writer.write_all(digits.as_bytes());
        }
        match value.parse::<f64>() {
            Ok(float) if float.is_finite() => writer.write_all(float_repr(float).as_bytes()),
            // out of f64 range: keep the literal so the output stays valid JSON
            _ => writer.write_all(value.as_bytes()),
        }
    }
}

/// Shortest round-trip representation of a finite float in legacy layout.
fn float_repr(value: f64) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return format!("{sign}0.0");
    }

    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let (head, tail) = digits.split_at(1);
        let fraction = if tail.is_empty() {
            String::new()
        } else {
            format!(".{tail}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{head}{fraction}e{exp_sign}{:02}", exponent.unsigned_abs());
    }

    if exponent < 0 {
        let zeros = usize::try_from(-exponent - 1).unwrap_or(0);
        return format!("{sign}0.{}{digits}", "0".repeat(zeros));
    }

    let point = usize::try_from(exponent).unwrap_or(0) + 1;
    if digits.len() > point {
        format!("{sign}{}.{}", &digits[..point], &digits[point..])
    } else {
        format!("{sign}{digits}{}.0", "0".repeat(point - digits.len()))
    }
}

/// Serializes `value` with [`LegacyFormatter`].
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut out, LegacyFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &serde_json::Value) -> String {
        String::from_utf8(to_vec(value).unwrap()).unwrap()
    }

    #[test]
    fn separators_match_legacy_layout() {
        let value = json!({"aaData": [["a", 1, null, true]], "n": 2});
        assert_eq!(
            encode(&value),
            r#"{"aaData": [["a", 1, null, true]], "n": 2}"#
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(encode(&json!({"a": [], "b": {}})), r#"{"a": [], "b": {}}"#);
    }

    #[test]
    fn key_order_is_preserved() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "aaData": [], "a": 2}"#).unwrap();
        assert_eq!(encode(&value), r#"{"z": 1, "aaData": [], "a": 2}"#);
    }

    #[test]
    fn non_ascii_is_escaped() {
        assert_eq!(encode(&json!("\u{3a9}mega")), r#""\u03a9mega""#);
        assert_eq!(encode(&json!("caf\u{e9}")), r#""caf\u00e9""#);
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        assert_eq!(encode(&json!("x\u{1f600}y")), r#""x\ud83d\ude00y""#);
    }

    #[test]
    fn delete_character_is_escaped() {
        assert_eq!(encode(&json!("a\u{7f}b")), r#""a\u007fb""#);
    }

    #[test]
    fn control_characters_and_quotes() {
        assert_eq!(
            encode(&json!("q\"b\\n\nt\tc\u{1}")),
            r#""q\"b\\n\nt\tc\u0001""#
        );
    }

    fn reencode(source: &str) -> String {
        encode(&serde_json::from_str(source).unwrap())
    }

    #[test]
    fn integers_are_copied_as_written() {
        assert_eq!(
            reencode("[123456789012345678901234567890, 18446744073709551616, -7]"),
            "[123456789012345678901234567890, 18446744073709551616, -7]"
        );
    }

    #[test]
    fn negative_zero_integer_becomes_zero() {
        assert_eq!(reencode("[-0, -0.0]"), "[0, -0.0]");
    }

    #[test]
    fn floats_use_legacy_repr() {
        assert_eq!(
            reencode("[1.10, 1E2, 2.50e0, 0.0001, 0.00001, 1e16, 1234567890123456.0, -1.5e-7]"),
            "[1.1, 100.0, 2.5, 0.0001, 1e-05, 1e+16, 1234567890123456.0, -1.5e-07]"
        );
    }

    #[test]
    fn slash_and_html_are_not_escaped() {
        assert_eq!(
            encode(&json!(r#"<a href="https://x/y">z</a>"#)),
            r#""<a href=\"https://x/y\">z</a>""#
        );
    }
}
