//! Scalar tokens and numeric array shorthand.

use std::sync::OnceLock;

use regex::Regex;
use tagpath_tag::{Tag, TagKind};

use crate::error::ParseError;
use crate::escape::{unescape, unquote};

const ELEMENT: &str = r"[-+]?(?:[0-9]+|#[0-9A-Fa-f]+)";

fn suffixed_decimal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+([dDfF])$").unwrap())
}

fn suffixed_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?[0-9]+([bBsSiIlL])$").unwrap())
}

fn bare_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?[0-9]+$").unwrap())
}

fn bare_decimal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").unwrap())
}

fn numeric_array() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^\[\s*({ELEMENT}(?:\s*,\s*{ELEMENT})*)?\s*,?\s*\]([bBiIlL])?$"
        ))
        .unwrap()
    })
}

/// A bracketed list of integers, with its optional kind suffix.
pub(crate) struct ArrayShape<'a> {
    pub(crate) body: &'a str,
    pub(crate) suffix: Option<char>,
}

pub(crate) fn numeric_array_shape(text: &str) -> Option<ArrayShape<'_>> {
    let caps = numeric_array().captures(text)?;
    Some(ArrayShape {
        body: caps.get(1).map_or("", |m| m.as_str()),
        suffix: caps.get(2).and_then(|m| m.as_str().chars().next()),
    })
}

/// Array kind named by a `b`/`i`/`l` suffix; int[] when there is none.
pub(crate) fn array_kind_for(suffix: Option<char>) -> TagKind {
    match suffix.map(|c| c.to_ascii_lowercase()) {
        Some('b') => TagKind::ByteArray,
        Some('l') => TagKind::LongArray,
        _ => TagKind::IntArray,
    }
}

/// One integer element: decimal or `#hex`, optionally signed.
pub(crate) fn parse_integral(token: &str) -> Option<i64> {
    let token = token.trim();
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let value = match rest.strip_prefix('#') {
        Some(hex) => u64::from_str_radix(hex, 16).ok()? as i64,
        None => rest.parse::<i64>().ok()?,
    };
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Build an array of `kind` from comma-separated integer elements.
///
/// Empty elements are skipped and wide values are truncated to the element
/// width.
pub(crate) fn build_array(kind: TagKind, body: &str) -> Result<Tag, ParseError> {
    let mut values = Vec::new();
    for token in body.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let value =
            parse_integral(token).ok_or_else(|| ParseError::InvalidNumber(token.to_string()))?;
        values.push(value);
    }
    Ok(match kind {
        TagKind::ByteArray => Tag::ByteArray(values.into_iter().map(|v| v as i8).collect()),
        TagKind::LongArray => Tag::LongArray(values),
        _ => Tag::IntArray(values.into_iter().map(|v| v as i32).collect()),
    })
}

fn invalid(text: &str) -> ParseError {
    ParseError::InvalidNumber(text.to_string())
}

/// Parse a token that is neither a compound nor a list.
///
/// First match wins: suffixed decimal, suffixed integer, bare integer (must
/// fit an int), bare decimal, `true`/`false`, quoted string, raw string.
pub(crate) fn parse_scalar(text: &str) -> Result<Tag, ParseError> {
    if let Some(caps) = suffixed_decimal().captures(text) {
        let number = &text[..text.len() - 1];
        let suffix = caps.get(1).map_or("", |m| m.as_str());
        return if suffix.eq_ignore_ascii_case("d") {
            number.parse::<f64>().map(Tag::Double).map_err(|_| invalid(text))
        } else {
            number.parse::<f32>().map(Tag::Float).map_err(|_| invalid(text))
        };
    }
    if let Some(caps) = suffixed_integer().captures(text) {
        let number = &text[..text.len() - 1];
        let suffix = caps.get(1).map_or(' ', |m| m.as_str().chars().next().unwrap_or(' '));
        return match suffix.to_ascii_lowercase() {
            'b' => number.parse::<i8>().map(Tag::Byte),
            's' => number.parse::<i16>().map(Tag::Short),
            'l' => number.parse::<i64>().map(Tag::Long),
            _ => number.parse::<i32>().map(Tag::Int),
        }
        .map_err(|_| invalid(text));
    }
    if bare_integer().is_match(text) {
        return text.parse::<i32>().map(Tag::Int).map_err(|_| invalid(text));
    }
    if bare_decimal().is_match(text) {
        return text.parse::<f64>().map(Tag::Double).map_err(|_| invalid(text));
    }
    if text.eq_ignore_ascii_case("true") {
        return Ok(Tag::Byte(1));
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(Tag::Byte(0));
    }
    if let Some(s) = unquote(text) {
        return Ok(Tag::String(s));
    }
    Ok(Tag::String(unescape(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_matrix() {
        let cases: &[(&str, Tag)] = &[
            ("1b", Tag::Byte(1)),
            ("-2S", Tag::Short(-2)),
            ("3i", Tag::Int(3)),
            ("4L", Tag::Long(4)),
            ("1.5f", Tag::Float(1.5)),
            (".5d", Tag::Double(0.5)),
            ("7", Tag::Int(7)),
            ("+7", Tag::Int(7)),
            ("2.25", Tag::Double(2.25)),
            ("TRUE", Tag::Byte(1)),
            ("false", Tag::Byte(0)),
            (r#""a \"b\"""#, Tag::from(r#"a "b""#)),
            ("plain text", Tag::from("plain text")),
            (r"back\\slash", Tag::from(r"back\slash")),
            ("1.5.5", Tag::from("1.5.5")),
        ];
        for (text, expected) in cases {
            assert_eq!(&parse_scalar(text).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn out_of_range_numbers_fail() {
        assert_eq!(parse_scalar("128b"), Err(ParseError::InvalidNumber("128b".into())));
        assert!(parse_scalar("3000000000").is_err());
        assert!(parse_scalar("70000s").is_err());
    }

    #[test]
    fn array_shape_matrix() {
        let shape = numeric_array_shape("[1, -2,#ff]b").unwrap();
        assert_eq!(shape.body, "1, -2,#ff");
        assert_eq!(shape.suffix, Some('b'));
        assert!(numeric_array_shape("[]l").is_some());
        assert!(numeric_array_shape("[1i,2i]").is_none());
        assert!(numeric_array_shape("[a,b]").is_none());
        assert!(numeric_array_shape("[1,2]x").is_none());
    }

    #[test]
    fn arrays_truncate_to_element_width() {
        assert_eq!(build_array(TagKind::ByteArray, "1,#ff,300"), Ok(Tag::ByteArray(vec![1, -1, 44])));
        assert_eq!(build_array(TagKind::LongArray, "-#10, 5,"), Ok(Tag::LongArray(vec![-16, 5])));
        assert_eq!(build_array(TagKind::IntArray, ""), Ok(Tag::IntArray(vec![])));
    }
}
