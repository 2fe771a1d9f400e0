use tagpath_tag::{Tag, TagKind};

use crate::error::ParseError;
use crate::scalar::{build_array, parse_integral};

/// Parse a bare token as a value of the given kind.
///
/// Integer kinds take the token as an integer (decimal or `#hex`) or, failing
/// that, as a decimal truncated toward zero; wide values wrap to the target
/// width. Float kinds also accept `NaN` and `Infinity`. Array kinds take
/// `[n,#hex,...]`. Strings take the token verbatim.
///
/// ```
/// use tagpath_literal::parse_as;
/// use tagpath_tag::{Tag, TagKind};
///
/// assert_eq!(parse_as(TagKind::Byte, "12.7").unwrap(), Tag::Byte(12));
/// assert_eq!(parse_as(TagKind::Int, "#ff").unwrap(), Tag::Int(255));
/// assert_eq!(parse_as(TagKind::LongArray, "[1,#10]").unwrap(), Tag::LongArray(vec![1, 16]));
/// assert!(parse_as(TagKind::Compound, "{}").is_err());
/// ```
pub fn parse_as(kind: TagKind, text: &str) -> Result<Tag, ParseError> {
    let token = text.trim();
    let fail = || ParseError::NotParsable {
        text: text.to_string(),
        kind,
    };
    match kind {
        TagKind::Byte | TagKind::Short | TagKind::Int | TagKind::Long => {
            let value = integral_or_truncated(token).ok_or_else(fail)?;
            Ok(match kind {
                TagKind::Byte => Tag::Byte(value as i8),
                TagKind::Short => Tag::Short(value as i16),
                TagKind::Int => Tag::Int(value as i32),
                _ => Tag::Long(value),
            })
        }
        TagKind::Float => token.parse::<f32>().map(Tag::Float).map_err(|_| fail()),
        TagKind::Double => token.parse::<f64>().map(Tag::Double).map_err(|_| fail()),
        TagKind::ByteArray | TagKind::IntArray | TagKind::LongArray => {
            let body = token
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or_else(fail)?;
            build_array(kind, body).map_err(|_| fail())
        }
        TagKind::String => Ok(Tag::String(text.to_string())),
        TagKind::End | TagKind::List | TagKind::Compound => Err(fail()),
    }
}

fn integral_or_truncated(token: &str) -> Option<i64> {
    parse_integral(token).or_else(|| token.parse::<f64>().ok().map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_fall_back_to_truncated_decimals() {
        assert_eq!(parse_as(TagKind::Short, "-3.9"), Ok(Tag::Short(-3)));
        assert_eq!(parse_as(TagKind::Byte, "300"), Ok(Tag::Byte(44)));
        assert_eq!(parse_as(TagKind::Long, "9223372036854775807"), Ok(Tag::Long(i64::MAX)));
        assert!(parse_as(TagKind::Int, "abc").is_err());
    }

    #[test]
    fn floats_accept_special_values() {
        assert!(matches!(parse_as(TagKind::Float, "NaN"), Ok(Tag::Float(v)) if v.is_nan()));
        assert_eq!(parse_as(TagKind::Double, "-Infinity"), Ok(Tag::Double(f64::NEG_INFINITY)));
        assert_eq!(parse_as(TagKind::Float, "2"), Ok(Tag::Float(2.0)));
    }

    #[test]
    fn arrays_need_brackets() {
        assert_eq!(parse_as(TagKind::ByteArray, "[1, 2]"), Ok(Tag::ByteArray(vec![1, 2])));
        assert_eq!(
            parse_as(TagKind::IntArray, "1,2"),
            Err(ParseError::NotParsable {
                text: "1,2".into(),
                kind: TagKind::IntArray
            })
        );
    }

    #[test]
    fn strings_are_verbatim() {
        assert_eq!(parse_as(TagKind::String, " a b "), Ok(Tag::from(" a b ")));
    }
}
