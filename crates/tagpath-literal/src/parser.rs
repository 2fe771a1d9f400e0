use tagpath_tag::{Compound, List, Tag};

use crate::error::ParseError;
use crate::escape::unquote;
use crate::scalar::{array_kind_for, build_array, numeric_array_shape, parse_scalar};
use crate::scan::{check_balanced, find_top_level, matching_close, split_top_level};

/// Options for [`parse_with`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Deepest allowed nesting of compounds and lists.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Parse literal text into a tag tree with default options.
///
/// ```
/// use tagpath_literal::parse;
/// use tagpath_tag::{Tag, TagKind};
///
/// let tag = parse("{a:1,b:[1,2,3]}").unwrap();
/// let root = tag.as_compound().unwrap();
/// assert_eq!(root.get_tag("a"), Some(&Tag::Int(1)));
/// assert_eq!(root.get_list("b").unwrap().elem_kind(), TagKind::Int);
///
/// assert_eq!(parse("[1,2,3]b").unwrap(), Tag::ByteArray(vec![1, 2, 3]));
/// assert_eq!(parse("[1,2,3]").unwrap(), Tag::IntArray(vec![1, 2, 3]));
/// ```
pub fn parse(text: &str) -> Result<Tag, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parse literal text into a tag tree.
///
/// A literal that is entirely a bracketed list of integers is an array
/// (int[] unless a `b`/`i`/`l` suffix says otherwise). Nested brackets are
/// arrays only with a suffix and lists otherwise.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Tag, ParseError> {
    let text = text.trim();
    check_balanced(text)?;
    if let Some(shape) = numeric_array_shape(text) {
        if shape.suffix.is_some() || !shape.body.trim().is_empty() {
            return build_array(array_kind_for(shape.suffix), shape.body);
        }
    }
    Parser { options }.value(text, 0)
}

struct Parser<'o> {
    options: &'o ParseOptions,
}

impl Parser<'_> {
    fn value(&self, text: &str, depth: usize) -> Result<Tag, ParseError> {
        let text = text.trim();
        if text.starts_with('{') {
            self.compound(text, depth + 1)
        } else if text.starts_with('[') {
            match numeric_array_shape(text) {
                Some(shape) if shape.suffix.is_some() => {
                    build_array(array_kind_for(shape.suffix), shape.body)
                }
                _ => self.list(text, depth + 1),
            }
        } else {
            parse_scalar(text)
        }
    }

    /// Inner text of the group opening `text`, which must close at its end.
    fn group_body<'t>(&self, text: &'t str, depth: usize) -> Result<&'t str, ParseError> {
        if depth > self.options.max_depth {
            return Err(ParseError::TooDeep(self.options.max_depth));
        }
        let close = matching_close(text)?;
        if let Some(token) = text[close + 1..].chars().next() {
            return Err(ParseError::UnexpectedToken {
                token,
                at: text[close + 1..].to_string(),
            });
        }
        Ok(&text[1..close])
    }

    fn compound(&self, text: &str, depth: usize) -> Result<Tag, ParseError> {
        let body = self.group_body(text, depth)?;
        let mut compound = Compound::new();
        for element in split_top_level(body, ',')? {
            let element = element.trim();
            if element.is_empty() {
                continue;
            }
            let colon = find_top_level(element, ':')?
                .ok_or_else(|| ParseError::MissingSeparator(element.to_string()))?;
            let raw_name = element[..colon].trim();
            let name = unquote(raw_name).unwrap_or_else(|| raw_name.to_string());
            if name.is_empty() {
                return Err(ParseError::EmptyName(element.to_string()));
            }
            let value = self.value(&element[colon + 1..], depth)?;
            compound.insert(name, value)?;
        }
        Ok(Tag::Compound(compound))
    }

    fn list(&self, text: &str, depth: usize) -> Result<Tag, ParseError> {
        let body = self.group_body(text, depth)?;
        let mut list = List::new();
        for element in split_top_level(body, ',')? {
            if element.trim().is_empty() {
                continue;
            }
            list.push(self.value(element, depth)?)?;
        }
        Ok(Tag::List(list))
    }
}
