//! Canonical literal rendering of tag trees.
//!
//! The output is read back unchanged by the literal parser for every tree
//! without non-finite floats.

use std::fmt::{self, Display, Formatter, Write};

use crate::compound::Compound;
use crate::list::List;
use crate::tag::Tag;

/// Write `s` double-quoted with `\` and `"` escaped.
pub fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(ch)?;
    }
    out.write_char('"')
}

/// Quoted form of `s`.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    // writing into a String cannot fail
    let _ = write_quoted(&mut out, s);
    out
}

/// Whether a compound key can be written without quotes.
pub fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '-'))
}

fn write_seq<T: Display>(f: &mut Formatter<'_>, items: &[T], suffix: char) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]{suffix}")
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => write!(f, "{v}b"),
            Tag::Short(v) => write!(f, "{v}s"),
            Tag::Int(v) => write!(f, "{v}"),
            Tag::Long(v) => write!(f, "{v}l"),
            Tag::Float(v) => write!(f, "{v}f"),
            Tag::Double(v) => write!(f, "{v}d"),
            Tag::String(s) => write_quoted(f, s),
            Tag::ByteArray(a) => write_seq(f, a, 'b'),
            Tag::IntArray(a) => write_seq(f, a, 'i'),
            Tag::LongArray(a) => write_seq(f, a, 'l'),
            Tag::List(l) => l.fmt(f),
            Tag::Compound(c) => c.fmt(f),
        }
    }
}

impl Display for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            // suffix ints so a list of ints never reads back as int[]
            match item {
                Tag::Int(v) => write!(f, "{v}i")?,
                other => write!(f, "{other}")?,
            }
        }
        f.write_char(']')
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            if is_plain_key(key) {
                f.write_str(key)?;
            } else {
                write_quoted(f, key)?;
            }
            write!(f, ":{value}")?;
        }
        f.write_char('}')
    }
}
