use std::fmt;

use tagpath_tag::{format::write_quoted, TagKind};

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Child of a compound.
    Key(String),
    /// Element of a list; negative values count from the end.
    Index(isize),
}

impl Selector {
    pub fn key(key: impl Into<String>) -> Self {
        Selector::Key(key.into())
    }

    /// Kind of node this selector steps into.
    pub fn container_kind(&self) -> TagKind {
        match self {
            Selector::Key(_) => TagKind::Compound,
            Selector::Index(_) => TagKind::List,
        }
    }
}

fn needs_quotes(key: &str) -> bool {
    key.is_empty()
        || key
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '"') || c.is_whitespace())
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(key) if needs_quotes(key) => {
                f.write_str(".")?;
                write_quoted(f, key)
            }
            Selector::Key(key) => write!(f, ".{key}"),
            Selector::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Selector {
    fn from(key: &str) -> Self {
        Selector::Key(key.to_string())
    }
}

impl From<String> for Selector {
    fn from(key: String) -> Self {
        Selector::Key(key)
    }
}

impl From<isize> for Selector {
    fn from(index: isize) -> Self {
        Selector::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_awkward_keys() {
        assert_eq!(Selector::key("a").to_string(), ".a");
        assert_eq!(Selector::key("a.b").to_string(), r#"."a.b""#);
        assert_eq!(Selector::key(r#"x"y"#).to_string(), r#"."x\"y""#);
        assert_eq!(Selector::Index(-1).to_string(), "[-1]");
    }
}
