use std::fmt;

use tagpath_tag::Primitive;

/// What an edit action did, for whoever presents results.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// The clipboard now holds the value; `None` when there was nothing.
    Copied(Option<Primitive>),
    Cut(Primitive),
    Swapped,
    /// Neither side held a value.
    SwappedNothing,
    Renamed { name: String, value: Primitive },
    /// No value to rename.
    NotRenamed,
    Moved(Primitive),
    /// The target now holds the value; `None` when it was erased.
    Edited(Option<Primitive>),
}

struct Shown<'a>(&'a Primitive);

impl fmt::Display for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.clone().into_tag() {
            Ok(tag) => write!(f, "{tag}"),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Copied(Some(v)) => write!(f, "copied {}", Shown(v)),
            Report::Copied(None) => write!(f, "copied nothing"),
            Report::Cut(v) => write!(f, "cut {}", Shown(v)),
            Report::Swapped => write!(f, "swapped"),
            Report::SwappedNothing => write!(f, "nothing to swap"),
            Report::Renamed { name, value } => write!(f, "renamed to {name}: {}", Shown(value)),
            Report::NotRenamed => write!(f, "nothing to rename"),
            Report::Moved(v) => write!(f, "moved {}", Shown(v)),
            Report::Edited(Some(v)) => write!(f, "set to {}", Shown(v)),
            Report::Edited(None) => write!(f, "removed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_render_as_literals() {
        assert_eq!(Report::Cut(Primitive::Short(2)).to_string(), "cut 2s");
        assert_eq!(Report::Copied(None).to_string(), "copied nothing");
        let seq = Primitive::Seq(vec![Primitive::Int(1), Primitive::Int(2)]);
        assert_eq!(Report::Edited(Some(seq)).to_string(), "set to [1i,2i]");
    }
}
