//! The thirteen tag kinds and their stable numeric ids.

use std::fmt;

/// Kind of a [`Tag`](crate::Tag).
///
/// The numeric ids match the wire ids of the classic tag format and are
/// used as the element-kind marker of a [`List`](crate::List).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagKind {
    #[default]
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagKind {
    pub const ALL: [TagKind; 13] = [
        TagKind::End,
        TagKind::Byte,
        TagKind::Short,
        TagKind::Int,
        TagKind::Long,
        TagKind::Float,
        TagKind::Double,
        TagKind::ByteArray,
        TagKind::String,
        TagKind::List,
        TagKind::Compound,
        TagKind::IntArray,
        TagKind::LongArray,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<TagKind> {
        TagKind::ALL.get(id as usize).copied()
    }

    /// Lowercase user-facing name, e.g. `"int[]"`.
    pub fn name(self) -> &'static str {
        match self {
            TagKind::End => "end",
            TagKind::Byte => "byte",
            TagKind::Short => "short",
            TagKind::Int => "int",
            TagKind::Long => "long",
            TagKind::Float => "float",
            TagKind::Double => "double",
            TagKind::ByteArray => "byte[]",
            TagKind::String => "string",
            TagKind::List => "list",
            TagKind::Compound => "compound",
            TagKind::IntArray => "int[]",
            TagKind::LongArray => "long[]",
        }
    }

    /// Resolve a kind from a user-supplied name.
    ///
    /// An exact (case-insensitive) match wins; otherwise the first kind whose
    /// name starts with the input is taken. Empty or unknown names resolve to
    /// [`TagKind::End`].
    ///
    /// ```
    /// use tagpath_tag::TagKind;
    ///
    /// assert_eq!(TagKind::from_name("INT"), TagKind::Int);
    /// assert_eq!(TagKind::from_name("int[]"), TagKind::IntArray);
    /// assert_eq!(TagKind::from_name("sh"), TagKind::Short);
    /// assert_eq!(TagKind::from_name("nope"), TagKind::End);
    /// ```
    pub fn from_name(name: &str) -> TagKind {
        if name.is_empty() {
            return TagKind::End;
        }
        let lower = name.to_lowercase();
        if let Some(kind) = TagKind::ALL.iter().find(|k| k.name() == lower) {
            return *kind;
        }
        TagKind::ALL
            .iter()
            .find(|k| k.name().starts_with(&lower))
            .copied()
            .unwrap_or(TagKind::End)
    }

    /// Element kind of an array kind.
    pub fn base_kind(self) -> Option<TagKind> {
        match self {
            TagKind::ByteArray => Some(TagKind::Byte),
            TagKind::IntArray => Some(TagKind::Int),
            TagKind::LongArray => Some(TagKind::Long),
            _ => None,
        }
    }

    /// Array kind holding elements of this scalar kind.
    pub fn array_kind(self) -> Option<TagKind> {
        match self {
            TagKind::Byte => Some(TagKind::ByteArray),
            TagKind::Int => Some(TagKind::IntArray),
            TagKind::Long => Some(TagKind::LongArray),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TagKind::Byte
                | TagKind::Short
                | TagKind::Int
                | TagKind::Long
                | TagKind::Float
                | TagKind::Double
        )
    }

    pub fn is_array(self) -> bool {
        self.base_kind().is_some()
    }

    pub fn is_structured(self) -> bool {
        matches!(self, TagKind::List | TagKind::Compound)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(TagKind::from_id(13), None);
    }

    #[test]
    fn exact_name_beats_prefix() {
        // "long" is a prefix of "long[]" but must resolve to the scalar.
        assert_eq!(TagKind::from_name("long"), TagKind::Long);
        assert_eq!(TagKind::from_name("Long[]"), TagKind::LongArray);
        assert_eq!(TagKind::from_name("com"), TagKind::Compound);
        assert_eq!(TagKind::from_name(""), TagKind::End);
    }

    #[test]
    fn array_kinds_pair_up() {
        assert_eq!(TagKind::Byte.array_kind(), Some(TagKind::ByteArray));
        assert_eq!(TagKind::IntArray.base_kind(), Some(TagKind::Int));
        assert_eq!(TagKind::Short.array_kind(), None);
        assert!(TagKind::LongArray.is_array());
        assert!(!TagKind::String.is_array());
    }
}
