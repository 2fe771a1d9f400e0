//! Owned host values and their conversion to and from tags.
//!
//! A [`Primitive`] is what a host hands to the tree (and gets back from it).
//! Converting one into a [`Tag`] always builds fresh nodes, so a tree never
//! shares structure with the host value it was filled from.

use indexmap::IndexMap;

use crate::compound::Compound;
use crate::error::TagError;
use crate::list::List;
use crate::tag::Tag;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Stored as a byte `0`/`1`.
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    /// Converted into a [`List`]; elements must agree on their kind.
    Seq(Vec<Primitive>),
    /// Converted into a [`Compound`]; keys must be non-empty.
    Map(IndexMap<String, Primitive>),
}

impl Primitive {
    /// Build the equivalent tag tree.
    ///
    /// # Errors
    ///
    /// Fails on an empty map key or on a sequence whose elements have
    /// different kinds.
    pub fn into_tag(self) -> Result<Tag, TagError> {
        Ok(match self {
            Primitive::Bool(v) => Tag::Byte(v as i8),
            Primitive::Byte(v) => Tag::Byte(v),
            Primitive::Short(v) => Tag::Short(v),
            Primitive::Int(v) => Tag::Int(v),
            Primitive::Long(v) => Tag::Long(v),
            Primitive::Float(v) => Tag::Float(v),
            Primitive::Double(v) => Tag::Double(v),
            Primitive::String(v) => Tag::String(v),
            Primitive::ByteArray(v) => Tag::ByteArray(v),
            Primitive::IntArray(v) => Tag::IntArray(v),
            Primitive::LongArray(v) => Tag::LongArray(v),
            Primitive::Seq(items) => {
                let mut list = List::new();
                for item in items {
                    list.push(item.into_tag()?)?;
                }
                Tag::List(list)
            }
            Primitive::Map(entries) => {
                let mut compound = Compound::new();
                for (key, value) in entries {
                    compound.insert(key, value.into_tag()?)?;
                }
                Tag::Compound(compound)
            }
        })
    }

    /// Deep host copy of a tag. `None` for `End`.
    pub fn from_tag(tag: &Tag) -> Option<Primitive> {
        tag.value().map(|v| v.to_primitive())
    }
}

impl From<bool> for Primitive {
    fn from(v: bool) -> Self {
        Primitive::Bool(v)
    }
}

impl From<i8> for Primitive {
    fn from(v: i8) -> Self {
        Primitive::Byte(v)
    }
}

impl From<i16> for Primitive {
    fn from(v: i16) -> Self {
        Primitive::Short(v)
    }
}

impl From<i32> for Primitive {
    fn from(v: i32) -> Self {
        Primitive::Int(v)
    }
}

impl From<i64> for Primitive {
    fn from(v: i64) -> Self {
        Primitive::Long(v)
    }
}

impl From<f32> for Primitive {
    fn from(v: f32) -> Self {
        Primitive::Float(v)
    }
}

impl From<f64> for Primitive {
    fn from(v: f64) -> Self {
        Primitive::Double(v)
    }
}

impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Primitive::String(v.to_string())
    }
}

impl From<String> for Primitive {
    fn from(v: String) -> Self {
        Primitive::String(v)
    }
}

impl From<Vec<i8>> for Primitive {
    fn from(v: Vec<i8>) -> Self {
        Primitive::ByteArray(v)
    }
}

impl From<Vec<i32>> for Primitive {
    fn from(v: Vec<i32>) -> Self {
        Primitive::IntArray(v)
    }
}

impl From<Vec<i64>> for Primitive {
    fn from(v: Vec<i64>) -> Self {
        Primitive::LongArray(v)
    }
}

impl From<Vec<Primitive>> for Primitive {
    fn from(v: Vec<Primitive>) -> Self {
        Primitive::Seq(v)
    }
}

impl From<IndexMap<String, Primitive>> for Primitive {
    fn from(v: IndexMap<String, Primitive>) -> Self {
        Primitive::Map(v)
    }
}

impl From<&List> for Primitive {
    fn from(list: &List) -> Self {
        Primitive::Seq(
            list.iter()
                .filter_map(Primitive::from_tag)
                .collect(),
        )
    }
}

impl From<&Compound> for Primitive {
    fn from(compound: &Compound) -> Self {
        Primitive::Map(
            compound
                .iter()
                .filter_map(|(k, v)| Primitive::from_tag(v).map(|p| (k.to_string(), p)))
                .collect(),
        )
    }
}
