//! Conversion between tag trees and a host's value representation.

use serde_json::{Map, Number, Value as Json};

use crate::compound::Compound;
use crate::error::TagError;
use crate::kind::TagKind;
use crate::list::List;
use crate::primitive::Primitive;
use crate::tag::Tag;

/// Host-side view of tag values.
///
/// Containers use a bridge to expose their "custom" tag: the value a host
/// application actually works with, as opposed to the raw tree.
pub trait PrimitiveBridge {
    type Value;

    fn primitive_to_tag(&self, value: Self::Value) -> Result<Tag, TagError>;

    /// `None` for `End`.
    fn tag_to_primitive(&self, tag: &Tag) -> Option<Self::Value>;

    fn tag_kind(&self, value: &Self::Value) -> TagKind;

    fn clone_tree(&self, value: &Self::Value) -> Self::Value;

    fn new_empty_compound(&self) -> Self::Value;
}

/// Bridge for the crate's own [`Primitive`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HostBridge;

impl PrimitiveBridge for HostBridge {
    type Value = Primitive;

    fn primitive_to_tag(&self, value: Primitive) -> Result<Tag, TagError> {
        value.into_tag()
    }

    fn tag_to_primitive(&self, tag: &Tag) -> Option<Primitive> {
        Primitive::from_tag(tag)
    }

    fn tag_kind(&self, value: &Primitive) -> TagKind {
        match value {
            Primitive::Bool(_) | Primitive::Byte(_) => TagKind::Byte,
            Primitive::Short(_) => TagKind::Short,
            Primitive::Int(_) => TagKind::Int,
            Primitive::Long(_) => TagKind::Long,
            Primitive::Float(_) => TagKind::Float,
            Primitive::Double(_) => TagKind::Double,
            Primitive::String(_) => TagKind::String,
            Primitive::ByteArray(_) => TagKind::ByteArray,
            Primitive::IntArray(_) => TagKind::IntArray,
            Primitive::LongArray(_) => TagKind::LongArray,
            Primitive::Seq(_) => TagKind::List,
            Primitive::Map(_) => TagKind::Compound,
        }
    }

    fn clone_tree(&self, value: &Primitive) -> Primitive {
        value.clone()
    }

    fn new_empty_compound(&self) -> Primitive {
        Primitive::Map(Default::default())
    }
}

/// Bridge for `serde_json` documents.
///
/// `null` maps to `End`, so a null object member is dropped and a null array
/// element is skipped. Booleans become bytes. Integers become `Int` when they
/// fit, `Long` otherwise, and every other number becomes `Double`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBridge;

impl JsonBridge {
    fn number_to_tag(n: &Number) -> Tag {
        if let Some(i) = n.as_i64() {
            match i32::try_from(i) {
                Ok(small) => Tag::Int(small),
                Err(_) => Tag::Long(i),
            }
        } else {
            Tag::Double(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    fn float(v: f64) -> Json {
        Number::from_f64(v).map(Json::Number).unwrap_or(Json::Null)
    }
}

impl PrimitiveBridge for JsonBridge {
    type Value = Json;

    fn primitive_to_tag(&self, value: Json) -> Result<Tag, TagError> {
        Ok(match value {
            Json::Null => Tag::End,
            Json::Bool(b) => Tag::Byte(b as i8),
            Json::Number(n) => Self::number_to_tag(&n),
            Json::String(s) => Tag::String(s),
            Json::Array(items) => {
                let mut list = List::new();
                for item in items {
                    let tag = self.primitive_to_tag(item)?;
                    if !tag.is_end() {
                        list.push(tag)?;
                    }
                }
                Tag::List(list)
            }
            Json::Object(entries) => {
                let mut compound = Compound::new();
                for (key, value) in entries {
                    compound.insert(key, self.primitive_to_tag(value)?)?;
                }
                Tag::Compound(compound)
            }
        })
    }

    fn tag_to_primitive(&self, tag: &Tag) -> Option<Json> {
        Some(match tag {
            Tag::End => return None,
            Tag::Byte(v) => Json::from(*v),
            Tag::Short(v) => Json::from(*v),
            Tag::Int(v) => Json::from(*v),
            Tag::Long(v) => Json::from(*v),
            Tag::Float(v) => Self::float(*v as f64),
            Tag::Double(v) => Self::float(*v),
            Tag::String(s) => Json::String(s.clone()),
            Tag::ByteArray(a) => Json::from(a.clone()),
            Tag::IntArray(a) => Json::from(a.clone()),
            Tag::LongArray(a) => Json::from(a.clone()),
            Tag::List(l) => Json::Array(l.iter().filter_map(|t| self.tag_to_primitive(t)).collect()),
            Tag::Compound(c) => {
                let mut map = Map::new();
                for (key, value) in c.iter() {
                    if let Some(v) = self.tag_to_primitive(value) {
                        map.insert(key.to_string(), v);
                    }
                }
                Json::Object(map)
            }
        })
    }

    fn tag_kind(&self, value: &Json) -> TagKind {
        match value {
            Json::Null => TagKind::End,
            Json::Bool(_) => TagKind::Byte,
            Json::Number(n) => Self::number_to_tag(n).kind(),
            Json::String(_) => TagKind::String,
            Json::Array(_) => TagKind::List,
            Json::Object(_) => TagKind::Compound,
        }
    }

    fn clone_tree(&self, value: &Json) -> Json {
        value.clone()
    }

    fn new_empty_compound(&self) -> Json {
        Json::Object(Map::new())
    }
}
