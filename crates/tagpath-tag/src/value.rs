//! Borrowed, host-facing view of a stored tag.

use crate::compound::Compound;
use crate::kind::TagKind;
use crate::list::List;
use crate::primitive::Primitive;
use crate::tag::Tag;

/// What [`Compound::get`] and [`List::get`] hand out: scalars unwrapped,
/// arrays as slices, and structures as live borrowed views into the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(&'a str),
    ByteArray(&'a [i8]),
    IntArray(&'a [i32]),
    LongArray(&'a [i64]),
    List(&'a List),
    Compound(&'a Compound),
}

impl<'a> Value<'a> {
    pub fn from_tag(tag: &'a Tag) -> Option<Value<'a>> {
        Some(match tag {
            Tag::End => return None,
            Tag::Byte(v) => Value::Byte(*v),
            Tag::Short(v) => Value::Short(*v),
            Tag::Int(v) => Value::Int(*v),
            Tag::Long(v) => Value::Long(*v),
            Tag::Float(v) => Value::Float(*v),
            Tag::Double(v) => Value::Double(*v),
            Tag::String(v) => Value::String(v),
            Tag::ByteArray(v) => Value::ByteArray(v),
            Tag::IntArray(v) => Value::IntArray(v),
            Tag::LongArray(v) => Value::LongArray(v),
            Tag::List(v) => Value::List(v),
            Tag::Compound(v) => Value::Compound(v),
        })
    }

    pub fn kind(&self) -> TagKind {
        match self {
            Value::Byte(_) => TagKind::Byte,
            Value::Short(_) => TagKind::Short,
            Value::Int(_) => TagKind::Int,
            Value::Long(_) => TagKind::Long,
            Value::Float(_) => TagKind::Float,
            Value::Double(_) => TagKind::Double,
            Value::String(_) => TagKind::String,
            Value::ByteArray(_) => TagKind::ByteArray,
            Value::IntArray(_) => TagKind::IntArray,
            Value::LongArray(_) => TagKind::LongArray,
            Value::List(_) => TagKind::List,
            Value::Compound(_) => TagKind::Compound,
        }
    }

    /// Owned deep copy of the viewed value.
    pub fn to_primitive(&self) -> Primitive {
        match *self {
            Value::Byte(v) => Primitive::Byte(v),
            Value::Short(v) => Primitive::Short(v),
            Value::Int(v) => Primitive::Int(v),
            Value::Long(v) => Primitive::Long(v),
            Value::Float(v) => Primitive::Float(v),
            Value::Double(v) => Primitive::Double(v),
            Value::String(v) => Primitive::String(v.to_string()),
            Value::ByteArray(v) => Primitive::ByteArray(v.to_vec()),
            Value::IntArray(v) => Primitive::IntArray(v.to_vec()),
            Value::LongArray(v) => Primitive::LongArray(v.to_vec()),
            Value::List(v) => Primitive::from(v),
            Value::Compound(v) => Primitive::from(v),
        }
    }

    pub(crate) fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }
}
