use indexmap::IndexMap;

use crate::error::TagError;
use crate::kind::TagKind;
use crate::list::List;
use crate::primitive::Primitive;
use crate::tag::Tag;
use crate::value::Value;

/// Key/value node of a tag tree.
///
/// Keys are non-empty and never map to [`Tag::End`]. Entry order follows
/// insertion but carries no meaning (equality ignores it).
///
/// Every insertion of host or borrowed data deep-copies it into fresh nodes:
///
/// ```
/// use tagpath_tag::{Compound, Value};
///
/// let mut inner = Compound::new();
/// inner.put("foo", "bar").unwrap();
///
/// let mut cmp = Compound::new();
/// cmp.put("inner", &inner).unwrap();
/// inner.put("foo", "baz").unwrap();
///
/// let copy = cmp.get_compound("inner").unwrap();
/// assert_eq!(copy.get("foo"), Some(Value::String("bar")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compound {
    entries: IndexMap<String, Tag>,
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k) == Some(v))
    }
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True iff `key` holds a raw tag of exactly `kind`.
    pub fn contains_key_kind(&self, key: &str, kind: TagKind) -> bool {
        self.entries.get(key).is_some_and(|t| t.kind() == kind)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<Value<'_>> {
        self.entries.get(key).and_then(Value::from_tag)
    }

    pub fn get_tag(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn get_tag_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries.get_mut(key)
    }

    /// Store an owned tag as is. `End` removes the key.
    ///
    /// Returns the raw tag previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, tag: Tag) -> Result<Option<Tag>, TagError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TagError::EmptyKey);
        }
        if tag.is_end() {
            return Ok(self.entries.shift_remove(&key));
        }
        Ok(self.entries.insert(key, tag))
    }

    /// Store a deep copy of a host value. Booleans become bytes `0`/`1`.
    ///
    /// Returns the previous value, converted for the host.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Primitive>,
    ) -> Result<Option<Primitive>, TagError> {
        let tag = value.into().into_tag()?;
        let old = self.insert(key, tag)?;
        Ok(old.as_ref().and_then(Primitive::from_tag))
    }

    /// Store a copy of a raw tag. `End` removes the key.
    pub fn put_tag(&mut self, key: impl Into<String>, tag: &Tag) -> Result<Option<Primitive>, TagError> {
        let old = self.insert(key, tag.clone())?;
        Ok(old.as_ref().and_then(Primitive::from_tag))
    }

    /// Attach an owned compound or list without copying it.
    ///
    /// Unlike [`Compound::put`], no deep copy is made: the given structure is
    /// moved into place. Only compounds and lists are accepted.
    pub fn bind(&mut self, key: impl Into<String>, tag: Tag) -> Result<Option<Primitive>, TagError> {
        if !tag.kind().is_structured() {
            return Err(TagError::NotStructured(tag.kind()));
        }
        let old = self.insert(key, tag)?;
        Ok(old.as_ref().and_then(Primitive::from_tag))
    }

    pub fn remove(&mut self, key: &str) -> Option<Primitive> {
        self.take(key).as_ref().and_then(Primitive::from_tag)
    }

    /// Remove and return the raw tag under `key`.
    pub fn take(&mut self, key: &str) -> Option<Tag> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merge `other` into this compound.
    ///
    /// Missing keys are copied in, nested compounds are merged recursively,
    /// and everything else (lists included) is overwritten wholesale.
    pub fn merge(&mut self, other: &Compound) {
        for (key, value) in &other.entries {
            match (self.entries.get_mut(key), value) {
                (Some(Tag::Compound(mine)), Tag::Compound(theirs)) => mine.merge(theirs),
                _ => {
                    self.entries.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Compound under `key`, created (or replacing a non-compound) if needed.
    pub fn compound(&mut self, key: &str) -> Result<&mut Compound, TagError> {
        if key.is_empty() {
            return Err(TagError::EmptyKey);
        }
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Tag::Compound(Compound::new()));
        if !matches!(slot, Tag::Compound(_)) {
            *slot = Tag::Compound(Compound::new());
        }
        match slot {
            Tag::Compound(c) => Ok(c),
            other => Err(TagError::NotStructured(other.kind())),
        }
    }

    /// List under `key`, created (or replacing a non-list) if needed.
    pub fn list(&mut self, key: &str) -> Result<&mut List, TagError> {
        if key.is_empty() {
            return Err(TagError::EmptyKey);
        }
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Tag::List(List::new()));
        if !matches!(slot, Tag::List(_)) {
            *slot = Tag::List(List::new());
        }
        match slot {
            Tag::List(l) => Ok(l),
            other => Err(TagError::NotStructured(other.kind())),
        }
    }

    // ── Coercing getters ──────────────────────────────────────────────────

    /// Best-effort truth value of `key`; `false` when missing.
    ///
    /// A list answers `true` when it is EMPTY while a compound answers `true`
    /// when it is non-empty. The asymmetry is long-standing observed
    /// behaviour and is kept as is.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Float(v)) => v != 0.0,
            Some(Value::Double(v)) => v != 0.0,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::IntArray(a)) => !a.is_empty(),
            Some(Value::ByteArray(a)) => !a.is_empty(),
            Some(Value::List(l)) => l.is_empty(),
            Some(Value::Compound(c)) => !c.is_empty(),
            Some(v) => v.as_i64().is_some_and(|n| n != 0),
            None => false,
        }
    }

    fn coerce_number(&self, key: &str) -> Number {
        match self.get(key) {
            Some(Value::Float(v)) => Number::Decimal(v as f64),
            Some(Value::Double(v)) => Number::Decimal(v),
            Some(Value::String(s)) => parse_number(s),
            Some(v) => Number::Integral(v.as_i64().unwrap_or(0)),
            None => Number::Integral(0),
        }
    }

    fn coerce_f64(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            Some(v) => v.as_f64().unwrap_or(0.0),
            None => 0.0,
        }
    }

    pub fn get_byte(&self, key: &str) -> i8 {
        match self.coerce_number(key) {
            Number::Integral(n) => n as i8,
            Number::Decimal(d) => d as i8,
        }
    }

    pub fn get_short(&self, key: &str) -> i16 {
        match self.coerce_number(key) {
            Number::Integral(n) => n as i16,
            Number::Decimal(d) => d as i16,
        }
    }

    pub fn get_int(&self, key: &str) -> i32 {
        match self.coerce_number(key) {
            Number::Integral(n) => n as i32,
            Number::Decimal(d) => d as i32,
        }
    }

    pub fn get_long(&self, key: &str) -> i64 {
        match self.coerce_number(key) {
            Number::Integral(n) => n,
            Number::Decimal(d) => d as i64,
        }
    }

    pub fn get_float(&self, key: &str) -> f32 {
        self.coerce_f64(key) as f32
    }

    pub fn get_double(&self, key: &str) -> f64 {
        self.coerce_f64(key)
    }

    /// Text of `key`: strings as is, numbers without a type suffix, anything
    /// else in literal notation. Empty when missing.
    pub fn get_string(&self, key: &str) -> String {
        match self.get(key) {
            None => String::new(),
            Some(Value::String(s)) => s.to_string(),
            Some(Value::Byte(v)) => v.to_string(),
            Some(Value::Short(v)) => v.to_string(),
            Some(Value::Int(v)) => v.to_string(),
            Some(Value::Long(v)) => v.to_string(),
            Some(Value::Float(v)) => decimal_text(v.to_string(), v.is_finite()),
            Some(Value::Double(v)) => decimal_text(v.to_string(), v.is_finite()),
            Some(_) => self.entries.get(key).map(Tag::to_string).unwrap_or_default(),
        }
    }

    pub fn get_int_array(&self, key: &str) -> Vec<i32> {
        match self.get(key) {
            Some(Value::IntArray(a)) => a.to_vec(),
            Some(Value::ByteArray(a)) => a.iter().map(|&b| b as i32).collect(),
            _ => Vec::new(),
        }
    }

    pub fn get_byte_array(&self, key: &str) -> Vec<i8> {
        match self.get(key) {
            Some(Value::ByteArray(a)) => a.to_vec(),
            Some(Value::IntArray(a)) => a.iter().map(|&i| i as i8).collect(),
            _ => Vec::new(),
        }
    }

    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        self.entries.get(key).and_then(Tag::as_compound)
    }

    pub fn get_list(&self, key: &str) -> Option<&List> {
        self.entries.get(key).and_then(Tag::as_list)
    }
}

/// Integer first, then decimal truncated toward zero, else `0`.
/// A number read for narrowing. Integers wrap when narrowed, decimals
/// saturate at the bounds of the target type.
enum Number {
    Integral(i64),
    Decimal(f64),
}

fn parse_number(s: &str) -> Number {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Number::Integral(n);
    }
    s.parse::<f64>().map_or(Number::Integral(0), Number::Decimal)
}

/// Decimal text that always shows a fraction, `1.0` rather than `1`.
fn decimal_text(text: String, finite: bool) -> String {
    match text.as_str() {
        "inf" => "Infinity".to_string(),
        "-inf" => "-Infinity".to_string(),
        _ if finite && !text.contains(['.', 'e']) => format!("{text}.0"),
        _ => text,
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
