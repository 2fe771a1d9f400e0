use crate::error::TagError;
use crate::kind::TagKind;
use crate::primitive::Primitive;
use crate::tag::Tag;
use crate::value::Value;

/// Ordered, type-homogeneous sequence of tags.
///
/// An empty list has element kind [`TagKind::End`]; the first insertion
/// fixes it and every later insertion must match. Emptying the list unsets
/// it again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    elem_kind: TagKind,
    items: Vec<Tag>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elem_kind(&self) -> TagKind {
        self.elem_kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    /// Whether an element of `kind` may be inserted.
    pub fn accepts(&self, kind: TagKind) -> bool {
        kind != TagKind::End && (self.elem_kind == TagKind::End || self.elem_kind == kind)
    }

    /// Whether an existing element may be replaced by one of `kind`.
    pub fn accepts_replacement(&self, kind: TagKind) -> bool {
        kind != TagKind::End && (self.items.len() == 1 || self.accepts(kind))
    }

    /// Map a possibly negative index onto a position of an existing element.
    pub fn resolve_index(&self, index: isize) -> Option<usize> {
        let len = self.items.len() as isize;
        let idx = if index < 0 { len + index } else { index };
        if idx < 0 || idx >= len {
            None
        } else {
            Some(idx as usize)
        }
    }

    pub fn get(&self, index: isize) -> Option<Value<'_>> {
        self.get_tag(index).and_then(Value::from_tag)
    }

    pub fn get_tag(&self, index: isize) -> Option<&Tag> {
        self.resolve_index(index).map(|i| &self.items[i])
    }

    pub fn get_tag_mut(&mut self, index: isize) -> Option<&mut Tag> {
        self.resolve_index(index).map(move |i| &mut self.items[i])
    }

    fn check(&mut self, kind: TagKind) -> Result<(), TagError> {
        if kind == TagKind::End {
            return Err(TagError::AbsentValue);
        }
        if !self.accepts(kind) {
            return Err(TagError::ListKind {
                expected: self.elem_kind,
                found: kind,
            });
        }
        self.elem_kind = kind;
        Ok(())
    }

    /// Append an owned tag without copying it.
    pub fn push(&mut self, tag: Tag) -> Result<(), TagError> {
        self.check(tag.kind())?;
        self.items.push(tag);
        Ok(())
    }

    /// Append a host value (deep-copied into fresh nodes).
    pub fn add(&mut self, value: impl Into<Primitive>) -> Result<(), TagError> {
        self.push(value.into().into_tag()?)
    }

    /// Insert before position `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, tag: Tag) -> Result<(), TagError> {
        if index > self.items.len() {
            return Err(TagError::IndexOutOfRange {
                index: index as isize,
                len: self.items.len(),
            });
        }
        self.check(tag.kind())?;
        self.items.insert(index, tag);
        Ok(())
    }

    /// Replace an existing element and return the old one.
    pub fn set(&mut self, index: isize, tag: Tag) -> Result<Tag, TagError> {
        let len = self.items.len();
        let i = self
            .resolve_index(index)
            .ok_or(TagError::IndexOutOfRange { index, len })?;
        if tag.kind() == TagKind::End {
            return Err(TagError::AbsentValue);
        }
        // a lone element may be swapped for one of another kind
        if len == 1 {
            self.elem_kind = tag.kind();
        } else {
            self.check(tag.kind())?;
        }
        Ok(std::mem::replace(&mut self.items[i], tag))
    }

    /// Remove an element, shifting later ones down by one.
    pub fn remove(&mut self, index: isize) -> Option<Tag> {
        let removed = self.resolve_index(index).map(|i| self.items.remove(i));
        if self.items.is_empty() {
            self.elem_kind = TagKind::End;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.elem_kind = TagKind::End;
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_fixes_kind() {
        let mut list = List::new();
        assert_eq!(list.elem_kind(), TagKind::End);
        list.push(Tag::Int(1)).unwrap();
        assert_eq!(list.elem_kind(), TagKind::Int);
        assert_eq!(
            list.push(Tag::Byte(1)),
            Err(TagError::ListKind {
                expected: TagKind::Int,
                found: TagKind::Byte
            })
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn end_is_never_an_element() {
        let mut list = List::new();
        assert_eq!(list.push(Tag::End), Err(TagError::AbsentValue));
    }

    #[test]
    fn negative_indices_count_from_end() {
        let mut list = List::new();
        for v in [10, 20, 30] {
            list.add(v).unwrap();
        }
        assert_eq!(list.get(-1), Some(Value::Int(30)));
        assert_eq!(list.get(-3), Some(Value::Int(10)));
        assert_eq!(list.get(-4), None);
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn remove_shifts_down() {
        let mut list = List::new();
        for v in [1, 2, 3] {
            list.add(v).unwrap();
        }
        assert_eq!(list.remove(0), Some(Tag::Int(1)));
        assert_eq!(list.get(0), Some(Value::Int(2)));
        assert_eq!(list.remove(5), None);
        list.clear();
        assert_eq!(list.elem_kind(), TagKind::End);
    }

    #[test]
    fn emptied_list_takes_any_kind() {
        let mut list = List::new();
        list.push(Tag::Int(1)).unwrap();
        assert_eq!(list.remove(0), Some(Tag::Int(1)));
        assert_eq!(list.elem_kind(), TagKind::End);
        list.push(Tag::from("s")).unwrap();
        assert_eq!(list.elem_kind(), TagKind::String);

        list.add("t").unwrap();
        list.clear();
        list.push(Tag::Byte(1)).unwrap();
        assert_eq!(list.elem_kind(), TagKind::Byte);
    }

    #[test]
    fn set_keeps_kind_unless_single() {
        let mut list = List::new();
        list.add(1).unwrap();
        list.set(0, Tag::from("x")).unwrap();
        assert_eq!(list.elem_kind(), TagKind::String);
        list.add("y").unwrap();
        assert!(list.set(1, Tag::Int(2)).is_err());
    }

    #[test]
    fn insert_past_end_fails() {
        let mut list = List::new();
        assert!(list.insert(1, Tag::Int(1)).is_err());
        list.insert(0, Tag::Int(1)).unwrap();
        list.insert(0, Tag::Int(0)).unwrap();
        assert_eq!(list.get(0), Some(Value::Int(0)));
    }
}
