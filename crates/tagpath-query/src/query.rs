use std::fmt;
use std::str::FromStr;

use tagpath_tag::{Compound, List, Tag, TagError, TagKind};

use crate::error::QueryError;
use crate::selector::Selector;
use crate::text::QueryParser;

/// Ordered sequence of selectors addressing one node of a tag tree.
///
/// The empty query addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    selectors: Vec<Selector>,
}

impl Query {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn root() -> Self {
        Self::default()
    }

    /// Parse the text form, e.g. `a.b[0]` or `."odd key"[-1]`.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        QueryParser::parse(text).map(Self::new)
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn last(&self) -> Option<&Selector> {
        self.selectors.last()
    }

    /// Query of the enclosing node; `None` for the root query.
    pub fn parent(&self) -> Option<Query> {
        self.selectors
            .split_last()
            .map(|(_, rest)| Query::new(rest.to_vec()))
    }

    /// This query followed by `other`.
    pub fn join(&self, other: &Query) -> Query {
        let mut selectors = self.selectors.clone();
        selectors.extend_from_slice(&other.selectors);
        Query::new(selectors)
    }

    pub fn child(&self, selector: impl Into<Selector>) -> Query {
        let mut selectors = self.selectors.clone();
        selectors.push(selector.into());
        Query::new(selectors)
    }

    fn prefix(&self, len: usize) -> String {
        Query::new(self.selectors[..len].to_vec()).to_string()
    }

    fn not_found(&self, depth: usize) -> QueryError {
        QueryError::TagNotFound {
            path: self.prefix(depth + 1),
        }
    }

    fn mismatch(&self, depth: usize, found: TagKind) -> QueryError {
        QueryError::KindMismatch {
            path: self.prefix(depth),
            expected: self.selectors[depth].container_kind(),
            found,
        }
    }

    fn out_of_range(&self, depth: usize, index: isize, len: usize) -> QueryError {
        QueryError::IndexOutOfRange {
            path: self.prefix(depth),
            index,
            len,
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Node addressed by this query.
    ///
    /// # Errors
    ///
    /// [`QueryError::TagNotFound`] when any step does not resolve: a key on
    /// something other than a compound, a missing key, an index on something
    /// other than a list, or an index out of range.
    pub fn get<'t>(&self, root: &'t Tag) -> Result<&'t Tag, QueryError> {
        let mut cur = root;
        for (depth, selector) in self.selectors.iter().enumerate() {
            cur = step(cur, selector).ok_or_else(|| self.not_found(depth))?;
        }
        Ok(cur)
    }

    pub fn get_mut<'t>(&self, root: &'t mut Tag) -> Result<&'t mut Tag, QueryError> {
        self.walk_mut(root, self.selectors.len())
    }

    /// Whether the query resolves to a node.
    pub fn exists(&self, root: &Tag) -> bool {
        self.get(root).is_ok()
    }

    fn walk_mut<'t>(&self, root: &'t mut Tag, depth: usize) -> Result<&'t mut Tag, QueryError> {
        let mut cur = root;
        for (i, selector) in self.selectors[..depth].iter().enumerate() {
            cur = step_mut(cur, selector).ok_or_else(|| self.not_found(i))?;
        }
        Ok(cur)
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Store `value` at this query, creating missing intermediate nodes.
    ///
    /// A missing key step creates a compound and a missing index step
    /// creates a list; an `End` root or child counts as missing. On an
    /// existing list the index may name an element (replace) or equal the
    /// length (append); on a list created by this call only `0` is valid.
    ///
    /// The whole path is checked before anything is touched, so on error
    /// `root` is left exactly as it was.
    pub fn set(&self, root: &mut Tag, value: Tag) -> Result<(), QueryError> {
        if value.is_end() {
            return Err(TagError::AbsentValue.into());
        }
        self.check_set(root, value.kind())?;
        self.place(root, 0, value)
    }

    fn check_set(&self, root: &Tag, kind: TagKind) -> Result<(), QueryError> {
        // `None` marks a node this call will create
        let mut cur = Some(root).filter(|t| !t.is_end());
        let count = self.selectors.len();
        for (depth, selector) in self.selectors.iter().enumerate() {
            let last = depth + 1 == count;
            // kind of what gets stored by this step
            let stored = if last {
                kind
            } else {
                self.selectors[depth + 1].container_kind()
            };
            cur = match (cur, selector) {
                (None, Selector::Key(key)) => {
                    if key.is_empty() {
                        return Err(TagError::EmptyKey.into());
                    }
                    None
                }
                (None, Selector::Index(0)) => None,
                (None, Selector::Index(index)) => {
                    return Err(self.out_of_range(depth, *index, 0));
                }
                (Some(Tag::Compound(compound)), Selector::Key(key)) => {
                    if key.is_empty() {
                        return Err(TagError::EmptyKey.into());
                    }
                    compound.get_tag(key).filter(|t| !t.is_end())
                }
                (Some(Tag::List(list)), Selector::Index(index)) => {
                    check_list_step(list, *index, stored, last)
                        .map_err(|e| self.list_error(depth, e))?
                }
                (Some(other), _) => return Err(self.mismatch(depth, other.kind())),
            };
        }
        Ok(())
    }

    fn list_error(&self, depth: usize, err: TagError) -> QueryError {
        match err {
            TagError::IndexOutOfRange { index, len } => self.out_of_range(depth, index, len),
            other => other.into(),
        }
    }

    fn place(&self, node: &mut Tag, depth: usize, value: Tag) -> Result<(), QueryError> {
        let Some(selector) = self.selectors.get(depth) else {
            *node = value;
            return Ok(());
        };
        if node.is_end() {
            *node = fresh_container(selector);
        }
        let next = self.selectors.get(depth + 1);
        match (selector, node) {
            (Selector::Key(key), Tag::Compound(compound)) => {
                let Some(next) = next else {
                    compound.insert(key.as_str(), value)?;
                    return Ok(());
                };
                if compound.get_tag(key).map_or(true, Tag::is_end) {
                    compound.insert(key.as_str(), fresh_container(next))?;
                }
                let child = compound
                    .get_tag_mut(key)
                    .ok_or_else(|| self.not_found(depth))?;
                self.place(child, depth + 1, value)
            }
            (Selector::Index(index), Tag::List(list)) => {
                if list.resolve_index(*index).is_some() {
                    if next.is_none() {
                        list.set(*index, value)?;
                        return Ok(());
                    }
                    let child = list
                        .get_tag_mut(*index)
                        .ok_or_else(|| self.not_found(depth))?;
                    return self.place(child, depth + 1, value);
                }
                let child = match next {
                    None => value,
                    Some(next) => {
                        let mut child = fresh_container(next);
                        self.place(&mut child, depth + 1, value)?;
                        child
                    }
                };
                list.push(child)?;
                Ok(())
            }
            (_, other) => Err(self.mismatch(depth, other.kind())),
        }
    }

    /// Detach and return the node at this query.
    ///
    /// Nothing is created. Intermediate steps that do not resolve give
    /// [`QueryError::TagNotFound`], as does a missing final key. A final
    /// index out of range gives [`QueryError::IndexOutOfRange`] and a final
    /// parent of the wrong kind gives [`QueryError::KindMismatch`].
    ///
    /// Removing the root query takes the whole tree and leaves `End`.
    pub fn remove(&self, root: &mut Tag) -> Result<Tag, QueryError> {
        let Some((selector, parents)) = self.selectors.split_last() else {
            return Ok(std::mem::take(root));
        };
        let depth = parents.len();
        let parent = self.walk_mut(root, depth)?;
        match (selector, parent) {
            (Selector::Key(key), Tag::Compound(compound)) => {
                compound.take(key).ok_or_else(|| self.not_found(depth))
            }
            (Selector::Index(index), Tag::List(list)) => {
                let len = list.len();
                list.remove(*index)
                    .ok_or_else(|| self.out_of_range(depth, *index, len))
            }
            (_, Tag::End) => Err(self.not_found(depth)),
            (_, other) => Err(self.mismatch(depth, other.kind())),
        }
    }
}

fn step<'t>(tag: &'t Tag, selector: &Selector) -> Option<&'t Tag> {
    match (selector, tag) {
        (Selector::Key(key), Tag::Compound(compound)) => compound.get_tag(key),
        (Selector::Index(index), Tag::List(list)) => list.get_tag(*index),
        _ => None,
    }
}

fn step_mut<'t>(tag: &'t mut Tag, selector: &Selector) -> Option<&'t mut Tag> {
    match (selector, tag) {
        (Selector::Key(key), Tag::Compound(compound)) => compound.get_tag_mut(key),
        (Selector::Index(index), Tag::List(list)) => list.get_tag_mut(*index),
        _ => None,
    }
}

fn fresh_container(selector: &Selector) -> Tag {
    match selector {
        Selector::Key(_) => Tag::Compound(Compound::new()),
        Selector::Index(_) => Tag::List(List::new()),
    }
}

/// Check one list step of a `set`; returns the existing child to descend
/// into, or `None` when the step appends.
fn check_list_step(
    list: &List,
    index: isize,
    stored: TagKind,
    last: bool,
) -> Result<Option<&Tag>, TagError> {
    if list.resolve_index(index).is_some() {
        if last && !list.accepts_replacement(stored) {
            return Err(TagError::ListKind {
                expected: list.elem_kind(),
                found: stored,
            });
        }
        return Ok(list.get_tag(index));
    }
    if index < 0 || index as usize != list.len() {
        return Err(TagError::IndexOutOfRange {
            index,
            len: list.len(),
        });
    }
    if !list.accepts(stored) {
        return Err(TagError::ListKind {
            expected: list.elem_kind(),
            found: stored,
        });
    }
    Ok(None)
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for selector in &self.selectors {
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

impl From<Vec<Selector>> for Query {
    fn from(selectors: Vec<Selector>) -> Self {
        Query::new(selectors)
    }
}

impl FromIterator<Selector> for Query {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Query::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Query {
        Query::parse(text).unwrap()
    }

    #[test]
    fn parent_and_join() {
        assert_eq!(q("a.b[0]").parent(), Some(q("a.b")));
        assert_eq!(Query::root().parent(), None);
        assert_eq!(q("a").join(&q("[1].c")), q("a[1].c"));
        assert_eq!(q("a").child(2), q("a[2]"));
    }

    #[test]
    fn display_roundtrips() {
        for text in ["", ".a", ".a.b[0]", r#"."a b"[-1]"#, r#"[3]."x\"y""#] {
            assert_eq!(q(text).to_string(), text);
        }
        assert_eq!(q("a.b").to_string(), ".a.b");
    }

    #[test]
    fn set_on_end_root_creates_compound() {
        let mut root = Tag::End;
        q("a").set(&mut root, Tag::Int(1)).unwrap();
        assert_eq!(root.as_compound().unwrap().get_int("a"), 1);
    }

    #[test]
    fn set_root_replaces_everything() {
        let mut root = Tag::Int(1);
        Query::root().set(&mut root, Tag::from("x")).unwrap();
        assert_eq!(root, Tag::from("x"));
    }

    #[test]
    fn set_rejects_end_value() {
        let mut root = Tag::End;
        assert_eq!(
            q("a").set(&mut root, Tag::End),
            Err(QueryError::Tag(TagError::AbsentValue))
        );
    }

    #[test]
    fn remove_root_leaves_end() {
        let mut root = Tag::Int(4);
        assert_eq!(Query::root().remove(&mut root), Ok(Tag::Int(4)));
        assert!(root.is_end());
    }

    #[test]
    fn error_paths_name_the_failing_prefix() {
        let root = Tag::Compound(Compound::new());
        assert_eq!(
            q("a.b").get(&root),
            Err(QueryError::TagNotFound {
                path: ".a".to_string()
            })
        );
    }
}
