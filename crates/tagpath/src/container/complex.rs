use std::fmt;

use tagpath_query::Query;
use tagpath_tag::{Primitive, Tag};

use super::{with_mut, with_ref, Container, ContainerRef};
use crate::error::ContainerError;

/// A subtree of another container, addressed by a query.
///
/// Holds no tree of its own: every access goes through the inner container.
/// Reads of a missing path give `None`; writes and erases on a missing or
/// mistyped path fail.
pub struct Complex {
    inner: ContainerRef,
    query: Query,
}

impl Complex {
    pub fn new(inner: ContainerRef, query: Query) -> Self {
        Self { inner, query }
    }

    pub fn inner(&self) -> &ContainerRef {
        &self.inner
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    fn inner_label(&self) -> String {
        self.inner
            .try_borrow()
            .map(|c| c.label())
            .unwrap_or_else(|_| "?".to_string())
    }
}

impl fmt::Debug for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Complex")
            .field("inner", &self.inner_label())
            .field("query", &self.query)
            .finish()
    }
}

impl Container for Complex {
    fn label(&self) -> String {
        if self.query.is_empty() {
            format!("<{}>", self.inner_label())
        } else {
            format!("<{} {}>", self.inner_label(), self.query)
        }
    }

    fn read_tag(&self) -> Result<Option<Tag>, ContainerError> {
        with_ref(&self.inner, |c| c.get_tag_at(&self.query))
    }

    fn write_tag(&mut self, tag: Tag) -> Result<(), ContainerError> {
        with_mut(&self.inner, |c| c.set_tag_at(&self.query, tag))
    }

    fn erase_tag(&mut self) -> Result<(), ContainerError> {
        with_mut(&self.inner, |c| c.remove_tag_at(&self.query)).map(drop)
    }

    fn read_custom_tag(&mut self) -> Result<Option<Primitive>, ContainerError> {
        with_mut(&self.inner, |c| c.get_custom_at(&self.query))
    }

    fn write_custom_tag(&mut self, value: Primitive) -> Result<(), ContainerError> {
        with_mut(&self.inner, |c| c.set_custom_at(&self.query, value))
    }

    fn erase_custom_tag(&mut self) -> Result<(), ContainerError> {
        with_mut(&self.inner, |c| c.remove_custom_at(&self.query)).map(drop)
    }

    fn selector_query(&self) -> Query {
        match self.inner.try_borrow() {
            Ok(inner) => inner.selector_query().join(&self.query),
            Err(_) => self.query.clone(),
        }
    }

    fn is_object_readonly(&self) -> bool {
        self.inner
            .try_borrow()
            .map_or(true, |inner| inner.is_object_readonly())
    }
}
