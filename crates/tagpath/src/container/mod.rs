//! Addressable documents.
//!
//! A [`Container`] owns (or reaches) one root tag tree. Raw access works on
//! [`Tag`]s and never leaves memory except for file-backed containers;
//! "custom" access works on host [`Primitive`]s and is what edit actions use.
//!
//! Containers are shared as [`ContainerRef`] handles so that a
//! [`Complex`] can address a subtree of another container lazily.

mod buffer;
mod complex;
mod file;
mod value;
mod variable;

use std::cell::RefCell;
use std::rc::Rc;

use tagpath_query::Query;
use tagpath_tag::{HostBridge, Primitive, PrimitiveBridge, Tag};

use crate::error::ContainerError;

pub use buffer::BufferContainer;
pub use complex::Complex;
pub use file::LiteralFile;
pub use value::ValueContainer;
pub use variable::{VariableContainer, Variables};

/// Shared handle on a container.
pub type ContainerRef = Rc<RefCell<dyn Container>>;

/// Wrap a container into a shared handle.
pub fn shared<C: Container + 'static>(container: C) -> ContainerRef {
    Rc::new(RefCell::new(container))
}

pub trait Container {
    /// User-facing name.
    fn label(&self) -> String;

    /// The whole root tree; `None` when nothing is stored.
    fn read_tag(&self) -> Result<Option<Tag>, ContainerError>;

    fn write_tag(&mut self, tag: Tag) -> Result<(), ContainerError>;

    /// Delete the root tree. Fails when nothing is stored.
    fn erase_tag(&mut self) -> Result<(), ContainerError>;

    /// Host view of the root tree.
    fn read_custom_tag(&mut self) -> Result<Option<Primitive>, ContainerError> {
        Ok(self
            .read_tag()?
            .and_then(|tag| HostBridge.tag_to_primitive(&tag)))
    }

    fn write_custom_tag(&mut self, value: Primitive) -> Result<(), ContainerError> {
        let tag = HostBridge.primitive_to_tag(value)?;
        self.write_tag(tag)
    }

    fn erase_custom_tag(&mut self) -> Result<(), ContainerError> {
        self.erase_tag()
    }

    /// Query of this container's tree from its ultimate root.
    fn selector_query(&self) -> Query {
        Query::root()
    }

    fn is_object_readonly(&self) -> bool {
        false
    }

    // ── Query-relative helpers ─────────────────────────────────────────────

    fn ensure_writable(&self) -> Result<(), ContainerError> {
        if self.is_object_readonly() {
            return Err(ContainerError::ReadOnly(self.label()));
        }
        Ok(())
    }

    /// Subtree at `query`, or `None` when it does not exist.
    fn get_tag_at(&self, query: &Query) -> Result<Option<Tag>, ContainerError> {
        let Some(mut root) = self.read_tag()? else {
            return Ok(None);
        };
        match query.get_mut(&mut root) {
            Ok(tag) => Ok(Some(std::mem::take(tag)).filter(|t| !t.is_end())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `tag` at `query`, creating intermediate nodes as needed.
    fn set_tag_at(&mut self, query: &Query, tag: Tag) -> Result<(), ContainerError> {
        self.ensure_writable()?;
        if query.is_empty() {
            return self.write_tag(tag);
        }
        let mut root = self.read_tag()?.unwrap_or_default();
        query.set(&mut root, tag)?;
        self.write_tag(root)
    }

    /// Detach the subtree at `query` and return it.
    fn remove_tag_at(&mut self, query: &Query) -> Result<Tag, ContainerError> {
        self.ensure_writable()?;
        let mut root = self
            .read_tag()?
            .ok_or_else(|| ContainerError::not_found(query.to_string()))?;
        if query.is_empty() {
            self.erase_tag()?;
            return Ok(root);
        }
        let removed = query.remove(&mut root)?;
        self.write_tag(root)?;
        Ok(removed)
    }

    fn get_custom_at(&mut self, query: &Query) -> Result<Option<Primitive>, ContainerError> {
        let Some(root) = self.read_custom_tag()? else {
            return Ok(None);
        };
        if query.is_empty() {
            return Ok(Some(root));
        }
        let tree = HostBridge.primitive_to_tag(root)?;
        Ok(query
            .get(&tree)
            .ok()
            .and_then(|tag| HostBridge.tag_to_primitive(tag)))
    }

    fn set_custom_at(&mut self, query: &Query, value: Primitive) -> Result<(), ContainerError> {
        self.ensure_writable()?;
        if query.is_empty() {
            return self.write_custom_tag(value);
        }
        let mut tree = match self.read_custom_tag()? {
            Some(root) => HostBridge.primitive_to_tag(root)?,
            None => Tag::End,
        };
        query.set(&mut tree, HostBridge.primitive_to_tag(value)?)?;
        match HostBridge.tag_to_primitive(&tree) {
            Some(root) => self.write_custom_tag(root),
            None => self.erase_custom_tag(),
        }
    }

    fn remove_custom_at(&mut self, query: &Query) -> Result<Primitive, ContainerError> {
        self.ensure_writable()?;
        let root = self
            .read_custom_tag()?
            .ok_or_else(|| ContainerError::not_found(query.to_string()))?;
        if query.is_empty() {
            self.erase_custom_tag()?;
            return Ok(root);
        }
        let mut tree = HostBridge.primitive_to_tag(root)?;
        let removed = query.remove(&mut tree)?;
        match HostBridge.tag_to_primitive(&tree) {
            Some(root) => self.write_custom_tag(root)?,
            None => self.erase_custom_tag()?,
        }
        HostBridge
            .tag_to_primitive(&removed)
            .ok_or_else(|| ContainerError::not_found(query.to_string()))
    }
}

/// Borrow a shared container for reading.
pub(crate) fn with_ref<R>(
    container: &ContainerRef,
    f: impl FnOnce(&dyn Container) -> Result<R, ContainerError>,
) -> Result<R, ContainerError> {
    let guard = container
        .try_borrow()
        .map_err(|_| ContainerError::Busy("container".to_string()))?;
    f(&*guard)
}

/// Borrow a shared container for writing.
pub(crate) fn with_mut<R>(
    container: &ContainerRef,
    f: impl FnOnce(&mut dyn Container) -> Result<R, ContainerError>,
) -> Result<R, ContainerError> {
    let mut guard = container
        .try_borrow_mut()
        .map_err(|_| ContainerError::Busy("container".to_string()))?;
    f(&mut *guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Query {
        Query::parse(text).unwrap()
    }

    #[test]
    fn helpers_compose_query_with_root() {
        let mut c = ValueContainer::new(Tag::End);
        c.set_tag_at(&q("a.b"), Tag::Int(1)).unwrap();
        assert_eq!(c.get_tag_at(&q("a.b")).unwrap(), Some(Tag::Int(1)));
        assert_eq!(c.get_tag_at(&q("a.c")).unwrap(), None);
        assert_eq!(c.remove_tag_at(&q("a.b")).unwrap(), Tag::Int(1));
        assert!(c.remove_tag_at(&q("a.b")).unwrap_err().is_not_found());
    }

    #[test]
    fn custom_helpers_use_host_values() {
        let mut c = ValueContainer::new(Tag::End);
        c.set_custom_at(&q("flag"), Primitive::Bool(true)).unwrap();
        assert_eq!(c.get_custom_at(&q("flag")).unwrap(), Some(Primitive::Byte(1)));
        assert_eq!(c.remove_custom_at(&q("flag")).unwrap(), Primitive::Byte(1));
        assert_eq!(c.get_custom_at(&q("flag")).unwrap(), None);
    }

    #[test]
    fn readonly_blocks_every_write() {
        let mut c = ValueContainer::readonly(Tag::Int(1));
        assert!(matches!(c.set_tag_at(&q(""), Tag::Int(2)), Err(ContainerError::ReadOnly(_))));
        assert!(matches!(c.remove_tag_at(&q("")), Err(ContainerError::ReadOnly(_))));
        assert!(matches!(
            c.set_custom_at(&q("x"), Primitive::Int(2)),
            Err(ContainerError::ReadOnly(_))
        ));
        assert_eq!(c.read_tag().unwrap(), Some(Tag::Int(1)));
    }
}
