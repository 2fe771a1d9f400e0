use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use tagpath_tag::Tag;

use super::Container;
use crate::error::ContainerError;

/// Named trees kept for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: Rc<RefCell<IndexMap<String, Tag>>>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Tag> {
        self.entries.borrow().get(name).cloned()
    }

    /// Store `tag` under `name`; `End` removes the variable.
    pub fn set(&self, name: &str, tag: Tag) -> Option<Tag> {
        let mut entries = self.entries.borrow_mut();
        if tag.is_end() {
            return entries.shift_remove(name);
        }
        entries.insert(name.to_string(), tag)
    }

    pub fn remove(&self, name: &str) -> Option<Tag> {
        self.entries.borrow_mut().shift_remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Container over one variable, which need not exist yet.
    pub fn container(&self, name: &str) -> VariableContainer {
        VariableContainer {
            store: self.clone(),
            name: name.to_string(),
        }
    }
}

/// One session variable, addressed as `%name`.
#[derive(Debug, Clone)]
pub struct VariableContainer {
    store: Variables,
    name: String,
}

impl VariableContainer {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Container for VariableContainer {
    fn label(&self) -> String {
        format!("%{}", self.name)
    }

    fn read_tag(&self) -> Result<Option<Tag>, ContainerError> {
        Ok(self.store.get(&self.name))
    }

    fn write_tag(&mut self, tag: Tag) -> Result<(), ContainerError> {
        self.store.set(&self.name, tag);
        Ok(())
    }

    fn erase_tag(&mut self) -> Result<(), ContainerError> {
        self.store
            .remove(&self.name)
            .map(drop)
            .ok_or_else(|| ContainerError::not_found(self.label()))
    }
}
