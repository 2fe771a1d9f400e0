use tagpath_tag::Tag;

use super::Container;
use crate::error::ContainerError;

/// An in-memory tree.
#[derive(Debug, Clone, Default)]
pub struct ValueContainer {
    tag: Tag,
    readonly: bool,
}

impl ValueContainer {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            readonly: false,
        }
    }

    /// A literal value that edits may read but never change.
    pub fn readonly(tag: Tag) -> Self {
        Self {
            tag,
            readonly: true,
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn into_tag(self) -> Tag {
        self.tag
    }
}

impl Container for ValueContainer {
    fn label(&self) -> String {
        match &self.tag {
            Tag::End => "value".to_string(),
            tag => tag.to_string(),
        }
    }

    fn read_tag(&self) -> Result<Option<Tag>, ContainerError> {
        Ok(Some(self.tag.clone()).filter(|t| !t.is_end()))
    }

    fn write_tag(&mut self, tag: Tag) -> Result<(), ContainerError> {
        self.ensure_writable()?;
        self.tag = tag;
        Ok(())
    }

    fn erase_tag(&mut self) -> Result<(), ContainerError> {
        self.ensure_writable()?;
        if self.tag.is_end() {
            return Err(ContainerError::not_found(""));
        }
        self.tag = Tag::End;
        Ok(())
    }

    fn is_object_readonly(&self) -> bool {
        self.readonly
    }
}
