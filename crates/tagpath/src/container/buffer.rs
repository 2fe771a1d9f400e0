use tagpath_tag::Tag;

use super::Container;
use crate::error::ContainerError;

/// The session clipboard.
#[derive(Debug, Clone, Default)]
pub struct BufferContainer {
    tag: Tag,
}

impl BufferContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_end()
    }
}

impl Container for BufferContainer {
    fn label(&self) -> String {
        "buffer".to_string()
    }

    fn read_tag(&self) -> Result<Option<Tag>, ContainerError> {
        Ok(Some(self.tag.clone()).filter(|t| !t.is_end()))
    }

    fn write_tag(&mut self, tag: Tag) -> Result<(), ContainerError> {
        self.tag = tag;
        Ok(())
    }

    fn erase_tag(&mut self) -> Result<(), ContainerError> {
        if self.tag.is_end() {
            return Err(ContainerError::not_found("buffer"));
        }
        self.tag = Tag::End;
        Ok(())
    }
}
