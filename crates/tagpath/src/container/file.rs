use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tagpath_literal::{parse_with, ParseOptions};
use tagpath_tag::Tag;

use super::Container;
use crate::error::ContainerError;

/// A file holding one tree in literal text.
///
/// Every read loads the file and every write saves it. A missing or blank
/// file reads as no value.
#[derive(Debug, Clone)]
pub struct LiteralFile {
    path: PathBuf,
    options: ParseOptions,
}

impl LiteralFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ParseOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ParseOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, err: io::Error) -> ContainerError {
        ContainerError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl Container for LiteralFile {
    fn label(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn read_tag(&self) -> Result<Option<Tag>, ContainerError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        let tag = parse_with(&text, &self.options)?;
        Ok(Some(tag).filter(|t| !t.is_end()))
    }

    fn write_tag(&mut self, tag: Tag) -> Result<(), ContainerError> {
        fs::write(&self.path, tag.to_string()).map_err(|e| self.io_error(e))
    }

    fn erase_tag(&mut self) -> Result<(), ContainerError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ContainerError::not_found(self.label()))
            }
            Err(e) => Err(self.io_error(e)),
        }
    }
}
