//! Sources of root trees that live outside the session.

use indexmap::IndexMap;

use crate::container::ContainerRef;
use crate::error::ContainerError;

/// Looks up containers for object tokens the session does not know.
///
/// `param` is the token's parameter, which sources may interpret (an id,
/// a coordinate, ...). Returning `Ok(None)` means "not mine"; the caller
/// then reports an undefined object.
pub trait SourceResolver {
    fn resolve(
        &self,
        object: &str,
        param: Option<&str>,
    ) -> Result<Option<ContainerRef>, ContainerError>;
}

/// Resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSources;

impl SourceResolver for NoSources {
    fn resolve(&self, _: &str, _: Option<&str>) -> Result<Option<ContainerRef>, ContainerError> {
        Ok(None)
    }
}

/// Fixed table of named containers.
///
/// The parameter of a token resolved here is a query into the container,
/// applied by the caller.
#[derive(Default)]
pub struct NamedSources {
    entries: IndexMap<String, ContainerRef>,
}

impl NamedSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, container: ContainerRef) -> Self {
        self.insert(name, container);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, container: ContainerRef) -> Option<ContainerRef> {
        self.entries.insert(name.into(), container)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl SourceResolver for NamedSources {
    fn resolve(
        &self,
        object: &str,
        _: Option<&str>,
    ) -> Result<Option<ContainerRef>, ContainerError> {
        Ok(self.entries.get(object).cloned())
    }
}
