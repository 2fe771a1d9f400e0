use tagpath_query::Query;
use tagpath_tag::Primitive;

use super::{ready, Action, Step};
use crate::container::with_mut;
use crate::error::ActionError;
use crate::reference::Reference;
use crate::report::Report;
use crate::session::Session;

/// Give a value a new key (or index) under the same parent.
///
/// Works on the raw root of one container: the value is detached, placed
/// at the new path, and the root written back once.
pub struct RenameAction {
    source: Reference,
    name: String,
    relative: Query,
}

impl RenameAction {
    /// `name` is a query relative to the source's parent, e.g. `b` or `[0]`.
    pub fn new(source: Reference, name: &str) -> Result<Self, ActionError> {
        let relative = Query::parse(name)?;
        if relative.is_empty() {
            return Err(ActionError::EmptyName);
        }
        Ok(Self {
            source,
            name: name.to_string(),
            relative,
        })
    }
}

impl Action for RenameAction {
    fn execute(&mut self, _: &mut Session) -> Result<Step, ActionError> {
        if !ready(&mut self.source, None)? {
            return Ok(Step::AwaitingSelection);
        }
        let (container, query) = self.source.target()?;
        let Some(parent) = query.parent() else {
            return Err(ActionError::RootRename);
        };
        let destination = parent.join(&self.relative);
        let renamed = with_mut(container, |c| {
            let Some(mut root) = c.read_tag()? else {
                return Ok(None);
            };
            if query.get(&root).is_err() {
                return Ok(None);
            }
            let value = query.remove(&mut root)?;
            destination.set(&mut root, value.clone())?;
            c.set_tag_at(&Query::root(), root)?;
            Ok(Some(value))
        })?;
        let report = match renamed.as_ref().and_then(Primitive::from_tag) {
            Some(value) => Report::Renamed {
                name: self.name.clone(),
                value,
            },
            None => Report::NotRenamed,
        };
        Ok(Step::Done(report))
    }

    fn awaiting(&mut self) -> Option<&mut Reference> {
        Some(&mut self.source).filter(|r| r.is_awaiting_selection())
    }
}
