use std::rc::Rc;

use tagpath_tag::Primitive;

use super::{ready, Action, Step};
use crate::container::with_mut;
use crate::error::ActionError;
use crate::reference::Reference;
use crate::report::Report;
use crate::session::Session;

/// Move a value to the clipboard.
///
/// Cutting out of the clipboard itself detaches the value before storing it.
pub struct CutAction {
    source: Reference,
}

impl CutAction {
    pub fn new(source: Reference) -> Self {
        Self { source }
    }
}

impl Action for CutAction {
    fn execute(&mut self, session: &mut Session) -> Result<Step, ActionError> {
        if !ready(&mut self.source, None)? {
            return Ok(Step::AwaitingSelection);
        }
        let (container, query) = self.source.target()?;
        let value = with_mut(container, |c| c.get_custom_at(query))?
            .ok_or_else(|| ActionError::NoValue(self.source.to_string()))?;
        let into_buffer = |value: Primitive| with_mut(session.buffer(), |b| b.write_custom_tag(value));
        if Rc::ptr_eq(container, session.buffer()) {
            with_mut(container, |c| c.remove_tag_at(query))?;
            into_buffer(value.clone())?;
        } else {
            into_buffer(value.clone())?;
            with_mut(container, |c| c.remove_tag_at(query))?;
        }
        Ok(Step::Done(Report::Cut(value)))
    }

    fn awaiting(&mut self) -> Option<&mut Reference> {
        Some(&mut self.source).filter(|r| r.is_awaiting_selection())
    }
}
