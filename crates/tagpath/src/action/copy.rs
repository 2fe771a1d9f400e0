use super::{ready, Action, Step};
use crate::container::with_mut;
use crate::error::ActionError;
use crate::reference::Reference;
use crate::report::Report;
use crate::session::Session;

/// Put a value on the clipboard.
///
/// Copying nothing clears the clipboard.
pub struct CopyAction {
    source: Reference,
}

impl CopyAction {
    pub fn new(source: Reference) -> Self {
        Self { source }
    }
}

impl Action for CopyAction {
    fn execute(&mut self, session: &mut Session) -> Result<Step, ActionError> {
        if !ready(&mut self.source, None)? {
            return Ok(Step::AwaitingSelection);
        }
        let (container, query) = self.source.target()?;
        let value = with_mut(container, |c| c.get_custom_at(query))?;
        with_mut(session.buffer(), |buffer| match &value {
            Some(v) => buffer.write_custom_tag(v.clone()),
            None if buffer.read_tag()?.is_some() => buffer.erase_custom_tag(),
            None => Ok(()),
        })?;
        Ok(Step::Done(Report::Copied(value)))
    }

    fn awaiting(&mut self) -> Option<&mut Reference> {
        Some(&mut self.source).filter(|r| r.is_awaiting_selection())
    }
}
