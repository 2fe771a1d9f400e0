use super::{awaiting_of, ready_pair, Action, Step};
use crate::container::with_mut;
use crate::error::ActionError;
use crate::reference::Reference;
use crate::report::Report;
use crate::session::Session;

/// Set the target to the source value; a missing source erases the target.
///
/// The source is prepared against the target, so a bare number takes the
/// kind of the value it replaces.
pub struct EditAction {
    target: Reference,
    source: Reference,
}

impl EditAction {
    pub fn new(target: Reference, source: Reference) -> Self {
        Self { target, source }
    }
}

impl Action for EditAction {
    fn execute(&mut self, _: &mut Session) -> Result<Step, ActionError> {
        if !ready_pair(&mut self.target, &mut self.source)? {
            return Ok(Step::AwaitingSelection);
        }
        let (c1, q1) = self.target.target()?;
        let (c2, q2) = self.source.target()?;
        let value = with_mut(c2, |c| c.get_custom_at(q2))?;
        with_mut(c1, |c| match &value {
            Some(v) => c.set_custom_at(q1, v.clone()),
            None => match c.remove_tag_at(q1) {
                Err(e) if e.is_not_found() => Ok(()),
                other => other.map(drop),
            },
        })
        .map_err(|source| ActionError::Failed {
            action: "edit",
            query: q1.to_string(),
            source,
        })?;
        Ok(Step::Done(Report::Edited(value)))
    }

    fn awaiting(&mut self) -> Option<&mut Reference> {
        awaiting_of([&mut self.target, &mut self.source])
    }
}
