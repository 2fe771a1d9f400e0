use super::{awaiting_of, ready_pair, Action, Step};
use crate::container::with_mut;
use crate::error::{ActionError, ContainerError};
use crate::reference::Reference;
use crate::report::Report;
use crate::session::Session;

/// Set a value at the destination, then erase it at the source.
///
/// The two steps are separate container operations; if the erase fails the
/// value exists in both places.
pub struct MoveAction {
    source: Reference,
    destination: Reference,
}

impl MoveAction {
    pub fn new(source: Reference, destination: Reference) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl Action for MoveAction {
    fn execute(&mut self, _: &mut Session) -> Result<Step, ActionError> {
        if !ready_pair(&mut self.source, &mut self.destination)? {
            return Ok(Step::AwaitingSelection);
        }
        let (c1, q1) = self.source.target()?;
        let (c2, q2) = self.destination.target()?;
        let value = with_mut(c1, |c| c.get_custom_at(q1))?
            .ok_or_else(|| ActionError::NoValue(self.source.to_string()))?;
        let failed = |source: ContainerError| ActionError::Failed {
            action: "move",
            query: q2.to_string(),
            source,
        };
        with_mut(c2, |c| c.set_custom_at(q2, value.clone())).map_err(failed)?;
        with_mut(c1, |c| c.remove_tag_at(q1)).map_err(failed)?;
        Ok(Step::Done(Report::Moved(value)))
    }

    fn awaiting(&mut self) -> Option<&mut Reference> {
        awaiting_of([&mut self.source, &mut self.destination])
    }
}
