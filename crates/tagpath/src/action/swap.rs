use tagpath_query::Query;

use super::{awaiting_of, ready_pair, Action, Step};
use crate::container::{with_mut, with_ref};
use crate::error::{ActionError, ContainerError};
use crate::reference::Reference;
use crate::report::Report;
use crate::session::Session;

/// Exchange two values. A missing side erases the other.
///
/// Both sides are checked for writability before either is written.
pub struct SwapAction {
    first: Reference,
    second: Reference,
}

impl SwapAction {
    pub fn new(first: Reference, second: Reference) -> Self {
        Self { first, second }
    }
}

impl Action for SwapAction {
    fn execute(&mut self, _: &mut Session) -> Result<Step, ActionError> {
        if !ready_pair(&mut self.first, &mut self.second)? {
            return Ok(Step::AwaitingSelection);
        }
        let (c1, q1) = self.first.target()?;
        let (c2, q2) = self.second.target()?;
        let v1 = with_mut(c1, |c| c.get_custom_at(q1))?;
        let v2 = with_mut(c2, |c| c.get_custom_at(q2))?;
        if v1.is_none() && v2.is_none() {
            return Ok(Step::Done(Report::SwappedNothing));
        }
        let failed = |query: &Query| {
            let query = query.to_string();
            move |source: ContainerError| ActionError::Failed {
                action: "swap",
                query,
                source,
            }
        };
        with_ref(c1, |c| c.ensure_writable()).map_err(failed(q1))?;
        with_ref(c2, |c| c.ensure_writable()).map_err(failed(q2))?;
        with_mut(c1, |c| match v2 {
            Some(v) => c.set_custom_at(q1, v),
            None => c.remove_tag_at(q1).map(drop),
        })
        .map_err(failed(q1))?;
        with_mut(c2, |c| match v1 {
            Some(v) => c.set_custom_at(q2, v),
            None => c.remove_tag_at(q2).map(drop),
        })
        .map_err(failed(q2))?;
        Ok(Step::Done(Report::Swapped))
    }

    fn awaiting(&mut self) -> Option<&mut Reference> {
        awaiting_of([&mut self.first, &mut self.second])
    }
}
