//! Edit actions.
//!
//! An action owns the [`Reference`]s it works on. Executing it first
//! prepares them in order, the second with the first as context; if one is
//! still waiting for a selection the action reports
//! [`Step::AwaitingSelection`] and is executed again once the selection is
//! made. Actions touch containers only through the [`Container`] helpers.
//!
//! [`Container`]: crate::container::Container

mod copy;
mod cut;
mod edit;
mod moves;
mod rename;
mod swap;

use crate::error::ActionError;
use crate::reference::{Context, Prepared, Reference};
use crate::report::Report;
use crate::session::Session;

pub use copy::CopyAction;
pub use cut::CutAction;
pub use edit::EditAction;
pub use moves::MoveAction;
pub use rename::RenameAction;
pub use swap::SwapAction;

/// Result of one execution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Done(Report),
    AwaitingSelection,
}

pub trait Action {
    fn execute(&mut self, session: &mut Session) -> Result<Step, ActionError>;

    /// The reference waiting for a selection, if any.
    fn awaiting(&mut self) -> Option<&mut Reference>;
}

/// Prepare `reference` if it is pending. False while it awaits a selection.
fn ready(reference: &mut Reference, context: Option<&Context>) -> Result<bool, ActionError> {
    if !reference.needs_prepare() {
        return Ok(true);
    }
    Ok(reference.prepare(context)? == Prepared::Resolved)
}

/// Prepare two references, the second in the context of the first.
fn ready_pair(first: &mut Reference, second: &mut Reference) -> Result<bool, ActionError> {
    if !ready(first, None)? {
        return Ok(false);
    }
    let context = first.context()?;
    ready(second, Some(&context))
}

fn awaiting_of<'a>(references: [&'a mut Reference; 2]) -> Option<&'a mut Reference> {
    references.into_iter().find(|r| r.is_awaiting_selection())
}
