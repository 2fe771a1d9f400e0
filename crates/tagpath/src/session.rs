//! Per-caller editing state.

use std::path::PathBuf;

use tagpath_literal::ParseOptions;

use crate::action::{Action, Step};
use crate::container::{shared, BufferContainer, ContainerRef, Variables};
use crate::error::{ActionError, ReferenceError};
use crate::reference::Reference;
use crate::report::Report;
use crate::resolver::{NoSources, SourceResolver};

/// Options for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Deepest nesting accepted when parsing literals.
    pub max_depth: usize,
    /// Folder that `file:` tokens may not leave.
    pub file_root: PathBuf,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_depth: ParseOptions::default().max_depth,
            file_root: PathBuf::from("."),
        }
    }
}

impl SessionOptions {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }
}

/// What became of an action handed to [`Session::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done(Report),
    /// Parked until [`Session::select`] or [`Session::cancel`].
    Awaiting,
}

/// Clipboard, variables and at most one parked action.
///
/// An action that needs an outside selection is parked rather than blocked
/// on. [`Session::select`] resumes it once; [`Session::cancel`] drops it.
pub struct Session {
    buffer: ContainerRef,
    variables: Variables,
    resolver: Box<dyn SourceResolver>,
    options: SessionOptions,
    parked: Option<Box<dyn Action>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_resolver(NoSources)
    }

    pub fn with_resolver(resolver: impl SourceResolver + 'static) -> Self {
        Self {
            buffer: shared(BufferContainer::new()),
            variables: Variables::new(),
            resolver: Box::new(resolver),
            options: SessionOptions::default(),
            parked: None,
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn buffer(&self) -> &ContainerRef {
        &self.buffer
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn resolver(&self) -> &dyn SourceResolver {
        self.resolver.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Read an object token in this session. See [`Reference::new`].
    pub fn reference(&self, object: &str, param: Option<&str>) -> Result<Reference, ReferenceError> {
        Reference::new(self, object, param)
    }

    pub fn is_awaiting(&self) -> bool {
        self.parked.is_some()
    }

    /// Execute `action`, or park it when it waits for a selection.
    ///
    /// A newly parked action replaces one parked earlier.
    pub fn run(&mut self, action: impl Action + 'static) -> Result<Outcome, ActionError> {
        self.drive(Box::new(action))
    }

    /// Hand `container` to the parked action and resume it.
    pub fn select(&mut self, container: ContainerRef) -> Result<Outcome, ActionError> {
        let mut action = self.parked.take().ok_or(ActionError::NothingAwaiting)?;
        let reference = action.awaiting().ok_or(ActionError::NothingAwaiting)?;
        reference.select(container)?;
        self.drive(action)
    }

    /// Drop the parked action, if any. Returns whether one was parked.
    pub fn cancel(&mut self) -> bool {
        self.parked.take().is_some()
    }

    fn drive(&mut self, mut action: Box<dyn Action>) -> Result<Outcome, ActionError> {
        match action.execute(self)? {
            Step::Done(report) => Ok(Outcome::Done(report)),
            Step::AwaitingSelection => {
                self.parked = Some(action);
                Ok(Outcome::Awaiting)
            }
        }
    }
}
