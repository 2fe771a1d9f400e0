//! Addressable tag-tree documents and the edits made on them.
//!
//! A [`Container`] holds (or reaches) one root tree; a [`Complex`] views a
//! subtree of another container through a [`Query`]. A [`Reference`] reads
//! an object token such as `buffer`, `%var`, `{a:1}` or `*` into a container
//! and a query, possibly later: see [`Reference::prepare`]. Edit actions
//! (copy, cut, swap, rename, move, edit) run inside a [`Session`], which
//! parks an action that waits for a selection until it is resumed.
//!
//! # Example
//!
//! ```
//! use tagpath::{shared, EditAction, NamedSources, Outcome, Session, ValueContainer};
//! use tagpath::Container;
//! use tagpath_literal::parse;
//!
//! let doc = shared(ValueContainer::new(parse("{hp:20s}").unwrap()));
//! let mut session = Session::with_resolver(NamedSources::new().with("doc", doc.clone()));
//!
//! let target = session.reference("doc", Some("hp")).unwrap();
//! let value = session.reference("15", None).unwrap();
//! let outcome = session.run(EditAction::new(target, value)).unwrap();
//! assert!(matches!(outcome, Outcome::Done(_)));
//!
//! let root = doc.borrow().read_tag().unwrap().unwrap();
//! assert_eq!(root.to_string(), "{hp:15s}");
//! ```

pub mod action;
pub mod cli;
pub mod container;
pub mod error;
pub mod reference;
pub mod report;
pub mod resolver;
pub mod session;

pub use action::{
    Action, CopyAction, CutAction, EditAction, MoveAction, RenameAction, Step, SwapAction,
};
pub use container::{
    shared, BufferContainer, Complex, Container, ContainerRef, LiteralFile, ValueContainer,
    VariableContainer, Variables,
};
pub use error::{ActionError, ContainerError, ReferenceError};
pub use reference::{Context, Prepared, Reference};
pub use report::Report;
pub use resolver::{NamedSources, NoSources, SourceResolver};
pub use session::{Outcome, Session, SessionOptions};
pub use tagpath_query::Query;
