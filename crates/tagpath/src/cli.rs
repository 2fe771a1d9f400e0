//! Core logic of the `tagpath` binary.
//!
//! Every command reads one document in literal text (or JSON for
//! `from-json`) and returns the text to print:
//! - `get <path>`: the value at `path`
//! - `set <path> <value> [kind]`: the document with `path` set to `value`
//! - `remove <path>`: the document without `path`
//! - `rename <path> <name>`: the document with `path` renamed
//! - `json [path]`: the value at `path` as JSON
//! - `from-json`: a JSON document as literal text
//!
//! `set` reads `value` as an object token, so a bare number takes the kind
//! of the value it replaces.

use serde_json::Value as Json;
use tagpath_literal::{parse, ParseError};
use tagpath_query::{Query, QueryError};
use tagpath_tag::{JsonBridge, PrimitiveBridge, Tag, TagError};

use crate::action::{Action, CutAction, EditAction, RenameAction};
use crate::container::{shared, ContainerRef, ValueContainer};
use crate::error::{ActionError, ContainerError, ReferenceError};
use crate::resolver::NamedSources;
use crate::session::{Outcome, Session};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Parse(ParseError),
    Query(QueryError),
    Tag(TagError),
    Reference(ReferenceError),
    Action(ActionError),
    Container(ContainerError),
    Json(serde_json::Error),
    /// The command used `*`, which needs an interactive selection.
    Interactive,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e)     => write!(f, "{e}"),
            CliError::Query(e)     => write!(f, "{e}"),
            CliError::Tag(e)       => write!(f, "{e}"),
            CliError::Reference(e) => write!(f, "{e}"),
            CliError::Action(e)    => write!(f, "{e}"),
            CliError::Container(e) => write!(f, "{e}"),
            CliError::Json(e)      => write!(f, "{e}"),
            CliError::Interactive  => write!(f, "selections are not available here"),
        }
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self { CliError::Parse(e) }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self { CliError::Query(e) }
}

impl From<TagError> for CliError {
    fn from(e: TagError) -> Self { CliError::Tag(e) }
}

impl From<ReferenceError> for CliError {
    fn from(e: ReferenceError) -> Self { CliError::Reference(e) }
}

impl From<ActionError> for CliError {
    fn from(e: ActionError) -> Self { CliError::Action(e) }
}

impl From<ContainerError> for CliError {
    fn from(e: ContainerError) -> Self { CliError::Container(e) }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Json(e) }
}

// ── Helpers ───────────────────────────────────────────────────────────────

/// Name of the input document among the session's sources.
pub const DOCUMENT: &str = "doc";

fn load(doc: &str) -> Result<Tag, CliError> {
    if doc.trim().is_empty() {
        return Ok(Tag::End);
    }
    Ok(parse(doc)?)
}

/// Run `build`'s action against `doc` and return the resulting document.
fn edit_document<A, F>(doc: &str, build: F) -> Result<String, CliError>
where
    A: Action + 'static,
    F: FnOnce(&Session) -> Result<A, CliError>,
{
    let root: ContainerRef = shared(ValueContainer::new(load(doc)?));
    let mut session = Session::with_resolver(NamedSources::new().with(DOCUMENT, root.clone()));
    let action = build(&session)?;
    match session.run(action)? {
        Outcome::Done(_) => {}
        Outcome::Awaiting => return Err(CliError::Interactive),
    }
    let tag = root.borrow().read_tag()?;
    Ok(tag.map(|t| t.to_string()).unwrap_or_default())
}

// ── Commands ──────────────────────────────────────────────────────────────

/// The value at `path`, in literal text.
pub fn lookup_path(doc: &str, path: &str) -> Result<String, CliError> {
    let root = load(doc)?;
    let query = Query::parse(path)?;
    Ok(query.get(&root)?.to_string())
}

/// Set `path` to the object token `value`, read with `kind` as parameter.
pub fn set_path(doc: &str, path: &str, value: &str, kind: Option<&str>) -> Result<String, CliError> {
    edit_document(doc, |session| {
        let target = session.reference(DOCUMENT, Some(path))?;
        let source = session.reference(value, kind)?;
        Ok(EditAction::new(target, source))
    })
}

pub fn remove_path(doc: &str, path: &str) -> Result<String, CliError> {
    edit_document(doc, |session| {
        Ok(CutAction::new(session.reference(DOCUMENT, Some(path))?))
    })
}

pub fn rename_path(doc: &str, path: &str, name: &str) -> Result<String, CliError> {
    edit_document(doc, |session| {
        let source = session.reference(DOCUMENT, Some(path))?;
        Ok(RenameAction::new(source, name)?)
    })
}

/// The value at `path` as pretty-printed JSON. `null` when there is none.
pub fn to_json(doc: &str, path: &str) -> Result<String, CliError> {
    let root = load(doc)?;
    let query = Query::parse(path)?;
    let value = match query.get(&root) {
        Ok(tag) => JsonBridge.tag_to_primitive(tag).unwrap_or(Json::Null),
        Err(e) if e.is_not_found() => Json::Null,
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// A JSON document in literal text.
pub fn from_json(json: &str) -> Result<String, CliError> {
    let value: Json = serde_json::from_str(json)?;
    Ok(JsonBridge.primitive_to_tag(value)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_infers_number_kinds() {
        let out = set_path("{a:1s,b:[1.5d]}", "a", "7", None).unwrap();
        assert_eq!(out, "{a:7s,b:[1.5d]}");
        let out = set_path("{a:1s,b:[1.5d]}", "b[1]", "2", None).unwrap();
        assert_eq!(out, "{a:1s,b:[1.5d,2d]}");
        let out = set_path("{}", "x.y", "5", Some("long")).unwrap();
        assert_eq!(out, "{x:{y:5l}}");
    }

    #[test]
    fn remove_and_rename() {
        assert_eq!(remove_path("{a:1,b:2}", "a").unwrap(), "{b:2}");
        assert!(matches!(
            remove_path("{a:1}", "b"),
            Err(CliError::Action(ActionError::NoValue(_)))
        ));
        assert_eq!(rename_path("{a:{b:1}}", "a.b", "c").unwrap(), "{a:{c:1}}");
    }

    #[test]
    fn selections_are_refused() {
        assert!(matches!(set_path("{a:1}", "a", "*", None), Err(CliError::Interactive)));
    }

    #[test]
    fn json_views() {
        assert_eq!(to_json("{a:[1b,2b]}", "a[1]").unwrap(), "2");
        assert_eq!(to_json("{a:1}", "b").unwrap(), "null");
        assert_eq!(from_json(r#"{"k":[true,null,false]}"#).unwrap(), "{k:[1b,0b]}");
    }
}
