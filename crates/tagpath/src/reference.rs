//! Object tokens and their two-phase resolution.
//!
//! A [`Reference`] names a container plus a query inside it. Most tokens
//! resolve as soon as they are read. A few cannot: `*` waits for an outside
//! selection, `self` borrows the container of a sibling argument, and bare
//! numbers take their exact kind from the value they are about to replace.
//! Those stay pending until [`Reference::prepare`] is called with that
//! sibling as [`Context`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tagpath_literal::{parse_as, parse_with, unescape, ParseError};
use tagpath_query::Query;
use tagpath_tag::{Compound, JsonBridge, List, PrimitiveBridge, Tag, TagKind};

use crate::container::{shared, with_ref, ContainerRef, LiteralFile, ValueContainer};
use crate::error::{ContainerError, ReferenceError};
use crate::session::Session;

const COLORS: [(&str, i32); 17] = [
    ("black", 0x1E1B1B),
    ("red", 0xB3312C),
    ("green", 0x3B511A),
    ("brown", 0x51310A),
    ("blue", 0x253192),
    ("purple", 0x7B2FBE),
    ("cyan", 0x287697),
    ("lightgray", 0xABABAB),
    ("gray", 0x434343),
    ("pink", 0xD88198),
    ("lime", 0x41CC34),
    ("lightgreen", 0x41CC34),
    ("yellow", 0xDECF2A),
    ("lightblue", 0x6689D3),
    ("magenta", 0xC354CD),
    ("orange", 0xEB8844),
    ("white", 0xF0F0F0),
];

// ── Token shapes ──────────────────────────────────────────────────────────

fn hex_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#-?[0-9a-fA-F]+$").unwrap())
}

fn binary_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^b[01]+$").unwrap())
}

fn number_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-?[0-9]+|NaN|-?Infinity|-?[0-9]+\.[0-9]*)$").unwrap())
}

fn numeric_array_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let element = r"-?(?:[0-9]+|#[0-9a-fA-F]+)";
        Regex::new(&format!(r"^\[(?:{element}(?:,{element})*)?\]([bil])?$")).unwrap()
    })
}

fn suffixed_scalar_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?(?:[0-9]*\.?[0-9]+[fdFD]|[0-9]+[bsilBSIL])$").unwrap())
}

/// Strip `"..."` around a token name and unescape it.
fn token_name(text: &str) -> String {
    match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) if text.len() > 1 => unescape(inner).trim().to_string(),
        _ => text.to_string(),
    }
}

fn parse_json(text: &str) -> Result<Tag, ReferenceError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ReferenceError::Json(e.to_string()))?;
    Ok(JsonBridge.primitive_to_tag(value)?)
}

fn is_param(param: Option<&str>, names: &[&str]) -> bool {
    param.is_some_and(|p| names.iter().any(|n| p.eq_ignore_ascii_case(n)))
}

/// Scalar kind named by a parameter, with array kinds mapped to their
/// element kind.
fn scalar_kind(name: &str) -> TagKind {
    let kind = TagKind::from_name(name);
    kind.base_kind().unwrap_or(kind)
}

/// Resolve `text` under `root`, refusing anything that escapes it.
///
/// Existing files are resolved through symlinks; a file not created yet is
/// checked through its folder.
fn confined_path(root: &Path, text: &str) -> Result<PathBuf, ReferenceError> {
    let io = |path: &Path, err: std::io::Error| ContainerError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    };
    let root = root.canonicalize().map_err(|e| io(root, e))?;
    let candidate = root.join(text);
    let (Some(parent), Some(name)) = (candidate.parent(), candidate.file_name()) else {
        return Err(ReferenceError::FileAccess(text.to_string()));
    };
    let resolved = match candidate.canonicalize() {
        Ok(existing) => existing,
        // a dangling link would be followed by the first write
        Err(_) if candidate.is_symlink() => {
            return Err(ReferenceError::FileAccess(text.to_string()));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            parent.canonicalize().map_err(|e| io(parent, e))?.join(name)
        }
        Err(e) => return Err(io(&candidate, e).into()),
    };
    if !resolved.starts_with(&root) {
        return Err(ReferenceError::FileAccess(text.to_string()));
    }
    Ok(resolved)
}

// ── Reference ─────────────────────────────────────────────────────────────

/// What a pending reference still needs.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    /// A container chosen from outside (`*`).
    Selection,
    /// The sibling argument's container (`self`, `this`).
    SelfRef,
    /// A bare number whose kind comes from the sibling value.
    Numeric(String),
    /// `b0101`, kind from the sibling value.
    Binary(String),
    /// `[1,2,3]`, array kind from the sibling value.
    NumericArray(String),
}

enum State {
    Resolved { container: ContainerRef, query: Query },
    Awaiting { pending: Pending, query: Option<String> },
}

/// Sibling argument used to finish a pending reference.
#[derive(Clone)]
pub struct Context {
    pub container: ContainerRef,
    pub query: Query,
}

/// Result of [`Reference::prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prepared {
    Resolved,
    /// Call [`Reference::select`] once the container is known.
    AwaitingSelection,
}

/// A container and a query inside it, possibly not known yet.
pub struct Reference {
    object: String,
    state: State,
}

impl Reference {
    /// Read an object token and its optional parameter.
    ///
    /// Literal values resolve to read-only containers addressed at their
    /// root; the parameter then selects how the literal is read. For every
    /// other container the parameter is the query.
    pub fn new(session: &Session, object: &str, param: Option<&str>) -> Result<Self, ReferenceError> {
        let object = object.trim();
        match Self::container_for(session, object, param)? {
            Token::Value(tag) => Ok(Self::resolved(
                object,
                shared(ValueContainer::readonly(tag)),
                Query::root(),
            )),
            Token::Container(container) => Ok(Self::resolved(
                object,
                container,
                Query::parse(param.unwrap_or(""))?,
            )),
            Token::Pending(pending) => Ok(Self {
                object: object.to_string(),
                state: State::Awaiting {
                    pending,
                    query: param.map(str::to_string),
                },
            }),
        }
    }

    /// An already known container and query.
    pub fn resolved(object: &str, container: ContainerRef, query: Query) -> Self {
        Self {
            object: object.to_string(),
            state: State::Resolved { container, query },
        }
    }

    fn container_for(session: &Session, object: &str, param: Option<&str>) -> Result<Token, ReferenceError> {
        if object.is_empty() {
            return Err(ReferenceError::UndefinedObject(String::new()));
        }
        if matches!(object, "buffer" | "clipboard" | "c") {
            return Ok(Token::Container(session.buffer().clone()));
        }
        if let Some(name) = object.strip_prefix('%').filter(|n| !n.is_empty()) {
            return Ok(Token::Container(shared(session.variables().container(&token_name(name)))));
        }
        if let Some(&(_, rgb)) = COLORS.iter().find(|(name, _)| *name == object) {
            return Ok(Token::Value(Tag::Int(rgb)));
        }
        if let Some(path) = object.strip_prefix("file:").filter(|p| !p.is_empty()) {
            let path = confined_path(&session.options().file_root, &token_name(path))?;
            let file = LiteralFile::with_options(path, session.options().parse_options());
            return Ok(Token::Container(shared(file)));
        }
        let keyword = match object {
            "compound" | "com" => Some(Tag::Compound(Compound::new())),
            "list" => Some(Tag::List(List::new())),
            "on" | "true" => Some(Tag::Byte(1)),
            "off" | "false" => Some(Tag::Byte(0)),
            "null" => Some(Tag::End),
            "int[]" => Some(Tag::IntArray(Vec::new())),
            "long[]" => Some(Tag::LongArray(Vec::new())),
            "byte[]" => Some(Tag::ByteArray(Vec::new())),
            _ => None,
        };
        if let Some(tag) = keyword {
            return Ok(Token::Value(tag));
        }
        if object.len() > 1 && object.starts_with('"') && object.ends_with('"') {
            let text = unescape(&object[1..object.len() - 1]);
            let tag = match param {
                _ if is_param(param, &["json"]) => parse_json(&text)?,
                _ if is_param(param, &["literal", "mojangson", "mj"]) => {
                    parse_with(&text, &session.options().parse_options())?
                }
                Some(kind) => parse_as(TagKind::from_name(kind), &text)?,
                None => Tag::String(text),
            };
            return Ok(Token::Value(tag));
        }
        if hex_token().is_match(object) {
            let value = i64::from_str_radix(&object[1..], 16)
                .map_err(|_| ParseError::InvalidNumber(object.to_string()))?;
            let kind = param.map_or(TagKind::Int, TagKind::from_name);
            return Ok(Token::Value(parse_as(kind, &value.to_string())?));
        }
        if binary_token().is_match(object) {
            return match param {
                Some(kind) => Ok(Token::Value(binary_value(object, TagKind::from_name(kind))?)),
                None => Ok(Token::Pending(Pending::Binary(object.to_string()))),
            };
        }
        if number_token().is_match(object) {
            return match param {
                Some(kind) => Ok(Token::Value(parse_as(scalar_kind(kind), object)?)),
                None => Ok(Token::Pending(Pending::Numeric(object.to_string()))),
            };
        }
        match object {
            "*" => return Ok(Token::Pending(Pending::Selection)),
            "self" | "this" => return Ok(Token::Pending(Pending::SelfRef)),
            _ => {}
        }
        if let Some(caps) = numeric_array_token().captures(object) {
            if caps.get(1).is_none() {
                return match param {
                    Some(kind) => {
                        let kind = TagKind::from_name(kind);
                        let kind = kind.array_kind().unwrap_or(kind);
                        Ok(Token::Value(parse_as(kind, object)?))
                    }
                    None => Ok(Token::Pending(Pending::NumericArray(object.to_string()))),
                };
            }
        }
        let literal = (object.starts_with('{') && object.ends_with('}'))
            || (object.starts_with('[') && object.ends_with(']'))
            || numeric_array_token().is_match(object)
            || suffixed_scalar_token().is_match(object);
        if literal {
            let tag = if is_param(param, &["json"]) {
                parse_json(object)?
            } else {
                parse_with(object, &session.options().parse_options())?
            };
            return Ok(Token::Value(tag));
        }
        match session.resolver().resolve(object, param)? {
            Some(container) => Ok(Token::Container(container)),
            None => Err(ReferenceError::UndefinedObject(object.to_string())),
        }
    }

    /// The token this reference was read from.
    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn needs_prepare(&self) -> bool {
        matches!(self.state, State::Awaiting { .. })
    }

    pub fn is_awaiting_selection(&self) -> bool {
        matches!(
            self.state,
            State::Awaiting {
                pending: Pending::Selection,
                ..
            }
        )
    }

    /// Finish a pending reference using the sibling argument, if any.
    ///
    /// Does nothing on a resolved reference. A `*` reference stays pending
    /// and reports [`Prepared::AwaitingSelection`].
    ///
    /// # Errors
    ///
    /// [`ReferenceError::UndefinedSelf`] for `self` without a context and
    /// [`ReferenceError::UndefinedType`] when a number's kind cannot be
    /// inferred.
    pub fn prepare(&mut self, context: Option<&Context>) -> Result<Prepared, ReferenceError> {
        let State::Awaiting { pending, query } = &self.state else {
            return Ok(Prepared::Resolved);
        };
        let undefined_type = || ReferenceError::UndefinedType(self.object.clone());
        let (container, query) = match pending {
            Pending::Selection => return Ok(Prepared::AwaitingSelection),
            Pending::SelfRef => {
                let context = context.ok_or(ReferenceError::UndefinedSelf)?;
                (
                    context.container.clone(),
                    Query::parse(query.as_deref().unwrap_or(""))?,
                )
            }
            Pending::Numeric(text) => {
                let kind = element_kind(context.ok_or_else(undefined_type)?)?;
                if kind == TagKind::End {
                    return Err(undefined_type());
                }
                (value_of(parse_as(kind, text)?), Query::root())
            }
            Pending::Binary(text) => {
                let kind = element_kind(context.ok_or_else(undefined_type)?)?;
                if kind == TagKind::End {
                    return Err(undefined_type());
                }
                (value_of(binary_value(text, kind)?), Query::root())
            }
            Pending::NumericArray(text) => {
                let found = sibling_kind(context.ok_or_else(undefined_type)?)?;
                let kind = match found {
                    kind if kind.is_array() => kind,
                    kind => kind.array_kind().unwrap_or(TagKind::IntArray),
                };
                (value_of(parse_as(kind, text)?), Query::root())
            }
        };
        self.state = State::Resolved { container, query };
        Ok(Prepared::Resolved)
    }

    /// Complete a reference waiting for a selection.
    pub fn select(&mut self, container: ContainerRef) -> Result<(), ReferenceError> {
        let State::Awaiting {
            pending: Pending::Selection,
            query,
        } = &self.state
        else {
            return Err(ReferenceError::NotAwaitingSelection);
        };
        let query = Query::parse(query.as_deref().unwrap_or(""))?;
        self.state = State::Resolved { container, query };
        Ok(())
    }

    pub fn container(&self) -> Option<&ContainerRef> {
        match &self.state {
            State::Resolved { container, .. } => Some(container),
            State::Awaiting { .. } => None,
        }
    }

    pub fn query(&self) -> Option<&Query> {
        match &self.state {
            State::Resolved { query, .. } => Some(query),
            State::Awaiting { .. } => None,
        }
    }

    /// Container and query of a resolved reference.
    pub fn target(&self) -> Result<(&ContainerRef, &Query), ReferenceError> {
        match &self.state {
            State::Resolved { container, query } => Ok((container, query)),
            State::Awaiting { .. } => Err(ReferenceError::NotPrepared),
        }
    }

    /// This reference as context for its sibling.
    pub fn context(&self) -> Result<Context, ReferenceError> {
        let (container, query) = self.target()?;
        Ok(Context {
            container: container.clone(),
            query: query.clone(),
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Resolved { container, query } => {
                let label = container
                    .try_borrow()
                    .map(|c| c.label())
                    .unwrap_or_else(|_| self.object.clone());
                if query.is_empty() {
                    write!(f, "{label}")
                } else {
                    write!(f, "{label} {query}")
                }
            }
            State::Awaiting { query: Some(q), .. } => write!(f, "{} {q}", self.object),
            State::Awaiting { query: None, .. } => write!(f, "{}", self.object),
        }
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("object", &self.object)
            .field("resolved", &!self.needs_prepare())
            .finish()
    }
}

enum Token {
    Value(Tag),
    Container(ContainerRef),
    Pending(Pending),
}

fn value_of(tag: Tag) -> ContainerRef {
    shared(ValueContainer::readonly(tag))
}

fn binary_value(text: &str, kind: TagKind) -> Result<Tag, ReferenceError> {
    let value = i64::from_str_radix(&text[1..], 2)
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))?;
    Ok(parse_as(kind, &value.to_string())?)
}

/// Kind of the value the sibling addresses, `End` when there is none.
fn sibling_kind(context: &Context) -> Result<TagKind, ReferenceError> {
    let tag = with_ref(&context.container, |c| c.get_tag_at(&context.query))?;
    Ok(tag.map_or(TagKind::End, |t| t.kind()))
}

/// Scalar kind for a number replacing the sibling value.
///
/// Array kinds give their element kind. When the sibling does not exist
/// yet, the element kind of an enclosing list is used.
fn element_kind(context: &Context) -> Result<TagKind, ReferenceError> {
    let kind = sibling_kind(context)?;
    let kind = kind.base_kind().unwrap_or(kind);
    if kind != TagKind::End {
        return Ok(kind);
    }
    let Some(parent) = context.query.parent() else {
        return Ok(TagKind::End);
    };
    let tag = with_ref(&context.container, |c| c.get_tag_at(&parent))?;
    Ok(match tag {
        Some(Tag::List(list)) => list.elem_kind(),
        _ => TagKind::End,
    })
}
