//! Typed tag trees.
//!
//! A tree is built from thirteen kinds of [`Tag`]: an `End` marker for
//! "no value", six numeric scalars, strings, three numeric arrays, the
//! homogeneous [`List`] and the keyed [`Compound`].
//!
//! Host data enters a tree as a [`Primitive`] and is always deep-copied;
//! reads hand out borrowed [`Value`] views. Every tree renders to canonical
//! literal text through `Display`.
//!
//! # Example
//!
//! ```
//! use tagpath_tag::{Compound, Tag, TagKind};
//!
//! let mut root = Compound::new();
//! root.put("name", "stone").unwrap();
//! root.put("count", 64i8).unwrap();
//! root.list("lore").unwrap().add("shiny").unwrap();
//!
//! assert_eq!(root.get_int("count"), 64);
//! assert!(root.contains_key_kind("lore", TagKind::List));
//! assert_eq!(
//!     Tag::from(root).to_string(),
//!     r#"{name:"stone",count:64b,lore:["shiny"]}"#
//! );
//! ```

pub mod bridge;
pub mod compound;
pub mod error;
pub mod format;
pub mod kind;
pub mod list;
pub mod primitive;
pub mod tag;
pub mod value;

pub use bridge::{HostBridge, JsonBridge, PrimitiveBridge};
pub use compound::Compound;
pub use error::TagError;
pub use format::{is_plain_key, quote, write_quoted};
pub use kind::TagKind;
pub use list::List;
pub use primitive::Primitive;
pub use tag::Tag;
pub use value::Value;
