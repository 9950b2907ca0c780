//! # jsondoc
//!
//! A JSON document library built around guarded, shared, mutable value trees.
//!
//! ## Why another JSON crate?
//!
//! Most Rust JSON libraries are transport-oriented: text goes in, typed data
//! comes out, and the tree in between is a throwaway. `jsondoc` is
//! document-oriented instead. The tree is the product: code builds it up over
//! time, hands shared handles to it across subsystems, freezes it against
//! further edits, and only then turns it into text. That workflow needs
//! guarantees transport crates do not give:
//!
//! - **Guarded mutation**: duplicate keys, edits to frozen documents and
//!   cycle-forming insertions are rejected up front, and a failed operation
//!   never leaves a container half-changed.
//! - **Verbatim numbers**: numeric literals are stored as the exact text they
//!   were written with, so `1.0`, `1e2` and a 40-digit integer all survive a
//!   parse/write round trip byte for byte.
//! - **One-way protection**: [`JsonObject::set_protected`] recursively
//!   freezes a subtree for handing out read-only views of shared state.
//! - **Diagnosable failures**: parse errors carry line, column and a source
//!   excerpt; container errors carry the key or index; every error can echo a
//!   caller-supplied debug tag identifying the document in production logs.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsondoc::{JsonObject, json};
//!
//! // Parse text into a document.
//! let obj = JsonObject::parse("{\"name\":\"Alice\",\"score\":120}").unwrap();
//! assert_eq!(obj.get_string("name").unwrap(), Some("Alice".to_string()));
//!
//! // Build a document with the json! macro.
//! let config = json!({
//!     "resolution": [1920, 1080],
//!     "fullscreen": true
//! });
//!
//! // Edit, then freeze.
//! obj.add("active", true).unwrap();
//! obj.set_protected();
//! assert!(obj.add("more", 1).is_err());
//!
//! // Write compact or human-readable text.
//! assert_eq!(config.to_json_string(),
//!     "{\"resolution\":[1920,1080],\"fullscreen\":true}");
//! ```
//!
//! ## Mapping structs
//!
//! Rust has no runtime reflection, so struct mapping works from explicit
//! field registrations written with the [`reflect!`] macro:
//!
//! ```rust
//! use jsondoc::{reflect, serialize, JsonObject};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct SaveGame {
//!     level: u32,
//!     health: f64,
//!     inventory: Vec<String>,
//! }
//!
//! reflect! {
//!     SaveGame {
//!         level: u32 => public,
//!         health: f64 => public,
//!         inventory: Vec<String> => public,
//!     }
//! }
//!
//! let save = SaveGame { level: 3, health: 72.5, inventory: vec!["axe".into()] };
//! let obj = serialize(&save).unwrap();
//! let restored: SaveGame = obj.deserialize().unwrap();
//! assert_eq!(restored, save);
//! ```
//!
//! ## Serde interop
//!
//! [`Value`] implements `Serialize` and `Deserialize`, so document trees pass
//! through any serde-based pipeline:
//!
//! ```rust
//! use jsondoc::Value;
//!
//! let value = Value::parse("{\"a\":[1,2]}").unwrap();
//! let via_serde = serde_json::to_string(&value).unwrap();
//! assert_eq!(via_serde, "{\"a\":[1,2]}");
//! ```
//!
//! ## Concurrency
//!
//! Documents are deliberately single-threaded: container handles are
//! `Rc`-based and `!Send`. Cross-thread transfer goes through text or through
//! the owned [`Plain`] representation.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API; every failure is a [`Result`] carrying a
//!   structured [`Error`]
//! - A failed mutation leaves its container unchanged

pub mod array;
pub mod error;
pub mod macros;
pub mod mapper;
pub mod number;
pub mod object;
pub mod options;
pub mod parser;
pub mod reflect;
pub mod ser;
pub mod value;

mod scanner;

pub use array::JsonArray;
pub use error::{Error, ParseErrorKind, Result};
pub use mapper::{
    deserialize_struct, from_value, from_value_with, serialize, serialize_struct, serialize_with,
    to_value, to_value_with,
};
pub use number::Number;
pub use object::JsonObject;
pub use options::{
    DeserializeOptions, Indent, NewlineStyle, ParseOptions, SerializeOptions, WriteOptions,
};
pub use reflect::{CycleGuard, Field, FieldMarkers, FromJson, Introspect, MapKey, ToJson};
pub use value::{IntoValue, Plain, Value};
