//! Error types for parsing, document mutation and object mapping.
//!
//! The whole crate reports failures through the single [`Error`] enum. Each
//! variant carries the structured context needed to diagnose the failure
//! without a stack trace: parse errors carry line, column and a windowed
//! excerpt of the source text; container errors carry the offending key or
//! index; mapper errors carry field and type names.
//!
//! Containers and parse settings can carry an optional *debug tag*, a
//! caller-supplied string echoed verbatim at the end of error messages. It is
//! meant for production logs where only the message survives: tagging a
//! document with the call site that created it makes the failing document
//! identifiable later.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::{Error, JsonObject};
//!
//! let err = JsonObject::parse("{\"a\":1,}").unwrap_err();
//! assert!(matches!(err, Error::Parse { .. }));
//! assert!(err.to_string().contains("1:"));
//! ```

use std::fmt;
use thiserror::Error;

/// Parse failure subkinds, reported inside [`Error::Parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input did not begin with the expected value start.
    InvalidStart,
    /// A character that no JSON production allows at this position.
    InvalidCharacter,
    /// Input ended in the middle of a value.
    UnexpectedEnd,
    /// Non-whitespace characters remained after the top-level value.
    TrailingCharacters,
    /// Input was empty or contained only whitespace.
    EmptyInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::InvalidStart => "invalid start",
            ParseErrorKind::InvalidCharacter => "invalid character",
            ParseErrorKind::UnexpectedEnd => "unexpected end of input",
            ParseErrorKind::TrailingCharacters => "trailing characters",
            ParseErrorKind::EmptyInput => "empty input",
        };
        f.write_str(name)
    }
}

/// All failures this crate can raise.
///
/// Every variant is raised synchronously at the point of detection and never
/// retried. Mutating operations validate before touching the container, so a
/// failed operation always leaves the container unchanged.
///
/// The `tag` fields hold a pre-formatted debug tag suffix (empty when no tag
/// was set), so messages read naturally with or without one.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value of a kind that has no JSON representation.
    #[error("{what} can not be represented as a JSON value{tag}")]
    UnknownType { what: String, tag: String },

    /// Accessor or deserialize target disagrees with the actual variant.
    #[error("type mismatch{at}: expected {expected}, found {found}{tag}")]
    TypeMismatch {
        at: String,
        expected: &'static str,
        found: &'static str,
        tag: String,
    },

    /// A null value was read into a target that can not hold absence.
    #[error("value{at} is null, can not be read as {expected}{tag}")]
    NullNotAllowed {
        at: String,
        expected: &'static str,
        tag: String,
    },

    /// Numeric literal magnitude exceeds the target kind's range.
    #[error("number \"{literal}\" does not fit in {target} (range {min} to {max})")]
    Overflow {
        literal: String,
        target: &'static str,
        min: String,
        max: String,
    },

    /// Numeric literal shape is wrong for the request, for example a
    /// fractional literal read as an integer, or a malformed literal given to
    /// the number validator.
    #[error("number \"{literal}\" can not be read as {target}: {reason}")]
    Format {
        literal: String,
        target: &'static str,
        reason: String,
    },

    /// NaN or infinity given where a JSON number was required.
    #[error("can not create a JSON number from {kind} that is {what}")]
    NotFinite {
        kind: &'static str,
        what: &'static str,
    },

    /// Mutation attempted on a frozen container.
    #[error("can not {op}, this {container} is set protected (read only){tag}")]
    Protected {
        op: &'static str,
        container: &'static str,
        tag: String,
    },

    /// `add` refused to overwrite an existing key.
    #[error("key \"{key}\" already exists in this object{tag}")]
    KeyAlreadyExists { key: String, tag: String },

    /// Lookup, replace or remove addressed a key that is not present.
    #[error("key \"{key}\" does not exist in this object{tag}")]
    KeyNotFound { key: String, tag: String },

    /// Array index outside the current length.
    #[error("index {index} is out of range for array of length {len}{tag}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        tag: String,
    },

    /// Insertion or serialization would create a cycle.
    #[error("{what} would create a circular document{tag}")]
    CircularReference { what: String, tag: String },

    /// Grammar violation while parsing text, with source location and a
    /// windowed excerpt around the offending character.
    #[error("parse error ({kind}) at {line}:{col}: {msg}, near: {context}{tag}")]
    Parse {
        kind: ParseErrorKind,
        msg: String,
        line: usize,
        col: usize,
        context: String,
        tag: String,
    },

    /// Deserialize found no source entry for a required field.
    #[error("no value for field \"{field}\" when deserializing {type_name}{tag}")]
    MissingField {
        field: &'static str,
        type_name: &'static str,
        tag: String,
    },

    /// Deserialize left source entries unconsumed while
    /// `require_all_values_used` was set.
    #[error("object holds {total} values but only {used} were used deserializing {type_name}{tag}")]
    UnusedValues {
        type_name: &'static str,
        used: usize,
        total: usize,
        tag: String,
    },

    /// Free-form message, used by the serde bridge.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Fills the empty location slot of a mapper error with a field name.
    ///
    /// Leaf conversions do not know which field they are populating; the
    /// struct deserializer calls this to enrich their errors on the way up.
    pub(crate) fn at_field(self, field: &'static str) -> Self {
        let loc = format!(" at field \"{field}\"");
        match self {
            Error::TypeMismatch {
                at,
                expected,
                found,
                tag,
            } if at.is_empty() => Error::TypeMismatch {
                at: loc,
                expected,
                found,
                tag,
            },
            Error::NullNotAllowed { at, expected, tag } if at.is_empty() => Error::NullNotAllowed {
                at: loc,
                expected,
                tag,
            },
            other => other,
        }
    }
}

/// Formats an optional debug tag into the suffix form used by every tagged
/// error variant. Returns an empty string when no tag is set.
pub(crate) fn tag_suffix(tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!(" - debug tag: \"{tag}\""),
        None => String::new(),
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
