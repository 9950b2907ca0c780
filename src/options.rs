//! Configuration options for parsing, writing and object mapping.
//!
//! Four independent option structs cover the four operations:
//!
//! - [`ParseOptions`]: text → value tree
//! - [`WriteOptions`]: value tree → text
//! - [`SerializeOptions`]: host object → value tree
//! - [`DeserializeOptions`]: value tree → host object
//!
//! All of them follow the same builder pattern:
//!
//! ```rust
//! use jsondoc::{WriteOptions, NewlineStyle};
//!
//! let options = WriteOptions::pretty()
//!     .with_spaces(2)
//!     .with_newline(NewlineStyle::Lf);
//! ```

/// Newline convention for human-readable output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NewlineStyle {
    /// `\r\n` on Windows, `\n` elsewhere.
    #[default]
    PlatformDefault,
    Lf,
    CrLf,
}

impl NewlineStyle {
    /// Returns the newline sequence this style stands for.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NewlineStyle::PlatformDefault => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            NewlineStyle::Lf => "\n",
            NewlineStyle::CrLf => "\r\n",
        }
    }
}

/// Indentation unit for human-readable output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

/// Options for parsing JSON text into value trees.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Rewrite the four known rounded textual forms of float/double min and
    /// max values to their exact round-trippable forms. Naively stringified
    /// extreme values misround on re-parse in some runtimes; the fix is a
    /// lookup-table substitution, not a general algorithm. Default `true`.
    pub fix_rounded_float_literals: bool,
    /// Character offset where parsing starts. Supports extracting a JSON
    /// value embedded in surrounding text. Default 0.
    pub start_offset: usize,
    /// Accept non-whitespace characters after the top-level value instead of
    /// failing with `TrailingCharacters`. Default `false`.
    pub allow_trailing_characters: bool,
    /// Optional tag echoed into every error raised during this parse and
    /// inherited by the parsed containers.
    pub debug_tag: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            fix_rounded_float_literals: true,
            start_offset: 0,
            allow_trailing_characters: false,
            debug_tag: None,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fix_rounded_float_literals(mut self, fix: bool) -> Self {
        self.fix_rounded_float_literals = fix;
        self
    }

    #[must_use]
    pub fn with_start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    #[must_use]
    pub fn with_allow_trailing_characters(mut self, allow: bool) -> Self {
        self.allow_trailing_characters = allow;
        self
    }

    #[must_use]
    pub fn with_debug_tag(mut self, tag: impl Into<String>) -> Self {
        self.debug_tag = Some(tag.into());
        self
    }
}

/// Options for writing value trees as JSON text.
///
/// Compact output inserts no whitespace at all. Human-readable output breaks
/// lines after container openings and before closings, indents nested levels
/// and puts a space after each key separator; it is still spec-valid JSON.
#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    /// Escape `/` as `\/`. Some consumers embedding JSON inside `<script>`
    /// blocks require it. Default `false`.
    pub escape_forward_slashes: bool,
    /// Insert newlines and indentation. Default `false`.
    pub human_readable: bool,
    /// Indentation unit, used only in human-readable mode. Default tab.
    pub indent: Indent,
    /// Newline convention, used only in human-readable mode.
    pub newline: NewlineStyle,
}

impl WriteOptions {
    /// Compact output, no inserted whitespace. Same as `default()`.
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    /// Human-readable output with tab indentation.
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            human_readable: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_escape_forward_slashes(mut self, escape: bool) -> Self {
        self.escape_forward_slashes = escape;
        self
    }

    #[must_use]
    pub fn with_human_readable(mut self, human_readable: bool) -> Self {
        self.human_readable = human_readable;
        self
    }

    #[must_use]
    pub fn with_tab_indent(mut self) -> Self {
        self.indent = Indent::Tab;
        self
    }

    #[must_use]
    pub fn with_spaces(mut self, count: usize) -> Self {
        self.indent = Indent::Spaces(count);
        self
    }

    #[must_use]
    pub fn with_newline(mut self, newline: NewlineStyle) -> Self {
        self.newline = newline;
        self
    }
}

/// Options for serializing host objects into value trees.
#[derive(Clone, Debug, Default)]
pub struct SerializeOptions {
    /// Render non-string map keys to their text form instead of failing.
    /// Key collisions after rendering are the caller's responsibility.
    /// Default `false`.
    pub allow_non_string_map_keys: bool,
    /// Ignore the engine-level `engine_serialized`/`engine_transient` field
    /// markers, leaving only the library's own include/exclude markers and
    /// field visibility in effect. Default `false`.
    pub ignore_engine_markers: bool,
}

impl SerializeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_allow_non_string_map_keys(mut self, allow: bool) -> Self {
        self.allow_non_string_map_keys = allow;
        self
    }

    #[must_use]
    pub fn with_ignore_engine_markers(mut self, ignore: bool) -> Self {
        self.ignore_engine_markers = ignore;
        self
    }
}

/// Options for deserializing value trees into host objects.
#[derive(Clone, Debug)]
pub struct DeserializeOptions {
    /// Permit deserializing into the untyped [`Plain`](crate::Plain)
    /// representation. Default `false`.
    pub allow_untyped_fields: bool,
    /// Permit integer map keys, parsed from the object's string keys.
    /// Default `false`.
    pub allow_non_string_map_keys: bool,
    /// Same marker switch as in [`SerializeOptions`]. Default `false`.
    pub ignore_engine_markers: bool,
    /// Fail with `MissingField` when an included field has no same-named key
    /// in the source object. When `false` the field keeps its default value.
    /// Default `true`.
    pub require_all_fields_populated: bool,
    /// Fail with `UnusedValues` when source object entries remain unconsumed
    /// after all fields are populated. Checked per object, not recursively.
    /// Default `false`.
    pub require_all_values_used: bool,
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        DeserializeOptions {
            allow_untyped_fields: false,
            allow_non_string_map_keys: false,
            ignore_engine_markers: false,
            require_all_fields_populated: true,
            require_all_values_used: false,
        }
    }
}

impl DeserializeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_allow_untyped_fields(mut self, allow: bool) -> Self {
        self.allow_untyped_fields = allow;
        self
    }

    #[must_use]
    pub fn with_allow_non_string_map_keys(mut self, allow: bool) -> Self {
        self.allow_non_string_map_keys = allow;
        self
    }

    #[must_use]
    pub fn with_ignore_engine_markers(mut self, ignore: bool) -> Self {
        self.ignore_engine_markers = ignore;
        self
    }

    #[must_use]
    pub fn with_require_all_fields_populated(mut self, require: bool) -> Self {
        self.require_all_fields_populated = require;
        self
    }

    #[must_use]
    pub fn with_require_all_values_used(mut self, require: bool) -> Self {
        self.require_all_values_used = require;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let options = ParseOptions::default();
        assert!(options.fix_rounded_float_literals);
        assert_eq!(options.start_offset, 0);
        assert!(!options.allow_trailing_characters);
        assert!(options.debug_tag.is_none());
    }

    #[test]
    fn deserialize_defaults() {
        let options = DeserializeOptions::default();
        assert!(options.require_all_fields_populated);
        assert!(!options.require_all_values_used);
        assert!(!options.allow_untyped_fields);
    }

    #[test]
    fn write_builders() {
        let options = WriteOptions::pretty().with_spaces(2).with_newline(NewlineStyle::CrLf);
        assert!(options.human_readable);
        assert_eq!(options.indent, Indent::Spaces(2));
        assert_eq!(options.newline.as_str(), "\r\n");
    }
}
