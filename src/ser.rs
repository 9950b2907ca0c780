//! JSON text generation.
//!
//! [`JsonWriter`] walks a value tree and emits pure-ASCII JSON text. Compact
//! mode inserts no whitespace at all; human-readable mode breaks lines after
//! container openings and before closings, indents nested levels and puts a
//! space after each `:`. Empty containers always come out as `{}` and `[]`,
//! in both modes.
//!
//! Writing a well-formed tree never fails, so the public entry points return
//! `String` directly.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::JsonObject;
//!
//! let obj = JsonObject::parse("{\"x\": 1}").unwrap();
//! assert_eq!(obj.to_json_string(), "{\"x\":1}");
//! assert_eq!(obj.to_pretty_string(), "{\n\t\"x\": 1\n}");
//! ```

use crate::array::JsonArray;
use crate::object::JsonObject;
use crate::options::{Indent, WriteOptions};
use crate::value::Value;

pub(crate) struct JsonWriter<'a> {
    out: String,
    options: &'a WriteOptions,
    depth: usize,
}

impl<'a> JsonWriter<'a> {
    pub(crate) fn new(options: &'a WriteOptions) -> Self {
        JsonWriter {
            out: String::new(),
            options,
            depth: 0,
        }
    }

    pub(crate) fn write(mut self, value: &Value) -> String {
        self.write_value(value);
        self.out
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => self.out.push_str(n.as_str()),
            Value::String(s) => self.write_string(s),
            Value::Array(arr) => self.write_array(arr),
            Value::Object(obj) => self.write_object(obj),
        }
    }

    fn write_object(&mut self, obj: &JsonObject) {
        let entries = obj.entries();
        if entries.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.depth += 1;
        for (index, (key, value)) in entries.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            self.break_line();
            self.write_string(key);
            self.out.push(':');
            if self.options.human_readable {
                self.out.push(' ');
            }
            self.write_value(value);
        }
        self.depth -= 1;
        self.break_line();
        self.out.push('}');
    }

    fn write_array(&mut self, arr: &JsonArray) {
        let values = arr.values();
        if values.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.depth += 1;
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            self.break_line();
            self.write_value(value);
        }
        self.depth -= 1;
        self.break_line();
        self.out.push(']');
    }

    /// In human-readable mode, starts a new line at the current depth.
    fn break_line(&mut self) {
        if !self.options.human_readable {
            return;
        }
        self.out.push_str(self.options.newline.as_str());
        match self.options.indent {
            Indent::Tab => {
                for _ in 0..self.depth {
                    self.out.push('\t');
                }
            }
            Indent::Spaces(count) => {
                for _ in 0..self.depth * count {
                    self.out.push(' ');
                }
            }
        }
    }

    /// Writes a quoted, escaped string. Everything outside printable ASCII
    /// goes out as `\uXXXX` (surrogate pairs for non-BMP characters), so the
    /// output survives any 8-bit-unclean transport.
    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '/' if self.options.escape_forward_slashes => self.out.push_str("\\/"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                ' '..='~' => self.out.push(c),
                c => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        self.out.push_str(&format!("\\u{unit:04X}"));
                    }
                }
            }
        }
        self.out.push('"');
    }
}

impl Value {
    /// Writes the tree rooted here as compact JSON text.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_json_string_with(&WriteOptions::compact())
    }

    /// Writes the tree rooted here with explicit options.
    #[must_use]
    pub fn to_json_string_with(&self, options: &WriteOptions) -> String {
        JsonWriter::new(options).write(self)
    }

    /// Writes the tree rooted here as human-readable JSON text with default
    /// formatting (tab indent, platform newline).
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        self.to_json_string_with(&WriteOptions::pretty())
    }
}

impl JsonObject {
    /// Writes this object as compact JSON text.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        Value::Object(self.clone()).to_json_string()
    }

    /// Writes this object with explicit options.
    #[must_use]
    pub fn to_json_string_with(&self, options: &WriteOptions) -> String {
        Value::Object(self.clone()).to_json_string_with(options)
    }

    /// Writes this object as human-readable JSON text.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        Value::Object(self.clone()).to_pretty_string()
    }
}

impl JsonArray {
    /// Writes this array as compact JSON text.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        Value::Array(self.clone()).to_json_string()
    }

    /// Writes this array with explicit options.
    #[must_use]
    pub fn to_json_string_with(&self, options: &WriteOptions) -> String {
        Value::Array(self.clone()).to_json_string_with(options)
    }

    /// Writes this array as human-readable JSON text.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        Value::Array(self.clone()).to_pretty_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NewlineStyle;

    #[test]
    fn compact_output_has_no_whitespace() {
        let value = Value::parse("{ \"a\" : 1 , \"b\" : [ true , null ] }").unwrap();
        assert_eq!(value.to_json_string(), "{\"a\":1,\"b\":[true,null]}");
    }

    #[test]
    fn compact_output_is_idempotent() {
        let text = "{\"a\":1,\"b\":[true,null,\"x\"]}";
        let once = Value::parse(text).unwrap().to_json_string();
        assert_eq!(once, text);
        let twice = Value::parse(&once).unwrap().to_json_string();
        assert_eq!(twice, once);
    }

    #[test]
    fn human_readable_shape() {
        let options = WriteOptions::pretty().with_newline(NewlineStyle::Lf);
        let obj = JsonObject::parse("{\"x\":1}").unwrap();
        assert_eq!(obj.to_json_string_with(&options), "{\n\t\"x\": 1\n}");
    }

    #[test]
    fn human_readable_nesting_with_spaces() {
        let options = WriteOptions::pretty()
            .with_spaces(2)
            .with_newline(NewlineStyle::Lf);
        let value = Value::parse("{\"a\":[1,2]}").unwrap();
        assert_eq!(
            value.to_json_string_with(&options),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn empty_containers_stay_tight() {
        let options = WriteOptions::pretty().with_newline(NewlineStyle::Lf);
        let value = Value::parse("{\"o\":{},\"a\":[]}").unwrap();
        assert_eq!(
            value.to_json_string_with(&options),
            "{\n\t\"o\": {},\n\t\"a\": []\n}"
        );
        assert_eq!(JsonObject::new().to_pretty_string(), "{}");
        assert_eq!(JsonArray::new().to_pretty_string(), "[]");
    }

    #[test]
    fn string_escaping_is_ascii_only() {
        let arr = JsonArray::new();
        arr.add("a\"b\\c\n\t\u{8}\u{c}\r").unwrap();
        arr.add("é€").unwrap();
        arr.add("😀").unwrap();
        assert_eq!(
            arr.to_json_string(),
            "[\"a\\\"b\\\\c\\n\\t\\b\\f\\r\",\"\\u00E9\\u20AC\",\"\\uD83D\\uDE00\"]"
        );
        assert!(arr.to_json_string().is_ascii());
    }

    #[test]
    fn forward_slash_escaping_is_optional() {
        let arr = JsonArray::new();
        arr.add("a/b").unwrap();
        assert_eq!(arr.to_json_string(), "[\"a/b\"]");
        let options = WriteOptions::compact().with_escape_forward_slashes(true);
        assert_eq!(arr.to_json_string_with(&options), "[\"a\\/b\"]");
    }

    #[test]
    fn escaped_output_parses_back() {
        let arr = JsonArray::new();
        arr.add("mixed \"quotes\" and 😀 and \u{1}").unwrap();
        let text = arr.to_json_string();
        let back = JsonArray::parse(&text).unwrap();
        assert_eq!(back, arr);
    }

    #[test]
    fn crlf_newlines() {
        let options = WriteOptions::pretty().with_newline(NewlineStyle::CrLf);
        let obj = JsonObject::parse("{\"x\":1}").unwrap();
        assert_eq!(obj.to_json_string_with(&options), "{\r\n\t\"x\": 1\r\n}");
    }

    #[test]
    fn number_literals_are_written_verbatim() {
        let text = "[1,1.0,1e2,0.10,-0,123456789012345678901234567890]";
        assert_eq!(Value::parse(text).unwrap().to_json_string(), text);
    }
}
