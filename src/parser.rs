//! Recursive-descent JSON parser.
//!
//! The grammar is strict JSON: no comments, no trailing commas, no single
//! quotes, no unquoted keys, case-sensitive `true`/`false`/`null`. Numbers
//! are captured as verbatim literal substrings and never narrowed during
//! parsing. Failures carry the parse error kind, 1-based line, 0-based
//! column, a windowed excerpt of the source and the optional debug tag from
//! [`ParseOptions`].
//!
//! Parsing entry points live on the value types:
//! [`Value::parse`], [`JsonObject::parse`], [`JsonArray::parse`] and
//! [`JsonObject::parse_multiple`], each with a `_with` variant taking
//! explicit options.

use crate::array::JsonArray;
use crate::error::{Error, ParseErrorKind, Result};
use crate::number::Number;
use crate::object::JsonObject;
use crate::options::ParseOptions;
use crate::scanner::Scanner;
use crate::value::Value;

/// The four rounded min/max float renderings some runtimes produce, paired
/// with the exact forms that survive a parse round-trip. Applied after
/// normalizing `e` to `E`.
const ROUNDED_LITERAL_FIXES: [(&str, &str); 4] = [
    ("3.402823E+38", "3.40282347E+38"),
    ("-3.402823E+38", "-3.40282347E+38"),
    ("1.79769313486232E+308", "1.7976931348623157E+308"),
    ("-1.79769313486232E+308", "-1.7976931348623157E+308"),
];

pub(crate) struct ParseRunner {
    scanner: Scanner,
    fix_rounded: bool,
    allow_trailing: bool,
    debug_tag: Option<String>,
}

impl ParseRunner {
    pub(crate) fn new(source: &str, options: &ParseOptions) -> Self {
        ParseRunner {
            scanner: Scanner::new(source, options.start_offset, options.debug_tag.as_deref()),
            fix_rounded: options.fix_rounded_float_literals,
            allow_trailing: options.allow_trailing_characters,
            debug_tag: options.debug_tag.clone(),
        }
    }

    /// Parses one complete top-level value and checks what follows it.
    pub(crate) fn parse_root(&mut self) -> Result<Value> {
        let first = self.first_char()?;
        let value = self.parse_value(first)?;
        self.check_trailing()?;
        Ok(value)
    }

    /// Like [`parse_root`](Self::parse_root) but requires a specific opening
    /// character, for the typed object/array entry points.
    pub(crate) fn parse_root_expecting(&mut self, open: char, kind: &str) -> Result<Value> {
        let first = self.first_char()?;
        if first != open {
            return Err(self.scanner.error(
                ParseErrorKind::InvalidStart,
                format!("expected {kind} to start with '{open}', got '{first}' instead"),
            ));
        }
        let value = self.parse_value(first)?;
        self.check_trailing()?;
        Ok(value)
    }

    /// Parses every object literal in the input, in order. With trailing
    /// characters allowed, text between objects is skipped; otherwise only
    /// whitespace may separate them.
    pub(crate) fn parse_all_objects(&mut self) -> Result<Vec<JsonObject>> {
        if !self.scanner.contains_non_white() {
            return Err(self.scanner.error(
                ParseErrorKind::EmptyInput,
                "input is empty or contains only whitespace".to_string(),
            ));
        }
        let mut objects = Vec::new();
        loop {
            let Some(c) = self.scanner.try_next_non_white() else {
                break;
            };
            if c != '{' {
                if self.allow_trailing {
                    continue;
                }
                return Err(self.scanner.error(
                    ParseErrorKind::TrailingCharacters,
                    format!("expected '{{' to start an object, got '{c}' instead"),
                ));
            }
            let obj = self.parse_object()?;
            if let Some(tag) = &self.debug_tag {
                obj.set_debug_tag(format!("{tag} [{}]", objects.len()));
            }
            objects.push(obj);
        }
        Ok(objects)
    }

    fn first_char(&mut self) -> Result<char> {
        if !self.scanner.contains_non_white() {
            return Err(self.scanner.error(
                ParseErrorKind::EmptyInput,
                "input is empty or contains only whitespace".to_string(),
            ));
        }
        self.scanner.next_non_white()
    }

    fn check_trailing(&mut self) -> Result<()> {
        if self.allow_trailing {
            return Ok(());
        }
        if let Some(c) = self.scanner.try_next_non_white() {
            return Err(self.scanner.error(
                ParseErrorKind::TrailingCharacters,
                format!("unexpected character '{c}' after the top-level value"),
            ));
        }
        Ok(())
    }

    /// Dispatches on the first character of a value, already consumed.
    fn parse_value(&mut self, first: char) -> Result<Value> {
        match first {
            '{' => Ok(Value::Object(self.parse_object()?)),
            '[' => Ok(Value::Array(self.parse_array()?)),
            '"' => Ok(Value::String(self.parse_string_body()?)),
            '-' | '0'..='9' => Ok(Value::Number(self.parse_number(first)?)),
            't' => self.parse_literal("rue", Value::Bool(true), "true"),
            'f' => self.parse_literal("alse", Value::Bool(false), "false"),
            'n' => self.parse_literal("ull", Value::Null, "null"),
            other => Err(self.scanner.error(
                ParseErrorKind::InvalidCharacter,
                format!("character '{other}' can not start a JSON value"),
            )),
        }
    }

    fn parse_literal(&mut self, tail: &str, value: Value, name: &str) -> Result<Value> {
        if self.scanner.expect_literal(tail)? {
            Ok(value)
        } else {
            Err(self.scanner.error(
                ParseErrorKind::InvalidCharacter,
                format!("invalid literal, expected \"{name}\""),
            ))
        }
    }

    /// Parses an object body. The opening `{` is already consumed.
    fn parse_object(&mut self) -> Result<JsonObject> {
        let obj = JsonObject::new();
        let mut c = self.scanner.next_non_white()?;
        if c == '}' {
            return Ok(obj);
        }
        loop {
            if c != '"' {
                return Err(self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("expected '\"' to start an object key, got '{c}' instead"),
                ));
            }
            let key = self.parse_string_body()?;
            let sep = self.scanner.next_non_white()?;
            if sep != ':' {
                return Err(self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("expected ':' after object key, got '{sep}' instead"),
                ));
            }
            let first = self.scanner.next_non_white()?;
            let value = self.parse_value(first)?;
            obj.add(key, value)?;
            match self.scanner.next_non_white()? {
                ',' => c = self.scanner.next_non_white()?,
                '}' => return Ok(obj),
                other => {
                    return Err(self.scanner.error(
                        ParseErrorKind::InvalidCharacter,
                        format!("expected ',' or '}}' after object value, got '{other}' instead"),
                    ))
                }
            }
        }
    }

    /// Parses an array body. The opening `[` is already consumed.
    fn parse_array(&mut self) -> Result<JsonArray> {
        let arr = JsonArray::new();
        let mut first = self.scanner.next_non_white()?;
        if first == ']' {
            return Ok(arr);
        }
        loop {
            let value = self.parse_value(first)?;
            arr.add(value)?;
            match self.scanner.next_non_white()? {
                ',' => first = self.scanner.next_non_white()?,
                ']' => return Ok(arr),
                other => {
                    return Err(self.scanner.error(
                        ParseErrorKind::InvalidCharacter,
                        format!("expected ',' or ']' after array value, got '{other}' instead"),
                    ))
                }
            }
        }
    }

    /// Parses a string body. The opening `"` is already consumed.
    fn parse_string_body(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            let c = self.scanner.next()?;
            match c {
                '"' => return Ok(out),
                '\\' => out.push(self.parse_escape()?),
                c if (c as u32) < 32 => {
                    return Err(self.scanner.error(
                        ParseErrorKind::InvalidCharacter,
                        format!("unescaped control character (0x{:02X}) in string", c as u32),
                    ))
                }
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let c = self.scanner.next()?;
        Ok(match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.parse_unicode_escape(),
            other => {
                return Err(self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("invalid escape sequence \"\\{other}\""),
                ))
            }
        })
    }

    /// Parses the four hex digits after `\u`, combining surrogate pairs.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let unit = self.parse_hex4()?;
        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(self.scanner.error(
                ParseErrorKind::InvalidCharacter,
                format!("unexpected low surrogate \\u{unit:04X} without a preceding high surrogate"),
            ));
        }
        if (0xD800..=0xDBFF).contains(&unit) {
            // High surrogate, must pair with a following \uXXXX low surrogate.
            if self.scanner.next()? != '\\' || self.scanner.next()? != 'u' {
                return Err(self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("high surrogate \\u{unit:04X} not followed by a \\u escape"),
                ));
            }
            let low = self.parse_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("high surrogate \\u{unit:04X} followed by non-surrogate \\u{low:04X}"),
                ));
            }
            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code).ok_or_else(|| {
                self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("surrogate pair decodes to invalid code point {code:#X}"),
                )
            });
        }
        char::from_u32(unit).ok_or_else(|| {
            self.scanner.error(
                ParseErrorKind::InvalidCharacter,
                format!("\\u{unit:04X} is not a valid character"),
            )
        })
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            let c = self.scanner.next()?;
            let digit = c.to_digit(16).ok_or_else(|| {
                self.scanner.error(
                    ParseErrorKind::InvalidCharacter,
                    format!("invalid hex digit '{c}' in \\u escape"),
                )
            })?;
            unit = (unit << 4) | digit;
        }
        Ok(unit)
    }

    /// Scans a number literal. The first character is already consumed.
    ///
    /// The state machine mirrors the strict JSON number grammar. Any
    /// non-number character in an accepting state terminates the literal and
    /// is pushed back for the caller; end of input in an accepting state is a
    /// valid terminator too.
    fn parse_number(&mut self, first: char) -> Result<Number> {
        let start = self.scanner.index() - 1;
        let mut state: u8 = match first {
            '-' => 2,
            '0' => 3,
            _ => 4,
        };
        // Accepting states: 3 (lone zero), 4 (integer digits), 6 (fraction
        // digits), 9 (exponent digits).
        loop {
            let Some(c) = self.scanner.try_next() else {
                if matches!(state, 3 | 4 | 6 | 9) {
                    break;
                }
                return Err(self.scanner.error(
                    ParseErrorKind::UnexpectedEnd,
                    "input ended in the middle of a number".to_string(),
                ));
            };
            state = match state {
                // After minus: need the first digit.
                2 => match c {
                    '0' => 3,
                    '1'..='9' => 4,
                    _ => {
                        return Err(self.number_error(format!(
                            "expecting at least one digit after minus sign, got '{c}' instead"
                        )))
                    }
                },
                // After a leading zero.
                3 => match c {
                    '.' => 5,
                    'e' | 'E' => 7,
                    '0'..='9' => {
                        return Err(self
                            .number_error("leading zeros are not allowed in numbers".to_string()))
                    }
                    _ => {
                        self.scanner.step_back();
                        break;
                    }
                },
                // Integer digits.
                4 => match c {
                    '.' => 5,
                    'e' | 'E' => 7,
                    '0'..='9' => 4,
                    _ => {
                        self.scanner.step_back();
                        break;
                    }
                },
                // Need at least one digit after the decimal point.
                5 => match c {
                    '0'..='9' => 6,
                    _ => {
                        return Err(self.number_error(format!(
                            "need at least one digit after decimal point, got '{c}' instead"
                        )))
                    }
                },
                // Fraction digits.
                6 => match c {
                    'e' | 'E' => 7,
                    '0'..='9' => 6,
                    _ => {
                        self.scanner.step_back();
                        break;
                    }
                },
                // After E: sign or digit.
                7 => match c {
                    '+' | '-' => 8,
                    '0'..='9' => 9,
                    _ => {
                        return Err(self.number_error(format!(
                            "expecting digit or plus/minus sign after E/e, got '{c}' instead"
                        )))
                    }
                },
                // Need at least one digit after the exponent sign.
                8 => match c {
                    '0'..='9' => 9,
                    _ => {
                        return Err(self.number_error(format!(
                            "expecting digit after plus/minus sign after E/e, got '{c}' instead"
                        )))
                    }
                },
                // Exponent digits.
                _ => match c {
                    '0'..='9' => 9,
                    _ => {
                        self.scanner.step_back();
                        break;
                    }
                },
            };
        }
        let mut literal = self.scanner.substring_from(start);
        if self.fix_rounded {
            literal = fix_rounded_literal(literal);
        }
        Ok(Number::from_validated(literal))
    }

    fn number_error(&self, msg: String) -> Error {
        self.scanner.error(ParseErrorKind::InvalidCharacter, msg)
    }
}

/// Rewrites the four known rounded float min/max renderings to their exact
/// forms, leaving every other literal untouched.
fn fix_rounded_literal(literal: String) -> String {
    if !literal.contains('e') && !literal.contains('E') {
        return literal;
    }
    let normalized = literal.replace('e', "E");
    for (rounded, exact) in ROUNDED_LITERAL_FIXES {
        if normalized == rounded {
            return exact.to_string();
        }
    }
    literal
}

fn root_tag(value: &Value, options: &ParseOptions) {
    if let Some(tag) = &options.debug_tag {
        match value {
            Value::Object(obj) => obj.set_debug_tag(tag.clone()),
            Value::Array(arr) => arr.set_debug_tag(tag.clone()),
            _ => {}
        }
    }
}

impl Value {
    /// Parses a JSON text into a value tree with default options.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] describing the first grammar violation, including
    /// `EmptyInput` for empty or whitespace-only input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondoc::Value;
    ///
    /// let value = Value::parse("[1,2,3]").unwrap();
    /// assert!(value.is_array());
    /// ```
    pub fn parse(text: &str) -> Result<Value> {
        Value::parse_with(text, &ParseOptions::default())
    }

    /// Parses a JSON text into a value tree with explicit options.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
        let value = ParseRunner::new(text, options).parse_root()?;
        root_tag(&value, options);
        Ok(value)
    }
}

impl JsonObject {
    /// Parses a JSON text whose top-level value is an object.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with kind `InvalidStart` when the first non-white
    /// character is not `{`, or any other parse failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondoc::JsonObject;
    ///
    /// let obj = JsonObject::parse("{\"a\": 1}").unwrap();
    /// assert_eq!(obj.get_i64("a").unwrap(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<JsonObject> {
        JsonObject::parse_with(text, &ParseOptions::default())
    }

    /// Parses a top-level object with explicit options.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<JsonObject> {
        let value = ParseRunner::new(text, options).parse_root_expecting('{', "object")?;
        root_tag(&value, options);
        match value {
            Value::Object(obj) => Ok(obj),
            _ => unreachable!("root was checked to start with '{{'"),
        }
    }

    /// Parses every object literal in the input, in order, with default
    /// options. Useful for concatenated or line-delimited object streams.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for empty input, `TrailingCharacters` for text between
    /// objects (unless allowed by options), or any other parse failure.
    pub fn parse_multiple(text: &str) -> Result<Vec<JsonObject>> {
        JsonObject::parse_multiple_with(text, &ParseOptions::default())
    }

    /// Parses every object literal in the input with explicit options. Each
    /// parsed object inherits the debug tag suffixed with its index.
    pub fn parse_multiple_with(text: &str, options: &ParseOptions) -> Result<Vec<JsonObject>> {
        ParseRunner::new(text, options).parse_all_objects()
    }
}

impl JsonArray {
    /// Parses a JSON text whose top-level value is an array.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with kind `InvalidStart` when the first non-white
    /// character is not `[`, or any other parse failure.
    pub fn parse(text: &str) -> Result<JsonArray> {
        JsonArray::parse_with(text, &ParseOptions::default())
    }

    /// Parses a top-level array with explicit options.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<JsonArray> {
        let value = ParseRunner::new(text, options).parse_root_expecting('[', "array")?;
        root_tag(&value, options);
        match value {
            Value::Array(arr) => Ok(arr),
            _ => unreachable!("root was checked to start with '['"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn parses_all_value_kinds() {
        let obj = JsonObject::parse(
            "{\"s\":\"text\",\"n\":-12.5e3,\"b\":true,\"f\":false,\"z\":null,\"a\":[1,2],\"o\":{}}",
        )
        .unwrap();
        assert_eq!(obj.get_string("s").unwrap(), Some("text".to_string()));
        assert_eq!(obj.get_number("n").unwrap().as_str(), "-12.5e3");
        assert!(obj.get_bool("b").unwrap());
        assert!(!obj.get_bool("f").unwrap());
        assert!(obj.is_null("z").unwrap());
        assert_eq!(obj.get_array("a").unwrap().unwrap().len(), 2);
        assert!(obj.get_object("o").unwrap().unwrap().is_empty());
    }

    #[test]
    fn empty_input_fails() {
        for text in ["", "   ", "\t\r\n"] {
            let err = Value::parse(text).unwrap_err();
            assert!(matches!(
                err,
                Error::Parse {
                    kind: ParseErrorKind::EmptyInput,
                    ..
                }
            ));
        }
    }

    #[test]
    fn trailing_characters() {
        let err = Value::parse("{} x").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                kind: ParseErrorKind::TrailingCharacters,
                ..
            }
        ));
        let options = ParseOptions::new().with_allow_trailing_characters(true);
        assert!(Value::parse_with("{} x", &options).is_ok());
        // Trailing whitespace is always fine.
        assert!(Value::parse("{}  \n").is_ok());
    }

    #[test]
    fn typed_roots_check_the_opening_character() {
        assert!(matches!(
            JsonObject::parse("[1]"),
            Err(Error::Parse {
                kind: ParseErrorKind::InvalidStart,
                ..
            })
        ));
        assert!(matches!(
            JsonArray::parse("{\"a\":1}"),
            Err(Error::Parse {
                kind: ParseErrorKind::InvalidStart,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_keys_fail() {
        let err = JsonObject::parse("{\"k\":1,\"k\":2}").unwrap_err();
        assert!(matches!(err, Error::KeyAlreadyExists { .. }));
    }

    #[test]
    fn literals_are_case_sensitive() {
        for text in ["True", "FALSE", "NULL", "nULL"] {
            assert!(Value::parse(text).is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn number_literal_is_kept_verbatim() {
        let arr = JsonArray::parse("[1, 1.0, 1e2, 0.10, -0]").unwrap();
        let literals: Vec<String> = (0..arr.len())
            .map(|i| arr.get_number(i).unwrap().as_str().to_string())
            .collect();
        assert_eq!(literals, ["1", "1.0", "1e2", "0.10", "-0"]);
    }

    #[test]
    fn malformed_numbers() {
        for text in ["[01]", "[-]", "[1.]", "[1e]", "[1e+]", "[.5]", "[+1]"] {
            assert!(Value::parse(text).is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn top_level_scalars() {
        assert_eq!(Value::parse("5").unwrap(), Value::from(5));
        assert_eq!(Value::parse(" -2.5 ").unwrap().to_json_string(), "-2.5");
        assert_eq!(Value::parse("\"s\"").unwrap(), Value::from("s"));
        assert_eq!(Value::parse("null").unwrap(), Value::Null);
    }

    #[test]
    fn string_escapes_decode() {
        let value = Value::parse(r#""a\"b\\c\/d\b\f\n\r\te""#).unwrap();
        assert_eq!(value.as_str().unwrap(), "a\"b\\c/d\u{8}\u{c}\n\r\te");
        let value = Value::parse(r#""\u00e9\u20AC""#).unwrap();
        assert_eq!(value.as_str().unwrap(), "é€");
    }

    #[test]
    fn surrogate_pairs_combine() {
        let value = Value::parse(r#""\uD83D\uDE00""#).unwrap();
        assert_eq!(value.as_str().unwrap(), "😀");
        for text in [r#""\uD83D""#, r#""\uD83Dx""#, r#""\uDE00""#, r#""\uD83D\u0041""#] {
            assert!(Value::parse(text).is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn invalid_escape_and_control_characters() {
        assert!(Value::parse(r#""\q""#).is_err());
        assert!(Value::parse("\"a\nb\"").is_err());
        assert!(Value::parse(r#""\u12g4""#).is_err());
    }

    #[test]
    fn unterminated_input() {
        for text in ["{\"a\":1", "[1,", "\"abc", "[tru", "{\"a\""] {
            let err = Value::parse(text).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Parse {
                        kind: ParseErrorKind::UnexpectedEnd,
                        ..
                    } | Error::Parse {
                        kind: ParseErrorKind::InvalidCharacter,
                        ..
                    }
                ),
                "{text} gave {err}"
            );
        }
    }

    #[test]
    fn rounded_min_max_literals_are_fixed() {
        let arr = JsonArray::parse("[3.402823E+38, -3.402823e+38, 1.79769313486232E+308]").unwrap();
        assert_eq!(arr.get_number(0).unwrap().as_str(), "3.40282347E+38");
        assert_eq!(arr.get_number(1).unwrap().as_str(), "-3.40282347E+38");
        assert_eq!(
            arr.get_number(2).unwrap().as_str(),
            "1.7976931348623157E+308"
        );

        let options = ParseOptions::new().with_fix_rounded_float_literals(false);
        let arr = JsonArray::parse_with("[3.402823E+38]", &options).unwrap();
        assert_eq!(arr.get_number(0).unwrap().as_str(), "3.402823E+38");
    }

    #[test]
    fn start_offset_skips_a_prefix() {
        let options = ParseOptions::new().with_start_offset(8);
        let obj = JsonObject::parse_with("PREFIX: {\"a\":1}", &options).unwrap();
        assert_eq!(obj.get_i64("a").unwrap(), 1);
    }

    #[test]
    fn parse_errors_report_location() {
        let err = Value::parse("{\"a\":\n  oops}").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2:"), "missing line info: {msg}");
    }

    #[test]
    fn parse_multiple_objects() {
        let objects = JsonObject::parse_multiple("{\"a\":1} {\"b\":2}\n{\"c\":3}").unwrap();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[2].get_i64("c").unwrap(), 3);
    }

    #[test]
    fn parse_multiple_rejects_trash_unless_allowed() {
        assert!(JsonObject::parse_multiple("{\"a\":1} junk {\"b\":2}").is_err());
        let options = ParseOptions::new().with_allow_trailing_characters(true);
        let objects =
            JsonObject::parse_multiple_with("log: {\"a\":1} junk {\"b\":2}", &options).unwrap();
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn parse_multiple_tags_objects_by_index() {
        let options = ParseOptions::new().with_debug_tag("stream");
        let objects = JsonObject::parse_multiple_with("{} {}", &options).unwrap();
        assert_eq!(objects[0].debug_tag(), Some("stream [0]".to_string()));
        assert_eq!(objects[1].debug_tag(), Some("stream [1]".to_string()));
    }

    #[test]
    fn root_container_inherits_the_debug_tag() {
        let options = ParseOptions::new().with_debug_tag("config");
        let obj = JsonObject::parse_with("{}", &options).unwrap();
        assert_eq!(obj.debug_tag(), Some("config".to_string()));
    }
}
