//! Dynamic value representation for JSON documents.
//!
//! This module provides the [`Value`] enum which represents any valid JSON
//! value, plus the [`Plain`] escape hatch for handing document data to code
//! that wants ordinary host types instead of document nodes.
//!
//! ## Core Types
//!
//! - [`Value`]: An enum representing any JSON value (null, bool, number,
//!   string, array, object)
//! - [`Plain`]: An untyped host-side mirror of a tree (`i64`/`f64`/`String`/
//!   `Vec`/`IndexMap`), produced by [`Value::to_plain`]
//! - [`IntoValue`]: The closed conversion trait accepted by every container
//!   insertion
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use jsondoc::{json, Value};
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let text = Value::from("hello");
//!
//! let obj = json!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ### Type Checking and Extraction
//!
//! ```rust
//! use jsondoc::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_number());
//! assert_eq!(value.as_number().unwrap().as_i64().unwrap(), 42);
//! assert!(value.as_str().is_none());
//! ```
//!
//! ### Round-tripping Text
//!
//! ```rust
//! use jsondoc::Value;
//!
//! let value = Value::parse("[1,\"two\",null]").unwrap();
//! assert_eq!(value.to_json_string(), "[1,\"two\",null]");
//! ```

use crate::array::JsonArray;
use crate::error::{Error, Result};
use crate::number::Number;
use crate::object::JsonObject;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed representation of any JSON value.
///
/// Leaf variants own their data. The `Object` and `Array` variants hold
/// shared container handles: cloning a `Value` holding a container clones the
/// handle, not the container, so the clone sees later mutations. This mirrors
/// how document trees are actually built and edited in place.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{Value, Number};
///
/// let num = Value::Number(Number::from(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// assert!(Value::Null.is_null());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(JsonArray),
    Object(JsonObject),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a number, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an array, returns a handle to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a handle to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Variant name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Converts the tree rooted here into the untyped [`Plain`]
    /// representation. Containers are copied out; numbers pick their smallest
    /// fitting host kind.
    ///
    /// # Errors
    ///
    /// Fails with `Overflow` when a number fits neither `i64` nor `f64`.
    pub fn to_plain(&self) -> Result<Plain> {
        match self {
            Value::Null => Ok(Plain::Null),
            Value::Bool(b) => Ok(Plain::Bool(*b)),
            Value::Number(n) => n.to_plain(),
            Value::String(s) => Ok(Plain::String(s.clone())),
            Value::Array(arr) => Ok(Plain::List(arr.to_vec()?)),
            Value::Object(obj) => Ok(Plain::Map(obj.to_map()?)),
        }
    }
}

/// Structural equality. Objects compare order-independently; two container
/// handles sharing one underlying container are always equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Value::Number(n) => {
                2u8.hash(state);
                n.hash(state);
            }
            Value::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            Value::Array(arr) => {
                4u8.hash(state);
                arr.hash(state);
            }
            Value::Object(obj) => {
                5u8.hash(state);
                obj.hash(state);
            }
        }
    }
}

/// Displays the value as compact JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

/// An untyped host-side mirror of a document tree.
///
/// Produced by [`Value::to_plain`], [`JsonObject::to_map`] and
/// [`JsonArray::to_vec`], and accepted as a deserialization target when
/// `allow_untyped_fields` is set. Unlike [`Value`] it holds no shared
/// handles, no protection flags and no verbatim number literals; it is plain
/// owned data.
#[derive(Clone, Debug, PartialEq)]
pub enum Plain {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Plain>),
    Map(IndexMap<String, Plain>),
}

/// Conversion into a [`Value`], accepted by every container insertion.
///
/// The set of implementations is closed over the kinds JSON can hold: values
/// and containers themselves, strings, booleans, all integer widths, floats
/// (which fail for NaN and infinities), `Option` (`None` becomes `Null`) and
/// `()` (becomes `Null`). Anything else simply does not implement the trait,
/// so unrepresentable inputs fail at compile time rather than at run time.
pub trait IntoValue {
    /// Converts `self` into a document value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFinite`] for NaN and infinite floats.
    fn into_value(self) -> Result<Value>;
}

impl IntoValue for Value {
    fn into_value(self) -> Result<Value> {
        Ok(self)
    }
}

impl IntoValue for JsonObject {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Object(self))
    }
}

impl IntoValue for JsonArray {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Array(self))
    }
}

impl IntoValue for Number {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Number(self))
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Bool(self))
    }
}

impl IntoValue for String {
    fn into_value(self) -> Result<Value> {
        Ok(Value::String(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl IntoValue for () {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Null)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Result<Value> {
        match self {
            Some(inner) => inner.into_value(),
            None => Ok(Value::Null),
        }
    }
}

macro_rules! into_value_int {
    ($($ty:ty),*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Result<Value> {
                    Ok(Value::Number(Number::from(self)))
                }
            }
        )*
    };
}

into_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl IntoValue for f32 {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Number(Number::from_f32(self)?))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Result<Value> {
        Ok(Value::Number(Number::from_f64(self)?))
    }
}

// Infallible From impls for ergonomic Value construction; float inputs go
// through IntoValue instead, which can reject NaN and infinities.
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<JsonObject> for Value {
    fn from(value: JsonObject) -> Self {
        Value::Object(value)
    }
}

impl From<JsonArray> for Value {
    fn from(value: JsonArray) -> Self {
        Value::Array(value)
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                // Verbatim literals map onto the narrowest serde number kind
                // that holds them.
                if let Ok(i) = n.as_i64() {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = n.as_u64() {
                    serializer.serialize_u64(u)
                } else if let Ok(f) = n.as_f64() {
                    serializer.serialize_f64(f)
                } else {
                    serializer.serialize_str(n.as_str())
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let values = arr.values();
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for element in &values {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let entries = obj.entries();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in &entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                Number::from_f64(value)
                    .map(Value::Number)
                    .map_err(de::Error::custom)
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let arr = JsonArray::new();
                while let Some(elem) = seq.next_element::<Value>()? {
                    arr.add(elem).map_err(de::Error::custom)?;
                }
                Ok(Value::Array(arr))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let obj = JsonObject::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    obj.add(key, value).map_err(de::Error::custom)?;
                }
                Ok(Value::Object(obj))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting primitives from values.
impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_i64(),
            other => Err(mismatch("number", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            other => Err(mismatch("number", &other)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        at: String::new(),
        expected,
        found: found.kind(),
        tag: String::new(),
    }
}
