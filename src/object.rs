//! The JSON object container.
//!
//! [`JsonObject`] is an insertion-ordered map from string keys to [`Value`]s
//! with guarded mutation: duplicate keys, frozen containers and cycle-forming
//! insertions are rejected before the container is touched, so a failed
//! operation always leaves the object exactly as it was.
//!
//! The type is a shared handle. Cloning it clones the handle, not the map:
//! both handles see the same entries and the same mutations. Deep copies go
//! through text (`to_json_string` then `parse`) or through
//! [`to_map`](JsonObject::to_map).
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::JsonObject;
//!
//! let obj = JsonObject::new();
//! obj.add("name", "Alice").unwrap();
//! obj.add("age", 30).unwrap();
//! assert!(obj.add("age", 31).is_err()); // duplicate key
//! assert_eq!(obj.get_i64("age").unwrap(), 30);
//! assert_eq!(obj.to_json_string(), "{\"name\":\"Alice\",\"age\":30}");
//! ```

use crate::array::JsonArray;
use crate::error::{tag_suffix, Error, Result};
use crate::number::Number;
use crate::value::{IntoValue, Plain, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub(crate) struct ObjectInner {
    entries: IndexMap<String, Value>,
    protected: bool,
    debug_tag: Option<String>,
}

/// An insertion-ordered JSON object with guarded mutation.
///
/// See the [module documentation](self) for the sharing and mutation rules.
#[derive(Clone)]
pub struct JsonObject {
    inner: Rc<RefCell<ObjectInner>>,
}

impl JsonObject {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        JsonObject {
            inner: Rc::new(RefCell::new(ObjectInner {
                entries: IndexMap::new(),
                protected: false,
                debug_tag: None,
            })),
        }
    }

    /// Builds an object from ready-made entries. Later duplicates overwrite
    /// earlier ones, as in [`add_or_replace`](Self::add_or_replace). The new
    /// container can not be part of any incoming value, so no cycle check is
    /// needed.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        let obj = JsonObject::new();
        {
            let mut inner = obj.inner.borrow_mut();
            for (key, value) in entries {
                inner.entries.insert(key, value);
            }
        }
        obj
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    /// All keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().entries.keys().cloned().collect()
    }

    /// Snapshot of all entries in insertion order. Container values in the
    /// snapshot are shared handles, not copies.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Adds a new key. Fails with `KeyAlreadyExists` when the key is already
    /// present; the original value is retained.
    ///
    /// # Errors
    ///
    /// `Protected` on a frozen object, `KeyAlreadyExists` on a duplicate key,
    /// `CircularReference` when the value is a container from which this
    /// object is reachable, `NotFinite` for NaN/infinite float inputs.
    pub fn add(&self, key: impl Into<String>, value: impl IntoValue) -> Result<()> {
        let key = key.into();
        let value = value.into_value()?;
        self.check_mutable("add value")?;
        if self.contains_key(&key) {
            return Err(Error::KeyAlreadyExists {
                key,
                tag: self.tag(),
            });
        }
        self.check_no_cycle(&value)?;
        self.inner.borrow_mut().entries.insert(key, value);
        Ok(())
    }

    /// Adds a key, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// `Protected`, `CircularReference` or `NotFinite` as in
    /// [`add`](Self::add).
    pub fn add_or_replace(&self, key: impl Into<String>, value: impl IntoValue) -> Result<()> {
        let key = key.into();
        let value = value.into_value()?;
        self.check_mutable("add or replace value")?;
        self.check_no_cycle(&value)?;
        self.inner.borrow_mut().entries.insert(key, value);
        Ok(())
    }

    /// Replaces the value of an existing key.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the key is absent; otherwise as in
    /// [`add`](Self::add).
    pub fn replace(&self, key: &str, value: impl IntoValue) -> Result<()> {
        let value = value.into_value()?;
        self.check_mutable("replace value")?;
        if !self.contains_key(key) {
            return Err(Error::KeyNotFound {
                key: key.to_string(),
                tag: self.tag(),
            });
        }
        self.check_no_cycle(&value)?;
        self.inner.borrow_mut().entries.insert(key.to_string(), value);
        Ok(())
    }

    /// Removes a key, returning its value.
    ///
    /// # Errors
    ///
    /// `Protected` on a frozen object, `KeyNotFound` when the key is absent.
    pub fn remove(&self, key: &str) -> Result<Value> {
        self.check_mutable("remove value")?;
        let removed = self.inner.borrow_mut().entries.shift_remove(key);
        removed.ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
                tag: self.tag(),
            })
    }

    /// Removes all entries.
    ///
    /// # Errors
    ///
    /// `Protected` on a frozen object.
    pub fn clear(&self) -> Result<()> {
        self.check_mutable("clear object")?;
        self.inner.borrow_mut().entries.clear();
        Ok(())
    }

    /// The value under a key, any variant.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the key is absent.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.try_get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
            tag: self.tag(),
        })
    }

    /// The value under a key, or `None` when the key is absent.
    #[must_use]
    pub fn try_get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// The object under a key. `Null` reads as `None`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the key is absent, `TypeMismatch` when the value is
    /// neither an object nor null.
    pub fn get_object(&self, key: &str) -> Result<Option<JsonObject>> {
        match self.get(key)? {
            Value::Object(obj) => Ok(Some(obj)),
            Value::Null => Ok(None),
            other => Err(self.mismatch(key, "object", &other)),
        }
    }

    /// The array under a key. `Null` reads as `None`.
    pub fn get_array(&self, key: &str) -> Result<Option<JsonArray>> {
        match self.get(key)? {
            Value::Array(arr) => Ok(Some(arr)),
            Value::Null => Ok(None),
            other => Err(self.mismatch(key, "array", &other)),
        }
    }

    /// The string under a key. `Null` reads as `None`.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key)? {
            Value::String(s) => Ok(Some(s)),
            Value::Null => Ok(None),
            other => Err(self.mismatch(key, "string", &other)),
        }
    }

    /// The number under a key. `Null` fails: a number has no absent form.
    ///
    /// # Errors
    ///
    /// `KeyNotFound`, `TypeMismatch`, or `NullNotAllowed` for a null value.
    pub fn get_number(&self, key: &str) -> Result<Number> {
        match self.get(key)? {
            Value::Number(n) => Ok(n),
            Value::Null => Err(self.null_not_allowed(key, "number")),
            other => Err(self.mismatch(key, "number", &other)),
        }
    }

    /// The boolean under a key. `Null` fails with `NullNotAllowed`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get(key)? {
            Value::Bool(b) => Ok(b),
            Value::Null => Err(self.null_not_allowed(key, "boolean")),
            other => Err(self.mismatch(key, "boolean", &other)),
        }
    }

    /// The number under a key read as `i64`.
    ///
    /// # Errors
    ///
    /// As [`get_number`](Self::get_number), plus the numeric read errors of
    /// [`Number::as_i64`].
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        self.get_number(key)?.as_i64()
    }

    /// The number under a key read as `f64`.
    pub fn get_f64(&self, key: &str) -> Result<f64> {
        self.get_number(key)?.as_f64()
    }

    /// Whether the value under a key is null.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the key is absent.
    pub fn is_null(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_null())
    }

    /// Freezes this object and every container reachable from it. One-way:
    /// there is no unprotect. Reads keep working; every mutating operation
    /// fails with `Protected` afterwards.
    pub fn set_protected(&self) {
        if self.inner.borrow().protected {
            return;
        }
        self.inner.borrow_mut().protected = true;
        for (_, value) in self.entries() {
            protect_value(&value);
        }
    }

    /// Whether this object has been frozen.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.inner.borrow().protected
    }

    /// Attaches a tag echoed into every error this object raises. Meant for
    /// telling documents apart in production logs.
    pub fn set_debug_tag(&self, tag: impl Into<String>) {
        self.inner.borrow_mut().debug_tag = Some(tag.into());
    }

    /// The current debug tag, if any.
    #[must_use]
    pub fn debug_tag(&self) -> Option<String> {
        self.inner.borrow().debug_tag.clone()
    }

    /// Converts the tree rooted here to plain host data.
    ///
    /// # Errors
    ///
    /// `Overflow` when a number fits neither `i64` nor `f64`.
    pub fn to_map(&self) -> Result<IndexMap<String, Plain>> {
        let mut map = IndexMap::new();
        for (key, value) in self.entries() {
            map.insert(key, value.to_plain()?);
        }
        Ok(map)
    }

    /// Identity of the underlying container, used for cycle detection.
    pub(crate) fn ptr(&self) -> *const () {
        Rc::as_ptr(&self.inner).cast()
    }

    /// Whether the given container identity is reachable from this object,
    /// including this object itself.
    pub(crate) fn reaches(&self, target: *const ()) -> bool {
        if self.ptr() == target {
            return true;
        }
        self.inner
            .borrow()
            .entries
            .values()
            .any(|v| value_reaches(v, target))
    }

    pub(crate) fn tag(&self) -> String {
        tag_suffix(self.inner.borrow().debug_tag.as_deref())
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.inner.borrow().protected {
            return Err(Error::Protected {
                op,
                container: "object",
                tag: self.tag(),
            });
        }
        Ok(())
    }

    fn check_no_cycle(&self, value: &Value) -> Result<()> {
        if value_reaches(value, self.ptr()) {
            return Err(Error::CircularReference {
                what: "adding this value".to_string(),
                tag: self.tag(),
            });
        }
        Ok(())
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &Value) -> Error {
        Error::TypeMismatch {
            at: format!(" under key \"{key}\""),
            expected,
            found: found.kind(),
            tag: self.tag(),
        }
    }

    fn null_not_allowed(&self, key: &str, expected: &'static str) -> Error {
        Error::NullNotAllowed {
            at: format!(" under key \"{key}\""),
            expected,
            tag: self.tag(),
        }
    }
}

/// Whether `target` is reachable from `value`.
pub(crate) fn value_reaches(value: &Value, target: *const ()) -> bool {
    match value {
        Value::Object(obj) => obj.reaches(target),
        Value::Array(arr) => arr.reaches(target),
        _ => false,
    }
}

/// Recursively freezes any container held in `value`.
pub(crate) fn protect_value(value: &Value) {
    match value {
        Value::Object(obj) => obj.set_protected(),
        Value::Array(arr) => arr.set_protected(),
        _ => {}
    }
}

impl Default for JsonObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_map().entries(inner.entries.iter()).finish()
    }
}

/// Displays the object as compact JSON text.
impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

/// Structural, order-independent equality: same keys, equal values. Two
/// handles to one underlying container are trivially equal.
impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        let a = self.inner.borrow();
        let b = other.inner.borrow();
        if a.entries.len() != b.entries.len() {
            return false;
        }
        a.entries
            .iter()
            .all(|(key, value)| b.entries.get(key) == Some(value))
    }
}

impl Eq for JsonObject {}

/// Order-independent hash consistent with equality: per-entry hashes are
/// combined with xor, so insertion order can not matter.
impl Hash for JsonObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let inner = self.inner.borrow();
        let mut combined = 0u64;
        for (key, value) in &inner.entries {
            let mut entry_hasher = DefaultHasher::new();
            key.hash(&mut entry_hasher);
            value.hash(&mut entry_hasher);
            combined ^= entry_hasher.finish();
        }
        inner.entries.len().hash(state);
        combined.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let obj = JsonObject::new();
        obj.add("name", "Alice").unwrap();
        obj.add("age", 30).unwrap();
        obj.add("tags", ()).unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj.get_string("name").unwrap(), Some("Alice".to_string()));
        assert_eq!(obj.get_i64("age").unwrap(), 30);
        assert!(obj.is_null("tags").unwrap());
        assert_eq!(obj.keys(), vec!["name", "age", "tags"]);
    }

    #[test]
    fn duplicate_key_fails_and_keeps_original() {
        let obj = JsonObject::new();
        obj.add("k", 1).unwrap();
        assert!(matches!(
            obj.add("k", 2),
            Err(Error::KeyAlreadyExists { .. })
        ));
        assert_eq!(obj.get_i64("k").unwrap(), 1);
    }

    #[test]
    fn replace_requires_existing_key() {
        let obj = JsonObject::new();
        assert!(matches!(
            obj.replace("missing", 1),
            Err(Error::KeyNotFound { .. })
        ));
        obj.add("k", 1).unwrap();
        obj.replace("k", 2).unwrap();
        assert_eq!(obj.get_i64("k").unwrap(), 2);
    }

    #[test]
    fn remove_returns_value() {
        let obj = JsonObject::new();
        obj.add("k", "v").unwrap();
        assert_eq!(obj.remove("k").unwrap(), Value::from("v"));
        assert!(matches!(obj.remove("k"), Err(Error::KeyNotFound { .. })));
    }

    #[test]
    fn null_reads() {
        let obj = JsonObject::new();
        obj.add("n", ()).unwrap();
        // Reference-like targets read null as absence.
        assert_eq!(obj.get_string("n").unwrap(), None);
        assert_eq!(obj.get_object("n").unwrap(), None);
        // Primitive targets can not hold absence.
        assert!(matches!(
            obj.get_bool("n"),
            Err(Error::NullNotAllowed { .. })
        ));
        assert!(matches!(
            obj.get_i64("n"),
            Err(Error::NullNotAllowed { .. })
        ));
    }

    #[test]
    fn typed_getter_mismatch() {
        let obj = JsonObject::new();
        obj.add("k", 1).unwrap();
        let err = obj.get_string("k").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(err.to_string().contains("\"k\""));
    }

    #[test]
    fn self_insertion_is_circular() {
        let obj = JsonObject::new();
        let err = obj.add("self", obj.clone()).unwrap_err();
        assert!(matches!(err, Error::CircularReference { .. }));
        assert!(obj.is_empty());
    }

    #[test]
    fn indirect_cycle_is_detected() {
        let a = JsonObject::new();
        let b = JsonObject::new();
        let c = JsonArray::new();
        a.add("b", b.clone()).unwrap();
        b.add("c", c.clone()).unwrap();
        let err = c.add(a.clone()).unwrap_err();
        assert!(matches!(err, Error::CircularReference { .. }));
        assert!(c.is_empty());
    }

    #[test]
    fn protection_is_recursive_and_one_way() {
        let outer = JsonObject::new();
        let inner = JsonObject::new();
        inner.add("x", 1).unwrap();
        outer.add("inner", inner.clone()).unwrap();
        outer.set_protected();
        assert!(matches!(outer.add("y", 2), Err(Error::Protected { .. })));
        assert!(matches!(inner.add("y", 2), Err(Error::Protected { .. })));
        assert!(matches!(inner.clear(), Err(Error::Protected { .. })));
        // Reads still work.
        assert_eq!(inner.get_i64("x").unwrap(), 1);
    }

    #[test]
    fn clone_shares_the_container() {
        let obj = JsonObject::new();
        let alias = obj.clone();
        obj.add("k", 1).unwrap();
        assert_eq!(alias.get_i64("k").unwrap(), 1);
    }

    #[test]
    fn equality_ignores_order() {
        let a = JsonObject::new();
        a.add("x", 1).unwrap();
        a.add("y", 2).unwrap();
        let b = JsonObject::new();
        b.add("y", 2).unwrap();
        b.add("x", 1).unwrap();
        assert_eq!(a, b);

        let mut hasher_a = DefaultHasher::new();
        a.hash(&mut hasher_a);
        let mut hasher_b = DefaultHasher::new();
        b.hash(&mut hasher_b);
        assert_eq!(hasher_a.finish(), hasher_b.finish());

        b.add("z", 3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn debug_tag_shows_in_errors() {
        let obj = JsonObject::new();
        obj.set_debug_tag("settings-file");
        let err = obj.get("missing").unwrap_err();
        assert!(err.to_string().contains("settings-file"));
    }
}
