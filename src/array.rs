//! The JSON array container.
//!
//! [`JsonArray`] is an ordered list of [`Value`]s with the same guarded
//! mutation rules as [`JsonObject`](crate::JsonObject): frozen containers and
//! cycle-forming insertions are rejected before anything changes. Duplicate
//! values are allowed.
//!
//! Like the object, the type is a shared handle; cloning shares the
//! underlying list.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::JsonArray;
//!
//! let arr = JsonArray::new();
//! arr.add(1).unwrap();
//! arr.add("two").unwrap();
//! arr.add(()).unwrap();
//! assert_eq!(arr.to_json_string(), "[1,\"two\",null]");
//! assert_eq!(arr.get_i64(0).unwrap(), 1);
//! ```

use crate::error::{tag_suffix, Error, Result};
use crate::number::Number;
use crate::object::{protect_value, value_reaches, JsonObject};
use crate::value::{IntoValue, Plain, Value};
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub(crate) struct ArrayInner {
    values: Vec<Value>,
    protected: bool,
    debug_tag: Option<String>,
}

/// An ordered JSON array with guarded mutation.
#[derive(Clone)]
pub struct JsonArray {
    inner: Rc<RefCell<ArrayInner>>,
}

impl JsonArray {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        JsonArray {
            inner: Rc::new(RefCell::new(ArrayInner {
                values: Vec::new(),
                protected: false,
                debug_tag: None,
            })),
        }
    }

    /// Builds an array from ready-made values. The new container can not be
    /// part of any incoming value, so no cycle check is needed.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let arr = JsonArray::new();
        arr.inner.borrow_mut().values.extend(values);
        arr
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().values.is_empty()
    }

    /// Snapshot of all elements in order. Container values in the snapshot
    /// are shared handles, not copies.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().values.clone()
    }

    /// Appends a value.
    ///
    /// # Errors
    ///
    /// `Protected` on a frozen array, `CircularReference` when the value is a
    /// container from which this array is reachable, `NotFinite` for
    /// NaN/infinite float inputs.
    pub fn add(&self, value: impl IntoValue) -> Result<()> {
        let value = value.into_value()?;
        self.check_mutable("add value")?;
        self.check_no_cycle(&value)?;
        self.inner.borrow_mut().values.push(value);
        Ok(())
    }

    /// Replaces the element at an index.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when the index is past the end; otherwise as in
    /// [`add`](Self::add).
    pub fn replace_at(&self, index: usize, value: impl IntoValue) -> Result<()> {
        let value = value.into_value()?;
        self.check_mutable("replace value")?;
        self.check_index(index)?;
        self.check_no_cycle(&value)?;
        self.inner.borrow_mut().values[index] = value;
        Ok(())
    }

    /// Inserts a value at an index, shifting later elements. Inserting at
    /// `len()` appends.
    pub fn insert_at(&self, index: usize, value: impl IntoValue) -> Result<()> {
        let value = value.into_value()?;
        self.check_mutable("insert value")?;
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange {
                index,
                len,
                tag: self.tag(),
            });
        }
        self.check_no_cycle(&value)?;
        self.inner.borrow_mut().values.insert(index, value);
        Ok(())
    }

    /// Removes the element at an index, returning it.
    pub fn remove_at(&self, index: usize) -> Result<Value> {
        self.check_mutable("remove value")?;
        self.check_index(index)?;
        Ok(self.inner.borrow_mut().values.remove(index))
    }

    /// Removes the first element structurally equal to the given value.
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// `Protected` on a frozen array, `NotFinite` for NaN/infinite floats.
    pub fn remove_value(&self, value: impl IntoValue) -> Result<bool> {
        let value = value.into_value()?;
        self.check_mutable("remove value")?;
        let mut inner = self.inner.borrow_mut();
        match inner.values.iter().position(|v| *v == value) {
            Some(index) => {
                inner.values.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether any element is structurally equal to the given value.
    ///
    /// # Errors
    ///
    /// `NotFinite` for NaN/infinite float inputs.
    pub fn contains_value(&self, value: impl IntoValue) -> Result<bool> {
        let value = value.into_value()?;
        Ok(self.inner.borrow().values.iter().any(|v| *v == value))
    }

    /// Removes all elements.
    pub fn clear(&self) -> Result<()> {
        self.check_mutable("clear array")?;
        self.inner.borrow_mut().values.clear();
        Ok(())
    }

    /// The element at an index, any variant.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when the index is past the end.
    pub fn get(&self, index: usize) -> Result<Value> {
        self.check_index(index)?;
        Ok(self.inner.borrow().values[index].clone())
    }

    /// The object at an index. `Null` reads as `None`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange`, or `TypeMismatch` when the element is neither an
    /// object nor null.
    pub fn get_object(&self, index: usize) -> Result<Option<JsonObject>> {
        match self.get(index)? {
            Value::Object(obj) => Ok(Some(obj)),
            Value::Null => Ok(None),
            other => Err(self.mismatch(index, "object", &other)),
        }
    }

    /// The array at an index. `Null` reads as `None`.
    pub fn get_array(&self, index: usize) -> Result<Option<JsonArray>> {
        match self.get(index)? {
            Value::Array(arr) => Ok(Some(arr)),
            Value::Null => Ok(None),
            other => Err(self.mismatch(index, "array", &other)),
        }
    }

    /// The string at an index. `Null` reads as `None`.
    pub fn get_string(&self, index: usize) -> Result<Option<String>> {
        match self.get(index)? {
            Value::String(s) => Ok(Some(s)),
            Value::Null => Ok(None),
            other => Err(self.mismatch(index, "string", &other)),
        }
    }

    /// The number at an index. `Null` fails with `NullNotAllowed`.
    pub fn get_number(&self, index: usize) -> Result<Number> {
        match self.get(index)? {
            Value::Number(n) => Ok(n),
            Value::Null => Err(self.null_not_allowed(index, "number")),
            other => Err(self.mismatch(index, "number", &other)),
        }
    }

    /// The boolean at an index. `Null` fails with `NullNotAllowed`.
    pub fn get_bool(&self, index: usize) -> Result<bool> {
        match self.get(index)? {
            Value::Bool(b) => Ok(b),
            Value::Null => Err(self.null_not_allowed(index, "boolean")),
            other => Err(self.mismatch(index, "boolean", &other)),
        }
    }

    /// The number at an index read as `i64`.
    pub fn get_i64(&self, index: usize) -> Result<i64> {
        self.get_number(index)?.as_i64()
    }

    /// The number at an index read as `f64`.
    pub fn get_f64(&self, index: usize) -> Result<f64> {
        self.get_number(index)?.as_f64()
    }

    /// Whether the element at an index is null.
    pub fn is_null(&self, index: usize) -> Result<bool> {
        Ok(self.get(index)?.is_null())
    }

    /// Freezes this array and every container reachable from it. One-way.
    pub fn set_protected(&self) {
        if self.inner.borrow().protected {
            return;
        }
        self.inner.borrow_mut().protected = true;
        for value in self.values() {
            protect_value(&value);
        }
    }

    /// Whether this array has been frozen.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.inner.borrow().protected
    }

    /// Attaches a tag echoed into every error this array raises.
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
    pub fn to_vec(&self) -> Result<Vec<Plain>> {
        self.values().iter().map(Value::to_plain).collect()
    }

    pub(crate) fn ptr(&self) -> *const () {
        Rc::as_ptr(&self.inner).cast()
    }

    pub(crate) fn reaches(&self, target: *const ()) -> bool {
        if self.ptr() == target {
            return true;
        }
        self.inner
            .borrow()
            .values
            .iter()
            .any(|v| value_reaches(v, target))
    }

    pub(crate) fn tag(&self) -> String {
        tag_suffix(self.inner.borrow().debug_tag.as_deref())
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.inner.borrow().protected {
            return Err(Error::Protected {
                op,
                container: "array",
                tag: self.tag(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange {
                index,
                len,
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

    fn mismatch(&self, index: usize, expected: &'static str, found: &Value) -> Error {
        Error::TypeMismatch {
            at: format!(" at index {index}"),
            expected,
            found: found.kind(),
            tag: self.tag(),
        }
    }

    fn null_not_allowed(&self, index: usize, expected: &'static str) -> Error {
        Error::NullNotAllowed {
            at: format!(" at index {index}"),
            expected,
            tag: self.tag(),
        }
    }
}

impl Default for JsonArray {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_list().entries(inner.values.iter()).finish()
    }
}

/// Displays the array as compact JSON text.
impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

/// Structural equality: same length, pairwise equal elements in order.
impl PartialEq for JsonArray {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        *self.inner.borrow().values == *other.inner.borrow().values
    }
}

impl Eq for JsonArray {}

impl Hash for JsonArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let inner = self.inner.borrow();
        inner.values.len().hash(state);
        let mut combined = 0u64;
        for (index, value) in inner.values.iter().enumerate() {
            let mut entry_hasher = DefaultHasher::new();
            index.hash(&mut entry_hasher);
            value.hash(&mut entry_hasher);
            combined ^= entry_hasher.finish();
        }
        combined.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let arr = JsonArray::new();
        arr.add(1).unwrap();
        arr.add("two").unwrap();
        arr.add(true).unwrap();
        arr.add(()).unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr.get_i64(0).unwrap(), 1);
        assert_eq!(arr.get_string(1).unwrap(), Some("two".to_string()));
        assert!(arr.get_bool(2).unwrap());
        assert!(arr.is_null(3).unwrap());
    }

    #[test]
    fn index_errors() {
        let arr = JsonArray::new();
        arr.add(1).unwrap();
        assert!(matches!(arr.get(1), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(
            arr.replace_at(5, 0),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            arr.remove_at(1),
            Err(Error::IndexOutOfRange { .. })
        ));
        // insert_at(len) appends.
        arr.insert_at(1, 2).unwrap();
        assert_eq!(arr.get_i64(1).unwrap(), 2);
        assert!(matches!(
            arr.insert_at(5, 0),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn insert_shifts_elements() {
        let arr = JsonArray::new();
        arr.add("a").unwrap();
        arr.add("c").unwrap();
        arr.insert_at(1, "b").unwrap();
        assert_eq!(arr.to_json_string(), "[\"a\",\"b\",\"c\"]");
    }

    #[test]
    fn remove_and_contains_by_value() {
        let arr = JsonArray::new();
        arr.add(1).unwrap();
        arr.add(2).unwrap();
        arr.add(1).unwrap();
        assert!(arr.contains_value(2).unwrap());
        assert!(arr.remove_value(1).unwrap());
        // Only the first match goes.
        assert_eq!(arr.to_json_string(), "[2,1]");
        assert!(!arr.remove_value(99).unwrap());
    }

    #[test]
    fn duplicates_are_allowed() {
        let arr = JsonArray::new();
        arr.add("x").unwrap();
        arr.add("x").unwrap();
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn self_insertion_is_circular() {
        let arr = JsonArray::new();
        let err = arr.add(arr.clone()).unwrap_err();
        assert!(matches!(err, Error::CircularReference { .. }));
        assert!(arr.is_empty());
    }

    #[test]
    fn shared_subtree_is_not_a_cycle() {
        let shared = JsonArray::new();
        shared.add(1).unwrap();
        let a = JsonArray::new();
        let b = JsonArray::new();
        a.add(shared.clone()).unwrap();
        b.add(shared.clone()).unwrap();
        assert_eq!(a.to_json_string(), "[[1]]");
        assert_eq!(b.to_json_string(), "[[1]]");
    }

    #[test]
    fn protection_blocks_every_mutation() {
        let arr = JsonArray::new();
        arr.add(1).unwrap();
        arr.set_protected();
        assert!(matches!(arr.add(2), Err(Error::Protected { .. })));
        assert!(matches!(arr.replace_at(0, 2), Err(Error::Protected { .. })));
        assert!(matches!(arr.remove_at(0), Err(Error::Protected { .. })));
        assert!(matches!(arr.clear(), Err(Error::Protected { .. })));
        assert_eq!(arr.get_i64(0).unwrap(), 1);
    }

    #[test]
    fn equality_is_ordered() {
        let a = JsonArray::new();
        a.add(1).unwrap();
        a.add(2).unwrap();
        let b = JsonArray::new();
        b.add(2).unwrap();
        b.add(1).unwrap();
        assert_ne!(a, b);
        let c = JsonArray::new();
        c.add(1).unwrap();
        c.add(2).unwrap();
        assert_eq!(a, c);
    }
}
