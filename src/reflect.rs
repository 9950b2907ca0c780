//! Field introspection for the object mapper.
//!
//! Rust has no runtime reflection, so the mapper works from explicit field
//! registrations: a type implements [`Introspect`] by listing its fields as
//! [`Field`] descriptors, each carrying a name, a set of [`FieldMarkers`] and
//! getter/setter functions. The [`reflect!`](crate::reflect) macro writes the
//! implementation from a field list; hand-written implementations are equally
//! valid.
//!
//! Markers decide which fields take part in mapping. The decision order in
//! [`FieldMarkers::is_serialized`] is fixed: an explicit exclude always wins,
//! an engine-level transient marker wins next (unless engine markers are
//! ignored), then field visibility and explicit includes, then an
//! engine-level serialized marker, and everything left over stays out.

use crate::error::{Error, Result};
use crate::options::{DeserializeOptions, SerializeOptions};
use crate::value::Value;

/// Per-field inclusion markers, mirroring the attribute set a host
/// application would put on its fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldMarkers {
    /// Field is publicly visible on its type.
    pub public: bool,
    /// Explicitly opted in to mapping.
    pub include: bool,
    /// Explicitly opted out of mapping. Beats everything else.
    pub exclude: bool,
    /// Carries the host engine's "serialize this" marker.
    pub engine_serialized: bool,
    /// Carries the host engine's "do not serialize this" marker.
    pub engine_transient: bool,
}

impl FieldMarkers {
    /// No markers at all: a private, unannotated field. Stays out of mapping.
    #[must_use]
    pub const fn new() -> Self {
        FieldMarkers {
            public: false,
            include: false,
            exclude: false,
            engine_serialized: false,
            engine_transient: false,
        }
    }

    /// A public field with no annotations.
    #[must_use]
    pub const fn public() -> Self {
        FieldMarkers {
            public: true,
            ..Self::new()
        }
    }

    /// Alias for [`new`](Self::new); reads better in registration lists.
    #[must_use]
    pub const fn private() -> Self {
        Self::new()
    }

    #[must_use]
    pub const fn with_include(mut self) -> Self {
        self.include = true;
        self
    }

    #[must_use]
    pub const fn with_exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    #[must_use]
    pub const fn with_engine_serialized(mut self) -> Self {
        self.engine_serialized = true;
        self
    }

    #[must_use]
    pub const fn with_engine_transient(mut self) -> Self {
        self.engine_transient = true;
        self
    }

    /// Whether a field with these markers takes part in mapping.
    #[must_use]
    pub fn is_serialized(&self, ignore_engine_markers: bool) -> bool {
        if self.exclude {
            return false;
        }
        if self.engine_transient && !ignore_engine_markers {
            return false;
        }
        if self.public || self.include {
            return true;
        }
        self.engine_serialized && !ignore_engine_markers
    }
}

/// One registered field of an introspectable type.
pub struct Field<T> {
    /// Field name, used as the JSON key.
    pub name: &'static str,
    pub markers: FieldMarkers,
    /// Reads the field from a host value into a document value.
    pub get: fn(&T, &SerializeOptions, &mut CycleGuard) -> Result<Value>,
    /// Writes a document value into the field of a host value.
    pub set: fn(&mut T, &Value, &DeserializeOptions) -> Result<()>,
}

/// A type whose fields the mapper can enumerate.
///
/// `Default` is required because deserialization starts from a default
/// instance and populates fields one by one; with
/// `require_all_fields_populated` disabled, unpopulated fields simply keep
/// their default values.
pub trait Introspect: Default {
    /// Type name used in mapper error messages.
    fn type_name() -> &'static str;

    /// The registered fields, in declaration order.
    fn fields() -> Vec<Field<Self>>;
}

/// Conversion from a host value into a document value.
///
/// Implemented for primitives, strings, options, sequences, maps, document
/// types themselves, and every [`Introspect`] type. The `guard` tracks the
/// active recursion path so self-referential host graphs fail with
/// `CircularReference` instead of recursing forever.
pub trait ToJson {
    fn to_json(&self, options: &SerializeOptions, guard: &mut CycleGuard) -> Result<Value>;
}

/// Conversion from a document value into a host value.
pub trait FromJson: Sized {
    fn from_json(value: &Value, options: &DeserializeOptions) -> Result<Self>;
}

/// Stack of node addresses on the active serialization path.
///
/// Only shared-handle nodes (documents, `Rc` values, introspected structs
/// reached by reference) are pushed; plain owned data can not alias itself.
#[derive(Default)]
pub struct CycleGuard {
    path: Vec<*const ()>,
}

impl CycleGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a node address, failing when it is already on the path.
    ///
    /// # Errors
    ///
    /// `CircularReference` when the address is already being serialized.
    pub fn enter(&mut self, ptr: *const (), what: &str) -> Result<()> {
        if self.path.contains(&ptr) {
            return Err(Error::CircularReference {
                what: what.to_string(),
                tag: String::new(),
            });
        }
        self.path.push(ptr);
        Ok(())
    }

    /// Pops the most recent node address. Callers pair this with
    /// [`enter`](Self::enter) around each recursion step.
    pub fn leave(&mut self) {
        self.path.pop();
    }
}

/// Map key conversion, both directions.
///
/// String keys always work. Integer keys are rendered to (and parsed from)
/// their decimal text form, but only when `allow_non_string_map_keys` is set;
/// otherwise they fail with `UnknownType` so a surprising key type can not
/// slip into output silently.
pub trait MapKey: Sized {
    fn to_key(&self, options: &SerializeOptions) -> Result<String>;
    fn from_key(key: &str, options: &DeserializeOptions) -> Result<Self>;
}

impl MapKey for String {
    fn to_key(&self, _options: &SerializeOptions) -> Result<String> {
        Ok(self.clone())
    }

    fn from_key(key: &str, _options: &DeserializeOptions) -> Result<Self> {
        Ok(key.to_string())
    }
}

macro_rules! int_map_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self, options: &SerializeOptions) -> Result<String> {
                    if !options.allow_non_string_map_keys {
                        return Err(Error::UnknownType {
                            what: concat!("map key of type ", stringify!($ty)).to_string(),
                            tag: String::new(),
                        });
                    }
                    Ok(self.to_string())
                }

                fn from_key(key: &str, options: &DeserializeOptions) -> Result<Self> {
                    if !options.allow_non_string_map_keys {
                        return Err(Error::UnknownType {
                            what: concat!("map key of type ", stringify!($ty)).to_string(),
                            tag: String::new(),
                        });
                    }
                    key.parse::<$ty>().map_err(|_| Error::Format {
                        literal: key.to_string(),
                        target: stringify!($ty),
                        reason: "map key is not a decimal integer".to_string(),
                    })
                }
            }
        )*
    };
}

int_map_key!(i32, i64, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_precedence() {
        // Exclude beats everything.
        let markers = FieldMarkers::public().with_include().with_exclude();
        assert!(!markers.is_serialized(false));
        assert!(!markers.is_serialized(true));

        // Engine transient beats visibility unless ignored.
        let markers = FieldMarkers::public().with_engine_transient();
        assert!(!markers.is_serialized(false));
        assert!(markers.is_serialized(true));

        // Public or include is enough.
        assert!(FieldMarkers::public().is_serialized(false));
        assert!(FieldMarkers::private().with_include().is_serialized(false));

        // Engine serialized pulls a private field in unless ignored.
        let markers = FieldMarkers::private().with_engine_serialized();
        assert!(markers.is_serialized(false));
        assert!(!markers.is_serialized(true));

        // A bare private field stays out.
        assert!(!FieldMarkers::private().is_serialized(false));
    }

    #[test]
    fn cycle_guard_detects_repeats() {
        let mut guard = CycleGuard::new();
        let a = 1usize as *const ();
        let b = 2usize as *const ();
        guard.enter(a, "node a").unwrap();
        guard.enter(b, "node b").unwrap();
        assert!(matches!(
            guard.enter(a, "node a"),
            Err(Error::CircularReference { .. })
        ));
        guard.leave();
        guard.leave();
        // After leaving, the same address is fine again.
        guard.enter(a, "node a").unwrap();
    }

    #[test]
    fn integer_map_keys_are_gated() {
        let off = SerializeOptions::default();
        let on = SerializeOptions::new().with_allow_non_string_map_keys(true);
        assert!(matches!(42i64.to_key(&off), Err(Error::UnknownType { .. })));
        assert_eq!(42i64.to_key(&on).unwrap(), "42");

        let off = DeserializeOptions::default();
        let on = DeserializeOptions::new().with_allow_non_string_map_keys(true);
        assert!(matches!(
            i64::from_key("42", &off),
            Err(Error::UnknownType { .. })
        ));
        assert_eq!(i64::from_key("42", &on).unwrap(), 42);
        assert!(matches!(
            i64::from_key("4x", &on),
            Err(Error::Format { .. })
        ));
    }

    #[test]
    fn string_keys_always_work() {
        let key = "name".to_string();
        assert_eq!(key.to_key(&SerializeOptions::default()).unwrap(), "name");
        assert_eq!(
            String::from_key("name", &DeserializeOptions::default()).unwrap(),
            "name"
        );
    }
}
