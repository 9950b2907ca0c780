/// Builds a [`Value`](crate::Value) tree from a JSON-shaped literal.
///
/// Keys are string literals, values are nested literals or any expression
/// implementing [`IntoValue`](crate::IntoValue). An expression that can not
/// become a value (a NaN float, for example) falls back to `null`.
///
/// # Examples
///
/// ```rust
/// use jsondoc::json;
///
/// let config = json!({
///     "name": "Alice",
///     "scores": [10, 20.5, null],
///     "active": true
/// });
/// assert_eq!(
///     config.to_json_string(),
///     "{\"name\":\"Alice\",\"scores\":[10,20.5,null],\"active\":true}"
/// );
/// ```
#[macro_export]
macro_rules! json {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array($crate::JsonArray::new())
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array($crate::JsonArray::from_values(vec![$($crate::json!($elem)),*]))
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::JsonObject::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::Value::Object($crate::JsonObject::from_entries(vec![
            $(($key.to_string(), $crate::json!($value))),*
        ]))
    };

    // Fallback for any expression
    ($e:expr) => {
        $crate::IntoValue::into_value($e).unwrap_or($crate::Value::Null)
    };
}

/// Registers the fields of a struct with the object mapper.
///
/// Generates [`Introspect`](crate::Introspect), [`ToJson`](crate::ToJson)
/// and [`FromJson`](crate::FromJson) for a `Default` struct from a field
/// list. Each field names its type and its markers: one of `public`,
/// `private`, `include`, `exclude`, `engine_serialized`, `engine_transient`,
/// or a bracketed combination.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{reflect, serialize};
///
/// #[derive(Default)]
/// struct Settings {
///     volume: f64,
///     theme: String,
///     cache: Option<String>,
/// }
///
/// reflect! {
///     Settings {
///         volume: f64 => public,
///         theme: String => public,
///         cache: Option<String> => [private, exclude],
///     }
/// }
///
/// let obj = serialize(&Settings { volume: 0.5, ..Default::default() }).unwrap();
/// assert_eq!(obj.to_json_string(), "{\"volume\":0.5,\"theme\":\"\"}");
/// ```
#[macro_export]
macro_rules! reflect {
    ($ty:ident { $($field:ident : $ftype:ty => $markers:tt),* $(,)? }) => {
        impl $crate::Introspect for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn fields() -> ::std::vec::Vec<$crate::Field<Self>> {
                ::std::vec![
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            markers: $crate::reflect!(@markers $markers),
                            get: |host, options, guard| {
                                $crate::ToJson::to_json(&host.$field, options, guard)
                            },
                            set: |host, value, options| {
                                host.$field =
                                    <$ftype as $crate::FromJson>::from_json(value, options)?;
                                ::std::result::Result::Ok(())
                            },
                        }
                    ),*
                ]
            }
        }

        impl $crate::ToJson for $ty {
            fn to_json(
                &self,
                options: &$crate::SerializeOptions,
                guard: &mut $crate::CycleGuard,
            ) -> $crate::Result<$crate::Value> {
                $crate::serialize_struct(self, options, guard)
            }
        }

        impl $crate::FromJson for $ty {
            fn from_json(
                value: &$crate::Value,
                options: &$crate::DeserializeOptions,
            ) -> $crate::Result<Self> {
                $crate::deserialize_struct(value, options)
            }
        }
    };

    (@markers [ $($marker:ident),* $(,)? ]) => {
        $crate::__jsondoc_markers!($($marker),*)
    };
    (@markers $marker:ident) => {
        $crate::__jsondoc_markers!($marker)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __jsondoc_markers {
    () => {
        $crate::FieldMarkers::new()
    };
    ($first:ident $(, $rest:ident)*) => {
        $crate::__jsondoc_apply_marker!($crate::__jsondoc_markers!($($rest),*), $first)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __jsondoc_apply_marker {
    ($m:expr, public) => {{
        let mut markers = $m;
        markers.public = true;
        markers
    }};
    ($m:expr, private) => {
        $m
    };
    ($m:expr, include) => {
        $m.with_include()
    };
    ($m:expr, exclude) => {
        $m.with_exclude()
    };
    ($m:expr, engine_serialized) => {
        $m.with_engine_serialized()
    };
    ($m:expr, engine_transient) => {
        $m.with_engine_transient()
    };
}

#[cfg(test)]
mod tests {
    use crate::{JsonObject, Number, Value};

    #[test]
    fn json_macro_primitives() {
        assert_eq!(json!(null), Value::Null);
        assert_eq!(json!(true), Value::Bool(true));
        assert_eq!(json!(false), Value::Bool(false));
        assert_eq!(json!(42), Value::Number(Number::from(42)));
        assert_eq!(
            json!(3.5),
            Value::Number(Number::from_f64(3.5).unwrap())
        );
        assert_eq!(json!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn json_macro_arrays() {
        assert_eq!(json!([]).to_json_string(), "[]");
        assert_eq!(json!([1, 2, 3]).to_json_string(), "[1,2,3]");
        assert_eq!(
            json!([1, [true, null], "x"]).to_json_string(),
            "[1,[true,null],\"x\"]"
        );
    }

    #[test]
    fn json_macro_objects() {
        assert_eq!(json!({}), Value::Object(JsonObject::new()));
        let obj = json!({
            "name": "Alice",
            "age": 30,
            "pets": ["cat", "dog"],
            "address": { "city": "Oslo" }
        });
        assert_eq!(
            obj.to_json_string(),
            "{\"name\":\"Alice\",\"age\":30,\"pets\":[\"cat\",\"dog\"],\"address\":{\"city\":\"Oslo\"}}"
        );
    }

    #[test]
    fn json_macro_takes_expressions() {
        let n = 6 * 7;
        let name = String::from("computed");
        assert_eq!(
            json!({ "n": n, "name": name }).to_json_string(),
            "{\"n\":42,\"name\":\"computed\"}"
        );
    }
}
