//! Tests for the `json!` literal builder and the `reflect!` field
//! registration macro.

use jsondoc::{
    from_value_with, serialize, serialize_with, DeserializeOptions, Error, JsonObject,
    SerializeOptions, Value,
};
use jsondoc::{json, reflect};

#[test]
fn json_macro_builds_nested_documents() {
    let doc = json!({
        "title": "inventory",
        "items": [
            { "id": 1, "name": "axe", "tags": ["tool", "weapon"] },
            { "id": 2, "name": "rope", "tags": [] }
        ],
        "owner": null
    });
    assert_eq!(
        doc.to_json_string(),
        "{\"title\":\"inventory\",\"items\":[{\"id\":1,\"name\":\"axe\",\"tags\":[\"tool\",\"weapon\"]},{\"id\":2,\"name\":\"rope\",\"tags\":[]}],\"owner\":null}"
    );
}

#[test]
fn json_macro_result_is_editable() {
    let doc = json!({ "count": 1 });
    let obj = doc.as_object().unwrap();
    obj.add_or_replace("count", 2).unwrap();
    obj.add("extra", true).unwrap();
    assert_eq!(obj.to_json_string(), "{\"count\":2,\"extra\":true}");
}

#[test]
fn json_macro_matches_parsed_text() {
    let built = json!({ "a": 1, "b": [true, null, "x"] });
    let parsed = Value::parse("{\"a\":1,\"b\":[true,null,\"x\"]}").unwrap();
    assert_eq!(built, parsed);
}

#[derive(Default, Debug, PartialEq)]
struct Enemy {
    kind: String,
    health: i32,
    loot: Vec<String>,
    spawn_chance: f64,
    internal_id: u64,
    cached_path: Option<String>,
}

reflect! {
    Enemy {
        kind: String => public,
        health: i32 => public,
        loot: Vec<String> => public,
        spawn_chance: f64 => [private, include],
        internal_id: u64 => [public, exclude],
        cached_path: Option<String> => private,
    }
}

#[test]
fn reflect_round_trip() {
    let enemy = Enemy {
        kind: "slime".to_string(),
        health: 20,
        loot: vec!["gel".to_string()],
        spawn_chance: 0.25,
        internal_id: 99,
        cached_path: Some("a/b".to_string()),
    };
    let obj = serialize(&enemy).unwrap();
    // Excluded and private fields stay out; the included private field is in.
    assert_eq!(
        obj.to_json_string(),
        "{\"kind\":\"slime\",\"health\":20,\"loot\":[\"gel\"],\"spawn_chance\":0.25}"
    );
    let back: Enemy = obj.deserialize().unwrap();
    assert_eq!(back.kind, enemy.kind);
    assert_eq!(back.spawn_chance, enemy.spawn_chance);
    // Unregistered data keeps its default.
    assert_eq!(back.internal_id, 0);
    assert_eq!(back.cached_path, None);
}

#[derive(Default, Debug, PartialEq)]
struct EngineComponent {
    visible: bool,
    runtime_handle: i64,
}

reflect! {
    EngineComponent {
        visible: bool => [private, engine_serialized],
        runtime_handle: i64 => [public, engine_transient],
    }
}

#[test]
fn engine_markers_respect_the_ignore_switch() {
    let component = EngineComponent {
        visible: true,
        runtime_handle: 7,
    };
    let obj = serialize(&component).unwrap();
    assert_eq!(obj.to_json_string(), "{\"visible\":true}");

    let options = SerializeOptions::new().with_ignore_engine_markers(true);
    let obj = serialize_with(&component, &options).unwrap();
    assert_eq!(obj.to_json_string(), "{\"runtime_handle\":7}");
}

#[derive(Default, Debug, PartialEq)]
struct Nested {
    inner: Enemy,
    label: String,
}

reflect! {
    Nested {
        inner: Enemy => public,
        label: String => public,
    }
}

#[test]
fn reflect_nests_registered_types() {
    let nested = Nested {
        inner: Enemy {
            kind: "bat".to_string(),
            ..Default::default()
        },
        label: "cave".to_string(),
    };
    let obj = serialize(&nested).unwrap();
    let back: Nested = obj.deserialize().unwrap();
    assert_eq!(back.inner.kind, "bat");
    assert_eq!(back.label, "cave");
}

#[test]
fn reflect_missing_field_names_the_type() {
    let obj = JsonObject::parse("{\"kind\":\"slime\"}").unwrap();
    let err = obj.deserialize::<Enemy>().unwrap_err();
    let Error::MissingField {
        field, type_name, ..
    } = err
    else {
        panic!("expected MissingField");
    };
    assert_eq!(field, "health");
    assert_eq!(type_name, "Enemy");
}

#[test]
fn reflect_types_work_with_from_value() {
    let value = json!({
        "kind": "ghost",
        "health": 5,
        "loot": [],
        "spawn_chance": 0.0
    });
    let options = DeserializeOptions::default();
    let enemy: Enemy = from_value_with(&value, &options).unwrap();
    assert_eq!(enemy.kind, "ghost");
}
