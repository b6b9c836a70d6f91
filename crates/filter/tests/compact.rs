#![forbid(unsafe_code)]

use serde_json::{json, Map, Value};
use sift_filter::compact::compact;

fn obj(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn strips_null_and_placeholder_text() {
    let input = obj(json!({
        "foo": 1,
        "bar": null,
        "blat": "-",
        "blarg": "(empty)",
        "biz": "yo",
    }));
    let out = compact(&input);
    assert_eq!(Value::Object(out), json!({"foo": 1, "biz": "yo"}));
}

#[test]
fn keeps_numbers_and_booleans_unchanged() {
    let input = obj(json!({"count": 0, "ok": false, "ratio": 2.5, "gone": ""}));
    let out = compact(&input);
    assert_eq!(
        Value::Object(out),
        json!({"count": 0, "ok": false, "ratio": 2.5})
    );
}

#[test]
fn surviving_keys_keep_their_order() {
    let input = obj(json!({"z": 1, "dropped": null, "a": true, "m": "yo"}));
    let out = compact(&input);
    let keys: Vec<&str> = out.keys().map(|s| s.as_str()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn drops_mappings_that_prune_to_empty() {
    let input = obj(json!({"a": {"b": null, "c": ""}, "d": {"e": 5}}));
    let out = compact(&input);
    assert_eq!(Value::Object(out), json!({"d": {"e": 5}}));
}

#[test]
fn deep_nesting_collapses_bottom_up() {
    let input = obj(json!({"a": {"b": {"c": {"d": "-"}}}, "keep": 0}));
    let out = compact(&input);
    assert_eq!(Value::Object(out), json!({"keep": 0}));
}

#[test]
fn sequence_filtering_is_shallow() {
    let input = obj(json!({
        "seq": [null, "", "-", "(empty)", "kept", {"inner": ""}, [null]],
    }));
    let out = compact(&input);
    // null and placeholder text go; nested structures pass through verbatim,
    // even when they only hold empty members themselves
    assert_eq!(
        out.get("seq"),
        Some(&json!(["kept", {"inner": ""}, [null]]))
    );
}

#[test]
fn sequences_with_nothing_left_are_dropped() {
    let input = obj(json!({"seq": [null, "-", "(empty)", ""], "n": 7}));
    let out = compact(&input);
    assert_eq!(Value::Object(out), json!({"n": 7}));
}

#[test]
fn compact_is_idempotent() {
    let input = obj(json!({
        "foo": 1,
        "bar": null,
        "nested": {"x": "-", "y": {"z": "(empty)"}, "keep": [1, null, "ok"]},
        "tags": ["", "a"],
    }));
    let once = compact(&input);
    let twice = compact(&once);
    assert_eq!(once, twice);
}

#[test]
fn empty_input_stays_empty() {
    let out = compact(&Map::new());
    assert!(out.is_empty());
}
