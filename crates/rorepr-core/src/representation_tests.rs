use serde_json::json;

use crate::{Colors, Representation};

#[test]
fn from_pairs_keeps_insertion_order() {
    let repr = Representation::from_pairs([("z", "1"), ("a", "2"), ("m", "3")]);
    let keys: Vec<&str> = repr
        .as_map()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn map_put_replaces_existing_key() {
    let mut repr = Representation::new_map();
    repr.map_put("rel", "self").map_put("rel", "up");
    assert_eq!(repr.get_str("rel"), Some("up"));
    assert_eq!(repr.len(), 1);
}

#[test]
fn array_add_appends() {
    let mut list = Representation::new_array();
    list.array_add(Representation::from_pairs([("rel", "self")]));
    list.array_add("x");
    assert_eq!(list.len(), 2);
    assert!(list.is_array());
}

#[test]
fn link_lookup_by_rel() {
    let repr = Representation::from_value(json!({
        "links": [
            {"rel": "self", "href": "http://localhost/"},
            {"rel": "up", "href": "http://localhost/up"}
        ]
    }));
    let up = repr.link("up").unwrap();
    assert_eq!(up.get_str("href"), Some("http://localhost/up"));
    assert!(repr.link("describedby").is_none());
}

#[test]
fn format_pretty() {
    let repr = Representation::from_value(json!({
        "rel": "self",
        "n": 1,
        "ok": true,
        "none": null,
        "args": {},
        "list": ["a\"b"]
    }));
    insta::assert_snapshot!(repr.format(true, Colors::OFF), @r#"
    {
      "rel": "self",
      "n": 1,
      "ok": true,
      "none": null,
      "args": {},
      "list": [
        "a\"b"
      ]
    }
    "#);
}

#[test]
fn format_compact_matches_serde() {
    let repr = Representation::from_value(json!({"a": [1, {"b": null}], "c": "d"}));
    assert_eq!(
        repr.format(false, Colors::OFF),
        serde_json::to_string(&repr).unwrap()
    );
}

#[test]
fn format_colored_wraps_keys_and_strings() {
    let repr = Representation::from_pairs([("k", "v")]);
    let out = repr.format(false, Colors::ON);
    assert!(out.contains("\x1b[34m\"k\"\x1b[0m"));
    assert!(out.contains("\x1b[32m\"v\"\x1b[0m"));
    assert!(out.starts_with("\x1b[2m{\x1b[0m"));
}

#[test]
fn colors_off_paints_nothing() {
    assert!(!Colors::new(false).is_enabled());
    assert!(Colors::new(true).is_enabled());
    assert_eq!(Colors::default(), Colors::OFF);

    let mut out = String::new();
    Colors::OFF.paint(&mut out, Colors::OFF.punct, "null");
    assert_eq!(out, "null");

    let repr = Representation::from_pairs([("k", "v")]);
    assert_eq!(repr.format(false, Colors::OFF), r#"{"k":"v"}"#);
}
