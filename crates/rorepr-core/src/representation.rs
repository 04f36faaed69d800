//! Ordered JSON document used for every rendered entity.
//!
//! Maps keep insertion order (`serde_json` with `preserve_order`), so a
//! representation serializes with keys in the order renderers wrote them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Colors;

/// A map or list document. Links are maps carrying at least `rel` and `href`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Representation(Value);

impl Representation {
    pub fn new_map() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn new_array() -> Self {
        Self(Value::Array(Vec::new()))
    }

    /// Map built from key/value pairs, in order.
    ///
    /// ```
    /// use rorepr_core::Representation;
    ///
    /// let repr = Representation::from_pairs([("x", "y"), ("z", "w")]);
    /// assert_eq!(repr.get_str("z"), Some("w"));
    /// ```
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<Map<String, Value>>();
        Self(Value::Object(map))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn is_map(&self) -> bool {
        self.0.is_object()
    }

    pub fn is_array(&self) -> bool {
        self.0.is_array()
    }

    /// Insert or replace `key`. No-op on a list.
    pub fn map_put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        debug_assert!(self.is_map(), "map_put on a list representation");
        if let Value::Object(map) = &mut self.0 {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Append to a list. No-op on a map.
    pub fn array_add(&mut self, value: impl Into<Value>) -> &mut Self {
        debug_assert!(self.is_array(), "array_add on a map representation");
        if let Value::Array(items) = &mut self.0 {
            items.push(value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|m| m.get(key))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Nested map or list under `key`, cloned into its own representation.
    pub fn get_representation(&self, key: &str) -> Option<Representation> {
        self.get(key)
            .filter(|v| v.is_object() || v.is_array())
            .cloned()
            .map(Self)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.0.as_array()
    }

    /// Entry count for maps, element count for lists.
    pub fn len(&self) -> usize {
        match &self.0 {
            Value::Object(m) => m.len(),
            Value::Array(a) => a.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// First map in the `links` list whose `rel` equals `rel`.
    pub fn link(&self, rel: &str) -> Option<Representation> {
        self.get("links")?
            .as_array()?
            .iter()
            .find(|l| l.get("rel").and_then(Value::as_str) == Some(rel))
            .cloned()
            .map(Self)
    }

    /// Format as JSON, optionally pretty-printed and colored.
    ///
    /// Color scheme (jq-inspired): keys blue, strings green, structure and `null` dim.
    pub fn format(&self, pretty: bool, colors: Colors) -> String {
        let mut out = String::new();
        format_value(&mut out, &self.0, &colors, pretty, 0);
        out
    }
}

impl From<Representation> for Value {
    fn from(repr: Representation) -> Self {
        repr.0
    }
}

impl From<Map<String, Value>> for Representation {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

impl From<Vec<Representation>> for Representation {
    fn from(items: Vec<Representation>) -> Self {
        Self(Value::Array(items.into_iter().map(Value::from).collect()))
    }
}

fn format_value(out: &mut String, value: &Value, c: &Colors, pretty: bool, indent: usize) {
    match value {
        Value::Null => punct(out, c, "null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            out.push_str(c.string);
            push_quoted(out, s);
            out.push_str(c.reset);
        }
        Value::Array(items) => format_array(out, items, c, pretty, indent),
        Value::Object(map) => format_object(out, map, c, pretty, indent),
    }
}

fn format_array(out: &mut String, items: &[Value], c: &Colors, pretty: bool, indent: usize) {
    punct(out, c, "[");
    if items.is_empty() {
        punct(out, c, "]");
        return;
    }

    let elem_indent = if pretty { indent + 2 } else { 0 };
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            punct(out, c, ",");
        }
        newline(out, pretty, elem_indent);
        format_value(out, item, c, pretty, elem_indent);
    }
    newline(out, pretty, indent);
    punct(out, c, "]");
}

fn format_object(
    out: &mut String,
    map: &Map<String, Value>,
    c: &Colors,
    pretty: bool,
    indent: usize,
) {
    punct(out, c, "{");
    if map.is_empty() {
        punct(out, c, "}");
        return;
    }

    let field_indent = if pretty { indent + 2 } else { 0 };
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            punct(out, c, ",");
        }
        newline(out, pretty, field_indent);

        out.push_str(c.key);
        push_quoted(out, key);
        out.push_str(c.reset);
        punct(out, c, ":");
        if pretty {
            out.push(' ');
        }

        format_value(out, value, c, pretty, field_indent);
    }
    newline(out, pretty, indent);
    punct(out, c, "}");
}

fn punct(out: &mut String, c: &Colors, s: &str) {
    c.paint(out, c.punct, s);
}

fn newline(out: &mut String, pretty: bool, indent: usize) {
    if pretty {
        out.push('\n');
        out.push_str(&" ".repeat(indent));
    }
}

fn push_quoted(out: &mut String, s: &str) {
    // serde_json's string escaping matches what `to_string` would emit
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
    }
}
