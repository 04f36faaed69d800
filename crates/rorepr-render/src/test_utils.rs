//! Test fixtures and request helpers.

use rorepr_core::{Colors, Representation, Value};

use crate::{InMemoryStore, RendererRegistry, Request, Resources, Response};

pub const BASE_URI: &str = "http://localhost/restful/";

pub const DEMO_JSON: &str = include_str!("../fixtures/demo.json");

pub fn demo_store() -> InMemoryStore {
    InMemoryStore::from_json(DEMO_JSON).expect("demo fixture is valid")
}

/// Dispatches `request` against the demo fixture.
pub fn handle(request: Request) -> Response {
    let store = demo_store();
    let registry = RendererRegistry::with_defaults();
    Resources::new(&store, &registry, BASE_URI).handle(&request)
}

/// `GET target`, asserting success.
pub fn get_ok(target: &str) -> Representation {
    let response = handle(Request::get(target));
    assert_eq!(response.status, 200, "{}", response.body.format(true, Colors::OFF));
    response.body
}

/// `GET target` with `x-ro-follow-links`, asserting success.
pub fn get_following(target: &str, follow_links: &str) -> Representation {
    let response = handle(Request::get(target).with_follow_links(follow_links));
    assert_eq!(response.status, 200, "{}", response.body.format(true, Colors::OFF));
    response.body
}

/// Rels of the `links` list, in order.
pub fn rels(repr: &Representation) -> Vec<String> {
    links(repr)
        .iter()
        .filter_map(|l| l["rel"].as_str().map(str::to_string))
        .collect()
}

pub fn links(repr: &Representation) -> Vec<Value> {
    repr.get("links")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Whether the link carries an embedded `value`.
pub fn is_expanded(link: &Value) -> bool {
    link.get("value").is_some()
}

pub fn url(path: &str) -> String {
    format!("{BASE_URI}{path}")
}
