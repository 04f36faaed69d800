//! Restful Objects representation renderers.
//!
//! - `model` - domain types, objects and invocations the renderers consume
//! - `store` - the [`DomainStore`] capability trait and a JSON-backed store
//! - `context` - per-request state: base URI, follow-links root, registry
//! - `link` - link construction
//! - `renderer` - one renderer per representation kind, and their registry
//! - `resources` - request dispatch onto renderers
//!
//! # Example
//!
//! ```
//! use rorepr_render::{InMemoryStore, RendererRegistry, Request, Resources};
//!
//! let store = InMemoryStore::from_json(r#"{"user": {"userName": "sven"}}"#).unwrap();
//! let registry = RendererRegistry::with_defaults();
//! let resources = Resources::new(&store, &registry, "http://localhost/");
//!
//! let response = resources.handle(&Request::get("/").with_follow_links("links[rel=urn:org.restfulobjects:rels/user]"));
//! assert_eq!(response.status, 200);
//! let user = response.body.link("urn:org.restfulobjects:rels/user").unwrap();
//! assert_eq!(user.get("value").unwrap()["userName"], "sven");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod context;
mod error;
pub mod link;
pub mod model;
pub mod renderer;
pub mod resources;
pub mod store;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod resources_tests;
#[cfg(test)]
mod store_tests;
#[cfg(test)]
pub mod test_utils;

pub use context::{RendererContext, RequestParams};
pub use error::{RenderError, Result};
pub use renderer::{RenderFn, RenderMode, RendererRegistry, Subject};
pub use resources::{Request, Resources, Response};
pub use store::{DomainStore, InMemoryStore};
