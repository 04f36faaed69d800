#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the rorepr crates.
//!
//! - [`Representation`]: ordered JSON document (map or list) produced by renderers
//! - [`RepresentationType`]: the kinds of representation, each with its own media type
//! - [`MediaType`]: parsed `type/subtype;param="value"` values
//! - [`Rel`]: link relation names
//! - [`Colors`]: ANSI palette for terminal output

mod colors;
mod media_type;
mod rel;
mod repr_type;
mod representation;

#[cfg(test)]
mod repr_type_tests;
#[cfg(test)]
mod representation_tests;

pub use colors::Colors;
pub use media_type::{MediaType, ParseMediaTypeError};
pub use rel::Rel;
pub use repr_type::RepresentationType;
pub use representation::Representation;

/// Re-exported so downstream crates build values with the same `serde_json`.
pub use serde_json::{Map, Value, json};
