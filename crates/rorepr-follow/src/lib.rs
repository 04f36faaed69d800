//! Link-follow specifications for `x-ro-follow-links`.
//!
//! # Example
//!
//! ```
//! use rorepr_core::{Representation, json};
//! use rorepr_follow::FollowSpecs;
//!
//! let specs = FollowSpecs::parse(Some("links[rel=describedby].value")).unwrap();
//! let links = specs.follow("links");
//! assert!(links.is_following());
//!
//! let link = Representation::from_value(json!({"rel": "describedby", "href": "/x"}));
//! assert!(links.matches(&link));
//! assert!(specs.follow("members").is_terminated());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod follow;
pub mod parser;
pub mod path;


pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use follow::FollowSpecs;
pub use path::{Criteria, Path, PathSpec, Segment};

/// Name of the query parameter carrying the expression.
pub const FOLLOW_LINKS_PARAM: &str = "x-ro-follow-links";

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("invalid x-ro-follow-links `{expr}` ({} errors)", .diagnostics.error_count())]
    FollowLinksParseError {
        expr: String,
        diagnostics: Diagnostics,
    },
}

impl Error {
    /// Diagnostics with source snippets.
    pub fn render(&self, colored: bool) -> String {
        match self {
            Error::FollowLinksParseError { expr, diagnostics } => diagnostics
                .printer(expr)
                .path(FOLLOW_LINKS_PARAM)
                .colored(colored)
                .render(),
        }
    }

    /// One line per diagnostic, for places without a terminal.
    pub fn render_plain(&self) -> String {
        match self {
            Error::FollowLinksParseError { expr, diagnostics } => {
                diagnostics.printer(expr).render_plain()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
