//! Resilient parser for follow-links expressions.
//!
//! # Grammar
//!
//! ```text
//! spec     = [ path { "," path } ]
//! path     = segment { "." segment }
//! segment  = NAME [ CRITERIA ]
//! CRITERIA = "[" clause { WS clause } "]"
//! clause   = key "=" value          (split on the first "=")
//! ```
//!
//! Whitespace between tokens is trivia. The parser never stops at the first
//! problem: every error in the input is recorded in [`Diagnostics`] and the
//! well-formed paths are still returned.

mod grammar;
pub mod lexer;

use crate::diagnostics::Diagnostics;
use crate::path::PathSpec;

use grammar::Parser;

#[derive(Debug, Clone, Default)]
pub struct Parse {
    spec: PathSpec,
    diagnostics: Diagnostics,
}

impl Parse {
    /// Paths that parsed cleanly. Paths with errors are left out.
    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn into_parts(self) -> (PathSpec, Diagnostics) {
        (self.spec, self.diagnostics)
    }
}

/// Parses a follow-links expression. Empty or blank input yields an empty spec.
pub fn parse(source: &str) -> Parse {
    let tokens = lexer::lex(source);
    let (spec, diagnostics) = Parser::new(source, tokens).parse_spec();
    Parse { spec, diagnostics }
}
