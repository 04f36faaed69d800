//! Minimal media type model: `type/subtype` plus ordered parameters.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid media type `{0}`")]
pub struct ParseMediaTypeError(String);

/// A media type such as `application/json;profile="urn:org.restfulobjects:repr-types/user"`.
///
/// Type, subtype and parameter names are lowercased on construction; parameter
/// values keep their case and are stored without surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    kind: String,
    subtype: String,
    params: IndexMap<String, String>,
}

impl MediaType {
    pub fn new(kind: &str, subtype: &str) -> Self {
        Self {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            params: IndexMap::new(),
        }
    }

    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn profile(&self) -> Option<&str> {
        self.param("profile")
    }

    /// Same `type/subtype`, ignoring parameters.
    pub fn is_same_type(&self, other: &MediaType) -> bool {
        self.kind == other.kind && self.subtype == other.subtype
    }

    /// Whether an `Accept` entry admits `self`, honouring `*` wildcards.
    pub fn is_accepted_by(&self, accepted: &MediaType) -> bool {
        let kind_ok = accepted.kind == "*" || accepted.kind == self.kind;
        let subtype_ok = accepted.subtype == "*" || accepted.subtype == self.subtype;
        kind_ok && subtype_ok
    }

    /// Parses a comma-separated `Accept` header value, skipping unparseable entries.
    pub fn parse_list(header: &str) -> Vec<MediaType> {
        split_outside_quotes(header, ',')
            .into_iter()
            .filter_map(|part| part.parse().ok())
            .collect()
    }
}

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMediaTypeError(s.to_owned());
        let mut parts = split_outside_quotes(s, ';').into_iter();
        let essence = parts.next().ok_or_else(err)?;
        let (kind, subtype) = essence.split_once('/').ok_or_else(err)?;
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() {
            return Err(err());
        }

        let mut media_type = MediaType::new(kind, subtype);
        for param in parts {
            let (name, value) = param.split_once('=').ok_or_else(err)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(err());
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            media_type = media_type.with_param(name, value);
        }
        Ok(media_type)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)?;
        for (name, value) in &self.params {
            write!(f, ";{}=\"{}\"", name, value)?;
        }
        Ok(())
    }
}

fn split_outside_quotes(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == sep && !in_quotes {
            parts.push(s[start..i].trim());
            start = i + ch.len_utf8();
        }
    }
    parts.push(s[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}
