//! Per-request state shared by every renderer of one response.

use indexmap::IndexMap;
use rorepr_core::{MediaType, Representation, RepresentationType};
use rorepr_follow::{FOLLOW_LINKS_PARAM, FollowSpecs};
use tracing::debug;

use crate::renderer::{RenderMode, RendererRegistry, Subject};
use crate::store::DomainStore;
use crate::{RenderError, Result};

/// Decoded query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    args: IndexMap<String, Vec<String>>,
}

impl RequestParams {
    /// Decodes `application/x-www-form-urlencoded` pairs; a leading `?` is ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut args: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            args.entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self { args }
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.args.get(key).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    /// Arguments other than reserved `x-ro-*` ones, in query order.
    pub fn user_args(&self) -> impl Iterator<Item = (&str, &str)> {
        self.args
            .iter()
            .filter(|(k, _)| !k.starts_with("x-ro-"))
            .filter_map(|(k, v)| v.first().map(|first| (k.as_str(), first.as_str())))
    }

    /// Every `x-ro-follow-links` value, joined as further alternatives.
    pub fn follow_links(&self) -> Option<String> {
        let values: Vec<&str> = self
            .get_all(FOLLOW_LINKS_PARAM)
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();
        (!values.is_empty()).then(|| values.join(","))
    }

    pub fn follow_specs(&self) -> Result<FollowSpecs> {
        Ok(FollowSpecs::parse(self.follow_links().as_deref())?)
    }
}

/// Rejects an `Accept` header that admits no JSON, or asks for a different
/// profile than `produced`.
///
/// `*/*` and `application/*` admit JSON. Entries without a `profile`
/// parameter accept any profile. An unparseable header is ignored.
pub fn ensure_compatible_accept(accept: Option<&str>, produced: RepresentationType) -> Result<()> {
    let Some(accept) = accept else {
        return Ok(());
    };
    let entries = MediaType::parse_list(accept);
    if entries.is_empty() {
        return Ok(());
    }

    let json = MediaType::application_json();
    let compatible: Vec<&MediaType> = entries.iter().filter(|e| json.is_accepted_by(e)).collect();
    if compatible.is_empty() {
        debug!(accept, "accept admits no json");
        return Err(RenderError::NotJson(accept.to_string()));
    }

    let Some(produced_profile) = produced.media_type_profile() else {
        return Ok(());
    };
    for media_type in compatible {
        let Some(requested) = media_type.profile() else {
            continue;
        };
        if requested != produced_profile {
            debug!(requested, produced = %produced, "accept profile mismatch");
            return Err(RenderError::NotAcceptable {
                requested: requested.to_string(),
                produced: produced_profile,
            });
        }
    }
    Ok(())
}

/// Base URI, store, registry and the request's follow-links root.
pub struct RendererContext<'a> {
    base_uri: String,
    store: &'a dyn DomainStore,
    registry: &'a RendererRegistry,
    follow_links: FollowSpecs,
}

impl<'a> RendererContext<'a> {
    pub fn new(
        base_uri: impl Into<String>,
        store: &'a dyn DomainStore,
        registry: &'a RendererRegistry,
    ) -> Self {
        let mut base_uri = base_uri.into();
        if !base_uri.ends_with('/') {
            base_uri.push('/');
        }
        Self {
            base_uri,
            store,
            registry,
            follow_links: FollowSpecs::none(),
        }
    }

    pub fn with_follow_links(mut self, follow_links: FollowSpecs) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Absolute URL for a path relative to the base URI.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_uri, path.trim_start_matches('/'))
    }

    pub fn store(&self) -> &'a dyn DomainStore {
        self.store
    }

    pub fn registry(&self) -> &'a RendererRegistry {
        self.registry
    }

    pub fn follow_links(&self) -> &FollowSpecs {
        &self.follow_links
    }

    /// Renders the addressed resource from the request's follow-links root.
    pub fn render(&self, subject: &Subject<'_>) -> Result<Representation> {
        self.registry
            .render(self, self.follow_links.clone(), subject, RenderMode::Standalone)
    }

    /// Renders a nested representation with its own follow position.
    pub fn render_nested(
        &self,
        follow: FollowSpecs,
        subject: &Subject<'_>,
        mode: RenderMode,
    ) -> Result<Representation> {
        self.registry.render(self, follow, subject, mode)
    }
}
