use rorepr_core::{Map, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;
use tracing::trace;

use super::RenderMode;
use crate::Result;

/// Shared shell of every representation: `links` first, own fields, `extensions` last.
pub(crate) struct ReprBuilder {
    repr_type: RepresentationType,
    follow: FollowSpecs,
    mode: RenderMode,
    links: Vec<Value>,
    fields: Map<String, Value>,
    extensions: Map<String, Value>,
}

impl ReprBuilder {
    pub(crate) fn new(repr_type: RepresentationType, follow: FollowSpecs, mode: RenderMode) -> Self {
        Self {
            repr_type,
            follow,
            mode,
            links: Vec::new(),
            fields: Map::new(),
            extensions: Map::new(),
        }
    }

    pub(crate) fn repr_type(&self) -> RepresentationType {
        self.repr_type
    }

    pub(crate) fn follow(&self) -> &FollowSpecs {
        &self.follow
    }

    pub(crate) fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Everything but inline members links to itself.
    pub(crate) fn includes_self(&self) -> bool {
        !self.mode.is_inline()
    }

    pub(crate) fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub(crate) fn put_opt(&mut self, key: &str, value: Option<impl Into<Value>>) {
        if let Some(value) = value {
            self.put(key, value);
        }
    }

    pub(crate) fn link(&mut self, link: Representation) {
        self.links.push(link.into_value());
    }

    /// Adds `link`, embedding `nested` under `value` when `links` is followed and matches.
    pub(crate) fn followable_link(
        &mut self,
        link: Representation,
        nested: impl FnOnce(FollowSpecs) -> Result<Representation>,
    ) -> Result<()> {
        let link = expand(&self.follow, "links", link, nested)?;
        self.link(link);
        Ok(())
    }

    pub(crate) fn extension(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extensions.insert(key.into(), value.into());
    }

    pub(crate) fn finish(self) -> Representation {
        let mut map = Map::new();
        map.insert("links".to_string(), Value::Array(self.links));
        map.extend(self.fields);
        map.insert("extensions".to_string(), Value::Object(self.extensions));
        Representation::from(map)
    }
}

/// Embeds `nested` under the link's `value` iff `segment` is followed from
/// `follow` and its criteria accept the link.
pub(crate) fn expand(
    follow: &FollowSpecs,
    segment: &str,
    mut link: Representation,
    nested: impl FnOnce(FollowSpecs) -> Result<Representation>,
) -> Result<Representation> {
    let Some(child) = follow.follow_matching(segment, &link) else {
        return Ok(link);
    };
    trace!(segment, rel = link.get_str("rel"), "following link");
    let value = nested(child)?;
    link.map_put("value", value.into_value());
    Ok(link)
}
