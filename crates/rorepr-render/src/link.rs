//! Link construction.

use rorepr_core::{Rel, Representation, RepresentationType, Value};

use crate::context::RendererContext;
use crate::model::{DomainObject, DomainType, HttpMethod, ObjectRef};

/// Builds a link map: `rel`, `href`, `method`, `type`, then optional extras.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    rel: String,
    href: String,
    method: HttpMethod,
    repr_type: RepresentationType,
    title: Option<String>,
    arguments: Option<Value>,
    attrs: Vec<(String, Value)>,
}

impl LinkBuilder {
    pub fn new(
        ctx: &RendererContext<'_>,
        rel: impl Into<String>,
        repr_type: RepresentationType,
        path: &str,
    ) -> Self {
        Self {
            rel: rel.into(),
            href: ctx.url_for(path),
            method: HttpMethod::Get,
            repr_type,
            title: None,
            arguments: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_arguments(mut self, arguments: impl Into<Value>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    /// Extra attribute, usable as a follow-links criteria key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Representation {
        let mut link = Representation::new_map();
        link.map_put("rel", self.rel)
            .map_put("href", self.href)
            .map_put("method", self.method.name())
            .map_put("type", self.repr_type.media_type().to_string());
        if let Some(title) = self.title {
            link.map_put("title", title);
        }
        for (key, value) in self.attrs {
            link.map_put(key, value);
        }
        if let Some(arguments) = self.arguments {
            link.map_put("arguments", arguments);
        }
        link
    }
}

/// Link to a domain object. Services get a `serviceId`-qualified rel when `rel` is `service`.
pub fn object_link(ctx: &RendererContext<'_>, rel: Rel, object: &DomainObject) -> LinkBuilder {
    let rel_name = match (&object.service_id, rel) {
        (Some(service_id), Rel::Service) => rel.and_param("serviceId", service_id),
        _ => rel.name().to_string(),
    };
    let mut builder = LinkBuilder::new(
        ctx,
        rel_name,
        RepresentationType::DomainObject,
        &object.href_path(),
    )
    .with_title(&object.title);
    if let Some(service_id) = &object.service_id {
        builder = builder.with_attr("serviceId", service_id.as_str());
    }
    builder
}

/// Link to an object known only by reference; the title is filled in when the store has it.
pub fn ref_link(ctx: &RendererContext<'_>, rel: Rel, oid: &ObjectRef) -> LinkBuilder {
    match ctx.store().object(oid) {
        Some(object) => object_link(ctx, rel, object),
        None => LinkBuilder::new(
            ctx,
            rel.name(),
            RepresentationType::DomainObject,
            &format!("objects/{}/{}", oid.domain_type, oid.instance_id),
        ),
    }
}

pub fn domain_type_link(ctx: &RendererContext<'_>, rel: Rel, type_id: &str) -> LinkBuilder {
    let builder = LinkBuilder::new(
        ctx,
        rel.name(),
        RepresentationType::DomainType,
        &format!("domainTypes/{type_id}"),
    );
    match ctx.store().domain_type(type_id) {
        Some(DomainType { name, .. }) => builder.with_title(name),
        None => builder,
    }
}
