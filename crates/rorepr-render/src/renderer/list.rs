use rorepr_core::{Rel, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;

use super::home::homepage_link;
use super::{RenderMode, ReprBuilder, Subject, expand, mismatch};
use crate::Result;
use crate::context::RendererContext;
use crate::link::{LinkBuilder, domain_type_link, object_link};
use crate::model::DomainObject;

pub(super) fn render_list(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    match subject {
        Subject::Services(services) => ListRenderer::new(ctx, follow, mode, services)
            .services()
            .render(),
        Subject::List {
            objects,
            return_type,
            element_type,
        } => ListRenderer::new(ctx, follow, mode, objects)
            .with_return_type(*return_type)
            .with_element_type(*element_type)
            .render(),
        _ => Err(mismatch(RepresentationType::List, subject)),
    }
}

pub(super) fn render_scalar(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::ScalarValue { value, return_type } = subject else {
        return Err(mismatch(RepresentationType::ScalarValue, subject));
    };

    let mut repr = ReprBuilder::new(RepresentationType::ScalarValue, follow, mode);
    if let Some(return_type) = return_type {
        repr.link(domain_type_link(ctx, Rel::ReturnType, return_type).build());
    }
    repr.put("value", (*value).clone());
    Ok(repr.finish())
}

/// Links to a list of objects; each element link may be followed through `value`.
struct ListRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
    objects: &'r [&'r DomainObject],
    services: bool,
    return_type: Option<&'r str>,
    element_type: Option<&'r str>,
}

impl<'r, 'a> ListRenderer<'r, 'a> {
    fn new(
        ctx: &'r RendererContext<'a>,
        follow: FollowSpecs,
        mode: RenderMode,
        objects: &'r [&'r DomainObject],
    ) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(RepresentationType::List, follow, mode),
            objects,
            services: false,
            return_type: None,
            element_type: None,
        }
    }

    fn services(mut self) -> Self {
        self.services = true;
        self
    }

    fn with_return_type(mut self, return_type: Option<&'r str>) -> Self {
        self.return_type = return_type;
        self
    }

    fn with_element_type(mut self, element_type: Option<&'r str>) -> Self {
        self.element_type = element_type;
        self
    }

    fn render(mut self) -> Result<Representation> {
        let ctx = self.ctx;

        if self.services && self.repr.includes_self() {
            let link = LinkBuilder::new(ctx, Rel::SelfRel.name(), RepresentationType::List, "services");
            self.repr.link(link.build());
            self.repr.link(homepage_link(ctx, Rel::Up).build());
        }

        let rel = if self.services { Rel::Service } else { Rel::Value };
        let mut values = Vec::with_capacity(self.objects.len());
        for &object in self.objects {
            let link = object_link(ctx, rel, object).build();
            let link = expand(self.repr.follow(), "value", link, |follow| {
                ctx.render_nested(follow, &Subject::DomainObject(object), RenderMode::Followed)
            })?;
            values.push(link.into_value());
        }
        self.repr.put("value", Value::Array(values));

        if let Some(return_type) = self.return_type {
            self.repr
                .link(domain_type_link(ctx, Rel::ReturnType, return_type).build());
        }
        if let Some(element_type) = self.element_type {
            self.repr
                .link(domain_type_link(ctx, Rel::ElementType, element_type).build());
        }

        Ok(self.repr.finish())
    }
}
