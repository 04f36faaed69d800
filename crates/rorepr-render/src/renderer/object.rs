use rorepr_core::{Map, Rel, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;

use super::{RenderMode, ReprBuilder, Subject, mismatch};
use crate::context::RendererContext;
use crate::link::{domain_type_link, object_link};
use crate::model::{DomainObject, DomainType, MemberType};
use crate::{RenderError, Result};

pub(super) fn render(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::DomainObject(object) = subject else {
        return Err(mismatch(RepresentationType::DomainObject, subject));
    };
    DomainObjectRenderer::new(ctx, follow, mode, object).render()
}

/// Attributes the `members` follow segment is matched against, e.g.
/// `{"propertyId": "name", "memberType": "property"}`.
pub(crate) fn member_attrs(member_type: MemberType, member_id: &str) -> Representation {
    Representation::from_pairs([
        (member_type.id_key(), member_id),
        ("memberType", member_type.name()),
    ])
}

struct DomainObjectRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
    object: &'r DomainObject,
}

impl<'r, 'a> DomainObjectRenderer<'r, 'a> {
    fn new(
        ctx: &'r RendererContext<'a>,
        follow: FollowSpecs,
        mode: RenderMode,
        object: &'r DomainObject,
    ) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(RepresentationType::DomainObject, follow, mode),
            object,
        }
    }

    fn render(mut self) -> Result<Representation> {
        let ctx = self.ctx;
        let object = self.object;
        let domain_type = ctx
            .store()
            .domain_type(&object.domain_type)
            .ok_or_else(|| RenderError::UnknownDomainType(object.domain_type.clone()))?;

        if self.repr.includes_self() {
            self.repr.link(object_link(ctx, Rel::SelfRel, object).build());
        }
        let described_by = domain_type_link(ctx, Rel::DescribedBy, &object.domain_type);
        self.repr.followable_link(described_by.build(), |follow| {
            ctx.render_nested(follow, &Subject::DomainType(domain_type), RenderMode::Followed)
        })?;

        if let Some(service_id) = &object.service_id {
            self.repr.put("serviceId", service_id.as_str());
        }
        self.repr.put("domainType", object.domain_type.as_str());
        self.repr.put("instanceId", object.instance_id.as_str());
        self.repr.put("title", object.title.as_str());

        let members = self.members(domain_type)?;
        self.repr.put("members", Value::Object(members));

        self.repr.extension("domainType", domain_type.name.as_str());
        self.repr.extension("isService", object.is_service());
        self.repr.extension("isPersistent", object.persistent);

        Ok(self.repr.finish())
    }

    /// Visible members keyed by id, each rendered inline.
    fn members(&self, domain_type: &DomainType) -> Result<Map<String, Value>> {
        let object = self.object;
        let mut members = Map::new();

        for property in &domain_type.properties {
            if let Some(repr) =
                self.member(MemberType::Property, &property.id, &Subject::Property(object, property))?
            {
                members.insert(property.id.clone(), repr.into_value());
            }
        }
        for collection in &domain_type.collections {
            if let Some(repr) = self.member(
                MemberType::Collection,
                &collection.id,
                &Subject::Collection(object, collection),
            )? {
                members.insert(collection.id.clone(), repr.into_value());
            }
        }
        for action in &domain_type.actions {
            if let Some(repr) =
                self.member(MemberType::Action, &action.id, &Subject::Action(object, action))?
            {
                members.insert(action.id.clone(), repr.into_value());
            }
        }

        Ok(members)
    }

    /// `None` when the member is hidden.
    fn member(
        &self,
        member_type: MemberType,
        member_id: &str,
        subject: &Subject<'_>,
    ) -> Result<Option<Representation>> {
        if self.object.visibility(member_id).is_vetoed() {
            return Ok(None);
        }
        let attrs = member_attrs(member_type, member_id);
        let follow = self
            .repr
            .follow()
            .follow_matching("members", &attrs)
            .unwrap_or_else(FollowSpecs::terminated);
        self.ctx
            .render_nested(follow, subject, RenderMode::Inline)
            .map(Some)
    }
}
