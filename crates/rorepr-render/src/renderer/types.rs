//! Domain type metadata: the type list, domain types, member and parameter
//! descriptions, and the `isSubtypeOf` type action.

use rorepr_core::{Rel, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;

use super::home::homepage_link;
use super::{RenderMode, ReprBuilder, Subject, expand, mismatch};
use crate::Result;
use crate::context::RendererContext;
use crate::link::{LinkBuilder, domain_type_link};
use crate::model::{ActionSpec, DomainType, MemberType, ParamSpec};

pub(super) fn render_type_list(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::TypeList(types) = subject else {
        return Err(mismatch(RepresentationType::TypeList, subject));
    };

    let mut repr = ReprBuilder::new(RepresentationType::TypeList, follow, mode);
    if repr.includes_self() {
        let link = LinkBuilder::new(
            ctx,
            Rel::SelfRel.name(),
            RepresentationType::TypeList,
            "domainTypes",
        );
        repr.link(link.build());
        repr.link(homepage_link(ctx, Rel::Up).build());
    }

    let mut values = Vec::with_capacity(types.len());
    for &domain_type in types {
        let link = domain_type_link(ctx, Rel::DomainType, &domain_type.id).build();
        let link = expand(repr.follow(), "values", link, |follow| {
            ctx.render_nested(follow, &Subject::DomainType(domain_type), RenderMode::Followed)
        })?;
        values.push(link.into_value());
    }
    repr.put("values", Value::Array(values));

    Ok(repr.finish())
}

pub(super) fn render_domain_type(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::DomainType(domain_type) = subject else {
        return Err(mismatch(RepresentationType::DomainType, subject));
    };
    DomainTypeRenderer::new(ctx, follow, mode, domain_type).render()
}

pub(super) fn render_property_description(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::PropertyDescription(owner, property) = subject else {
        return Err(mismatch(RepresentationType::PropertyDescription, subject));
    };

    let mut desc = DescriptionRenderer::new(
        ctx,
        follow,
        mode,
        RepresentationType::PropertyDescription,
        owner,
        member_description_path(owner, MemberType::Property, &property.id),
    );
    desc.header(&property.id, &property.name, property.description.as_deref());
    desc.type_link(Rel::ReturnType, &property.type_id)?;
    desc.repr.put("optional", property.optional);
    desc.repr.put_opt("maxLength", property.max_length);
    Ok(desc.finish())
}

pub(super) fn render_collection_description(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::CollectionDescription(owner, collection) = subject else {
        return Err(mismatch(RepresentationType::CollectionDescription, subject));
    };

    let mut desc = DescriptionRenderer::new(
        ctx,
        follow,
        mode,
        RepresentationType::CollectionDescription,
        owner,
        member_description_path(owner, MemberType::Collection, &collection.id),
    );
    desc.header(
        &collection.id,
        &collection.name,
        collection.description.as_deref(),
    );
    desc.type_link(Rel::ReturnType, "list")?;
    desc.type_link(Rel::ElementType, &collection.element_type)?;
    desc.repr
        .put("collectionSemantics", collection.semantics.name());
    Ok(desc.finish())
}

pub(super) fn render_action_description(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::ActionDescription(owner, action) = subject else {
        return Err(mismatch(RepresentationType::ActionDescription, subject));
    };

    let mut desc = DescriptionRenderer::new(
        ctx,
        follow,
        mode,
        RepresentationType::ActionDescription,
        owner,
        member_description_path(owner, MemberType::Action, &action.id),
    );
    desc.header(&action.id, &action.name, action.description.as_deref());
    if let Some(return_type) = &action.return_type {
        desc.type_link(Rel::ReturnType, return_type)?;
    }
    if let Some(element_type) = &action.element_type {
        desc.type_link(Rel::ElementType, element_type)?;
    }

    let mut parameters = Vec::with_capacity(action.parameters.len());
    for (number, param) in action.parameters.iter().enumerate() {
        let link = LinkBuilder::new(
            ctx,
            Rel::ActionParam.name(),
            RepresentationType::ActionParameterDescription,
            &param_description_path(owner, action, param),
        )
        .with_title(&param.name)
        .build();
        let link = expand(desc.repr.follow(), "parameters", link, |follow| {
            let subject = Subject::ActionParameterDescription {
                owner,
                action,
                param,
                number,
            };
            ctx.render_nested(follow, &subject, RenderMode::Followed)
        })?;
        parameters.push(link.into_value());
    }
    desc.repr.put("parameters", Value::Array(parameters));
    desc.repr.put("actionType", action.action_type.name());
    desc.repr
        .put("actionSemantics", action.semantics.name());
    Ok(desc.finish())
}

pub(super) fn render_param_description(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::ActionParameterDescription {
        owner,
        action,
        param,
        number,
    } = subject
    else {
        return Err(mismatch(
            RepresentationType::ActionParameterDescription,
            subject,
        ));
    };

    let mut desc = DescriptionRenderer::new(
        ctx,
        follow,
        mode,
        RepresentationType::ActionParameterDescription,
        owner,
        param_description_path(owner, action, param),
    );
    desc.up = Some(LinkBuilder::new(
        ctx,
        Rel::Up.name(),
        RepresentationType::ActionDescription,
        &member_description_path(owner, MemberType::Action, &action.id),
    ));
    desc.header(&param.id, &param.name, param.description.as_deref());
    desc.type_link(Rel::ReturnType, &param.type_id)?;
    desc.repr.put("number", *number);
    desc.repr.put("optional", param.optional);
    Ok(desc.finish())
}

pub(super) fn render_type_action_result(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::TypeActionResult {
        domain_type,
        supertype,
        value,
    } = subject
    else {
        return Err(mismatch(RepresentationType::TypeActionResult, subject));
    };

    let mut repr = ReprBuilder::new(RepresentationType::TypeActionResult, follow, mode);
    let link = LinkBuilder::new(
        ctx,
        Rel::SelfRel.name(),
        RepresentationType::TypeActionResult,
        &format!("{}/invoke", is_subtype_of_path(domain_type)),
    )
    .with_arguments(Representation::from_pairs([("supertype", *supertype)]).into_value());
    repr.link(link.build());
    repr.link(domain_type_link(ctx, Rel::Up, &domain_type.id).build());
    repr.put("value", *value);
    Ok(repr.finish())
}

fn member_description_path(owner: &DomainType, member_type: MemberType, member_id: &str) -> String {
    format!(
        "domainTypes/{}/{}/{}",
        owner.id,
        member_type.url_part(),
        member_id
    )
}

fn param_description_path(owner: &DomainType, action: &ActionSpec, param: &ParamSpec) -> String {
    format!(
        "{}/params/{}",
        member_description_path(owner, MemberType::Action, &action.id),
        param.id
    )
}

fn is_subtype_of_path(domain_type: &DomainType) -> String {
    format!("domainTypes/{}/typeactions/isSubtypeOf", domain_type.id)
}

struct DomainTypeRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
    domain_type: &'r DomainType,
}

impl<'r, 'a> DomainTypeRenderer<'r, 'a> {
    fn new(
        ctx: &'r RendererContext<'a>,
        follow: FollowSpecs,
        mode: RenderMode,
        domain_type: &'r DomainType,
    ) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(RepresentationType::DomainType, follow, mode),
            domain_type,
        }
    }

    fn render(mut self) -> Result<Representation> {
        let ctx = self.ctx;
        let domain_type = self.domain_type;

        if self.repr.includes_self() {
            self.repr
                .link(domain_type_link(ctx, Rel::SelfRel, &domain_type.id).build());
        }

        self.repr.put("name", domain_type.name.as_str());
        self.repr.put("domainType", domain_type.id.as_str());
        self.repr
            .put_opt("pluralName", domain_type.plural_name.as_deref());
        self.repr
            .put_opt("description", domain_type.description.as_deref());
        self.repr.put("isService", domain_type.is_service);

        let mut members = Vec::new();
        for property in &domain_type.properties {
            let link = self.member_link(Rel::Property, MemberType::Property, &property.id);
            members.push(self.expand_member(link, |follow| {
                ctx.render_nested(
                    follow,
                    &Subject::PropertyDescription(domain_type, property),
                    RenderMode::Followed,
                )
            })?);
        }
        for collection in &domain_type.collections {
            let link = self.member_link(Rel::Collection, MemberType::Collection, &collection.id);
            members.push(self.expand_member(link, |follow| {
                ctx.render_nested(
                    follow,
                    &Subject::CollectionDescription(domain_type, collection),
                    RenderMode::Followed,
                )
            })?);
        }
        for action in &domain_type.actions {
            let link = self.member_link(Rel::Action, MemberType::Action, &action.id);
            members.push(self.expand_member(link, |follow| {
                ctx.render_nested(
                    follow,
                    &Subject::ActionDescription(domain_type, action),
                    RenderMode::Followed,
                )
            })?);
        }
        self.repr.put("members", Value::Array(members));

        let is_subtype_of = LinkBuilder::new(
            ctx,
            Rel::Invoke.and_param("typeaction", "isSubtypeOf"),
            RepresentationType::TypeActionResult,
            &format!("{}/invoke", is_subtype_of_path(domain_type)),
        )
        .with_attr("id", "isSubtypeOf")
        .with_arguments(Representation::from_pairs([("supertype", Value::Null)]).into_value());
        self.repr.put("typeActions", vec![is_subtype_of.build().into_value()]);

        Ok(self.repr.finish())
    }

    fn member_link(&self, rel: Rel, member_type: MemberType, member_id: &str) -> Representation {
        let repr_type = match member_type {
            MemberType::Property => RepresentationType::PropertyDescription,
            MemberType::Collection => RepresentationType::CollectionDescription,
            MemberType::Action => RepresentationType::ActionDescription,
        };
        LinkBuilder::new(
            self.ctx,
            rel.name(),
            repr_type,
            &member_description_path(self.domain_type, member_type, member_id),
        )
        .with_attr(member_type.id_key(), member_id)
        .build()
    }

    fn expand_member(
        &self,
        link: Representation,
        nested: impl FnOnce(FollowSpecs) -> Result<Representation>,
    ) -> Result<Value> {
        Ok(expand(self.repr.follow(), "members", link, nested)?.into_value())
    }
}

/// Common shell of member and parameter descriptions.
struct DescriptionRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
    owner: &'r DomainType,
    path: String,
    up: Option<LinkBuilder>,
}

impl<'r, 'a> DescriptionRenderer<'r, 'a> {
    fn new(
        ctx: &'r RendererContext<'a>,
        follow: FollowSpecs,
        mode: RenderMode,
        repr_type: RepresentationType,
        owner: &'r DomainType,
        path: String,
    ) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(repr_type, follow, mode),
            owner,
            path,
            up: None,
        }
    }

    fn header(&mut self, id: &str, name: &str, description: Option<&str>) {
        let ctx = self.ctx;
        if self.repr.includes_self() {
            let link = LinkBuilder::new(ctx, Rel::SelfRel.name(), self.repr.repr_type(), &self.path);
            self.repr.link(link.build());
        }
        let up = self
            .up
            .take()
            .unwrap_or_else(|| domain_type_link(ctx, Rel::Up, &self.owner.id));
        self.repr.link(up.build());

        self.repr.put("id", id);
        self.repr.extension("friendlyName", name);
        self.repr.extension("description", description.unwrap_or_default());
    }

    /// Link to a domain type, expanded on `links` with that type's representation.
    fn type_link(&mut self, rel: Rel, type_id: &str) -> Result<()> {
        let ctx = self.ctx;
        let link = domain_type_link(ctx, rel, type_id).build();
        let Some(domain_type) = ctx.store().domain_type(type_id) else {
            self.repr.link(link);
            return Ok(());
        };
        self.repr.followable_link(link, |follow| {
            ctx.render_nested(follow, &Subject::DomainType(domain_type), RenderMode::Followed)
        })
    }

    fn finish(self) -> Representation {
        self.repr.finish()
    }
}
