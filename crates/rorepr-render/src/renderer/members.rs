//! Object members: properties, collections and actions.
//!
//! Inline members carry a `details` link; every other mode links to itself,
//! its owner and its description, and adds mutator links while the member is
//! usable.

use rorepr_core::{Map, Rel, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;

use super::{RenderMode, ReprBuilder, Subject, expand, mismatch};
use crate::context::RendererContext;
use crate::link::{LinkBuilder, domain_type_link, object_link, ref_link};
use crate::model::{
    ActionSpec, CollectionSemantics, CollectionSpec, DomainObject, DomainType, HttpMethod,
    MemberType, ParamSpec, PropertySpec, PropertyValue,
};
use crate::{RenderError, Result};

pub(super) fn render_property(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::Property(object, property) = subject else {
        return Err(mismatch(RepresentationType::ObjectProperty, subject));
    };
    let mut member = MemberRenderer::new(
        ctx,
        follow,
        mode,
        object,
        MemberType::Property,
        &property.id,
    );
    member.render_common(
        |follow| {
            ctx.render_nested(follow, &Subject::Property(object, property), RenderMode::Followed)
        },
        |follow| {
            let owner = owner_type(ctx, object)?;
            let subject = Subject::PropertyDescription(owner, property);
            ctx.render_nested(follow, &subject, RenderMode::Followed)
        },
    )?;
    member.property(property)?;
    Ok(member.finish())
}

pub(super) fn render_collection(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::Collection(object, collection) = subject else {
        return Err(mismatch(RepresentationType::ObjectCollection, subject));
    };
    let mut member = MemberRenderer::new(
        ctx,
        follow,
        mode,
        object,
        MemberType::Collection,
        &collection.id,
    );
    member.render_common(
        |follow| {
            ctx.render_nested(
                follow,
                &Subject::Collection(object, collection),
                RenderMode::Followed,
            )
        },
        |follow| {
            let owner = owner_type(ctx, object)?;
            let subject = Subject::CollectionDescription(owner, collection);
            ctx.render_nested(follow, &subject, RenderMode::Followed)
        },
    )?;
    member.collection(collection)?;
    Ok(member.finish())
}

pub(super) fn render_action(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::Action(object, action) = subject else {
        return Err(mismatch(RepresentationType::ObjectAction, subject));
    };
    let mut member =
        MemberRenderer::new(ctx, follow, mode, object, MemberType::Action, &action.id);
    member.render_common(
        |follow| {
            ctx.render_nested(follow, &Subject::Action(object, action), RenderMode::Followed)
        },
        |follow| {
            let owner = owner_type(ctx, object)?;
            let subject = Subject::ActionDescription(owner, action);
            ctx.render_nested(follow, &subject, RenderMode::Followed)
        },
    )?;
    member.action(action)?;
    Ok(member.finish())
}

/// Path of an action's invoke resource. Contributed actions are invoked on the contributee.
pub(crate) fn invoke_path(object: &DomainObject, action: &ActionSpec) -> String {
    format!(
        "{}/invoke",
        object.member_href_path(MemberType::Action, &action.id)
    )
}

/// Domain type the member's description is published under.
fn owner_type<'c>(ctx: &RendererContext<'c>, object: &DomainObject) -> Result<&'c DomainType> {
    ctx.store()
        .domain_type(&object.domain_type)
        .ok_or_else(|| RenderError::UnknownDomainType(object.domain_type.clone()))
}

fn description_repr_type(member_type: MemberType) -> RepresentationType {
    match member_type {
        MemberType::Property => RepresentationType::PropertyDescription,
        MemberType::Collection => RepresentationType::CollectionDescription,
        MemberType::Action => RepresentationType::ActionDescription,
    }
}

fn member_repr_type(member_type: MemberType) -> RepresentationType {
    match member_type {
        MemberType::Property => RepresentationType::ObjectProperty,
        MemberType::Collection => RepresentationType::ObjectCollection,
        MemberType::Action => RepresentationType::ObjectAction,
    }
}

struct MemberRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
    object: &'r DomainObject,
    member_type: MemberType,
    member_id: &'r str,
}

impl<'r, 'a> MemberRenderer<'r, 'a> {
    fn new(
        ctx: &'r RendererContext<'a>,
        follow: FollowSpecs,
        mode: RenderMode,
        object: &'r DomainObject,
        member_type: MemberType,
        member_id: &'r str,
    ) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(member_repr_type(member_type), follow, mode),
            object,
            member_type,
            member_id,
        }
    }

    fn path(&self) -> String {
        self.object.member_href_path(self.member_type, self.member_id)
    }

    fn is_usable(&self) -> bool {
        self.object.usability(self.member_id).is_allowed()
    }

    /// Mutators are offered on the member's own resource, never inline.
    fn offers_mutators(&self) -> bool {
        !self.repr.mode().is_inline() && self.is_usable()
    }

    /// `details` renders the member for an inline `details` link, `describe`
    /// its description for `describedby`. Each runs only if its link is followed.
    fn render_common(
        &mut self,
        details: impl FnOnce(FollowSpecs) -> Result<Representation>,
        describe: impl FnOnce(FollowSpecs) -> Result<Representation>,
    ) -> Result<()> {
        let ctx = self.ctx;
        let repr_type = self.repr.repr_type();
        let path = self.path();

        self.repr.put("id", self.member_id);
        self.repr.put("memberType", self.member_type.name());

        if self.repr.mode().is_inline() {
            let link = LinkBuilder::new(ctx, Rel::Details.name(), repr_type, &path);
            self.repr.followable_link(link.build(), details)?;
        } else {
            self.repr
                .link(LinkBuilder::new(ctx, Rel::SelfRel.name(), repr_type, &path).build());
            self.repr.link(object_link(ctx, Rel::Up, self.object).build());
            let description = LinkBuilder::new(
                ctx,
                Rel::DescribedBy.name(),
                description_repr_type(self.member_type),
                &format!(
                    "domainTypes/{}/{}/{}",
                    self.object.domain_type,
                    self.member_type.url_part(),
                    self.member_id
                ),
            );
            self.repr.followable_link(description.build(), describe)?;
        }

        if let Some(reason) = self.object.usability(self.member_id).reason() {
            self.repr.put("disabledReason", reason);
        }
        Ok(())
    }

    fn property(&mut self, property: &PropertySpec) -> Result<()> {
        let ctx = self.ctx;

        let value = match self.object.properties.get(&property.id) {
            None => Value::Null,
            Some(PropertyValue::Scalar(value)) => value.clone(),
            Some(PropertyValue::Reference(oid)) => {
                let link = ref_link(ctx, Rel::Value, oid).build();
                let link = expand(self.repr.follow(), "value", link, |follow| {
                    let target = ctx
                        .store()
                        .object(oid)
                        .ok_or_else(|| RenderError::UnknownObject(oid.to_string()))?;
                    ctx.render_nested(follow, &Subject::DomainObject(target), RenderMode::Followed)
                })?;
                link.into_value()
            }
        };
        self.repr.put("value", value);

        if self.offers_mutators() {
            let path = self.path();
            let modify = LinkBuilder::new(
                ctx,
                Rel::Modify.name(),
                RepresentationType::ObjectProperty,
                &path,
            )
            .with_method(HttpMethod::Put)
            .with_arguments(Representation::from_pairs([("value", Value::Null)]).into_value());
            self.repr.link(modify.build());
            if property.optional {
                let clear = LinkBuilder::new(
                    ctx,
                    Rel::Clear.name(),
                    RepresentationType::ObjectProperty,
                    &path,
                )
                .with_method(HttpMethod::Delete);
                self.repr.link(clear.build());
            }
        }

        self.repr.extension("friendlyName", property.name.as_str());
        self.repr.extension("returnType", property.type_id.as_str());
        self.repr.extension("optional", property.optional);
        if let Some(max_length) = property.max_length {
            self.repr.extension("maxLength", max_length);
        }
        if let Some(description) = &property.description {
            self.repr.extension("description", description.as_str());
        }
        Ok(())
    }

    fn collection(&mut self, collection: &CollectionSpec) -> Result<()> {
        let ctx = self.ctx;

        // Elements of persistent objects are only listed on the collection's own resource.
        if self.repr.mode().is_detailed() || !self.object.persistent {
            let elements = self
                .object
                .collections
                .get(&collection.id)
                .map_or(&[][..], Vec::as_slice);
            let mut values = Vec::with_capacity(elements.len());
            for oid in elements {
                let link = ref_link(ctx, Rel::Value, oid).build();
                let link = expand(self.repr.follow(), "value", link, |follow| {
                    let target = ctx
                        .store()
                        .object(oid)
                        .ok_or_else(|| RenderError::UnknownObject(oid.to_string()))?;
                    ctx.render_nested(follow, &Subject::DomainObject(target), RenderMode::Followed)
                })?;
                values.push(link.into_value());
            }
            self.repr.put("value", Value::Array(values));
        }

        if self.offers_mutators() {
            let path = self.path();
            let add_method = match collection.semantics {
                CollectionSemantics::List => HttpMethod::Post,
                CollectionSemantics::Set => HttpMethod::Put,
            };
            let arguments = Representation::from_pairs([("value", Value::Null)]).into_value();
            let add_to = LinkBuilder::new(
                ctx,
                Rel::AddTo.name(),
                RepresentationType::ObjectCollection,
                &path,
            )
            .with_method(add_method)
            .with_arguments(arguments.clone());
            let remove_from = LinkBuilder::new(
                ctx,
                Rel::RemoveFrom.name(),
                RepresentationType::ObjectCollection,
                &path,
            )
            .with_method(HttpMethod::Delete)
            .with_arguments(arguments);
            self.repr.link(add_to.build());
            self.repr.link(remove_from.build());
        }

        self.repr.extension("friendlyName", collection.name.as_str());
        self.repr
            .extension("collectionSemantics", collection.semantics.name());
        self.repr
            .extension("elementType", collection.element_type.as_str());
        if let Some(description) = &collection.description {
            self.repr.extension("description", description.as_str());
        }
        Ok(())
    }

    fn action(&mut self, action: &ActionSpec) -> Result<()> {
        let ctx = self.ctx;

        if let Some(service_id) = &action.contributed_by {
            let service = ctx
                .store()
                .service(service_id)
                .ok_or_else(|| RenderError::UnknownService(service_id.clone()))?;
            self.repr
                .link(object_link(ctx, Rel::ContributedBy, service).build());
        }

        if self.offers_mutators() {
            let arguments: Map<String, Value> = action
                .parameters
                .iter()
                .map(|param| (param.id.clone(), self.default_argument(action, param)))
                .collect();
            let invoke = LinkBuilder::new(
                ctx,
                Rel::Invoke.name(),
                RepresentationType::ActionResult,
                &invoke_path(self.object, action),
            )
            .with_method(action.semantics.invoke_method())
            .with_arguments(Value::Object(arguments));
            self.repr.link(invoke.build());
        }

        if self.repr.mode().is_detailed() {
            let parameters: Vec<Value> = action
                .parameters
                .iter()
                .enumerate()
                .map(|(number, param)| self.parameter(number, param))
                .collect();
            self.repr.put("parameters", parameters);
        }

        if let Some(return_type) = &action.return_type {
            self.repr
                .link(domain_type_link(ctx, Rel::ReturnType, return_type).build());
        }

        self.repr.extension("friendlyName", action.name.as_str());
        self.repr.extension("actionType", action.action_type.name());
        self.repr
            .extension("actionSemantics", action.semantics.name());
        if let Some(description) = &action.description {
            self.repr.extension("description", description.as_str());
        }
        Ok(())
    }

    /// The contributee object fills the parameter of its own type on contributed actions.
    fn default_argument(&self, action: &ActionSpec, param: &ParamSpec) -> Value {
        if action.contributed_by.is_some() && param.type_id == self.object.domain_type {
            return object_link(self.ctx, Rel::Value, self.object)
                .build()
                .into_value();
        }
        Value::Null
    }

    fn parameter(&self, number: usize, param: &ParamSpec) -> Value {
        let mut repr = Representation::from_pairs([
            ("num", Value::from(number)),
            ("id", Value::from(param.id.as_str())),
            ("name", Value::from(param.name.as_str())),
        ]);
        if let Some(description) = &param.description {
            repr.map_put("description", description.as_str());
        }
        if !param.choices.is_empty() {
            let choices: Vec<Value> = param
                .choices
                .iter()
                .map(|choice| self.param_value(choice))
                .collect();
            repr.map_put("choices", choices);
        }
        if let Some(default) = &param.default {
            repr.map_put("default", self.param_value(default));
        }
        repr.into_value()
    }

    fn param_value(&self, value: &PropertyValue) -> Value {
        match value {
            PropertyValue::Scalar(value) => value.clone(),
            PropertyValue::Reference(oid) => ref_link(self.ctx, Rel::Value, oid).build().into_value(),
        }
    }

    fn finish(self) -> Representation {
        self.repr.finish()
    }
}
