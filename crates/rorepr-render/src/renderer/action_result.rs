use rorepr_core::{Rel, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;

use super::members::invoke_path;
use super::{RenderMode, ReprBuilder, Subject, mismatch};
use crate::context::RendererContext;
use crate::link::{LinkBuilder, ref_link};
use crate::model::{ActionSemantics, InvocationResult, ObjectRef};
use crate::{RenderError, Result};

/// Renders the outcome of an invocation. The result is always embedded; `result`
/// in the follow-links expression only steers what is expanded inside it.
pub(super) fn render(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::ActionResult {
        target,
        action,
        invocation,
        arguments,
    } = subject
    else {
        return Err(mismatch(RepresentationType::ActionResult, subject));
    };

    let mut repr = ReprBuilder::new(RepresentationType::ActionResult, follow, mode);
    let store = ctx.store();

    let invoke = LinkBuilder::new(
        ctx,
        Rel::SelfRel.name(),
        RepresentationType::ActionResult,
        &invoke_path(target, action),
    )
    .with_method(action.semantics.invoke_method())
    .with_arguments(arguments.clone().into_value());
    repr.link(invoke.build());

    let result_mode = match action.semantics {
        ActionSemantics::Safe => RenderMode::Standalone,
        ActionSemantics::Idempotent | ActionSemantics::NonIdempotent => RenderMode::Mutated,
    };
    let result_follow = repr.follow().follow("result");
    let return_type = action.return_type.as_deref();

    let result = match &invocation.result {
        InvocationResult::Void => None,
        InvocationResult::Object(oid) => {
            let object = store
                .object(oid)
                .ok_or_else(|| RenderError::UnknownObject(oid.to_string()))?;
            let rendered =
                ctx.render_nested(result_follow, &Subject::DomainObject(object), result_mode)?;
            Some(("domainobject", rendered))
        }
        InvocationResult::List(oids) => {
            let objects = oids
                .iter()
                .map(|oid| {
                    store
                        .object(oid)
                        .ok_or_else(|| RenderError::UnknownObject(oid.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;
            let subject = Subject::List {
                objects,
                return_type,
                element_type: action.element_type.as_deref(),
            };
            Some(("list", ctx.render_nested(result_follow, &subject, result_mode)?))
        }
        InvocationResult::Scalar(value) => {
            let subject = Subject::ScalarValue { value, return_type };
            Some(("scalarvalue", ctx.render_nested(result_follow, &subject, result_mode)?))
        }
    };

    match result {
        Some((result_type, rendered)) => {
            repr.put("resulttype", result_type);
            repr.put("result", rendered.into_value());
        }
        None => repr.put("resulttype", "void"),
    }

    let ref_links = |oids: &[ObjectRef]| -> Value {
        oids.iter()
            .map(|oid| ref_link(ctx, Rel::Value, oid).build().into_value())
            .collect()
    };
    repr.extension("changed", ref_links(&invocation.changed));
    repr.extension("disposed", ref_links(&invocation.disposed));

    Ok(repr.finish())
}
