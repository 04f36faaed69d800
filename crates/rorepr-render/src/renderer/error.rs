use rorepr_core::{Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;

use super::{RenderMode, ReprBuilder, Subject, mismatch};
use crate::Result;
use crate::context::RendererContext;

pub(super) fn render(
    _ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::Error(error) = subject else {
        return Err(mismatch(RepresentationType::Error, subject));
    };

    let mut repr = ReprBuilder::new(RepresentationType::Error, follow, mode);
    repr.put("httpStatusCode", error.status());
    repr.put("message", error.to_string());
    if let Some(detail) = error.detail() {
        let lines: Vec<Value> = detail.lines().map(Value::from).collect();
        repr.put("detail", lines);
    }
    Ok(repr.finish())
}
