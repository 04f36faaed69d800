use rorepr_core::{Rel, Representation, RepresentationType, json};
use rorepr_follow::FollowSpecs;

use super::{RenderMode, ReprBuilder, Subject, mismatch};
use crate::Result;
use crate::context::RendererContext;
use crate::link::LinkBuilder;
use crate::model::User;

pub(crate) const SPEC_VERSION: &str = "1.0.0";

pub(super) fn render_homepage(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::HomePage = subject else {
        return Err(mismatch(RepresentationType::HomePage, subject));
    };
    HomePageRenderer::new(ctx, follow, mode).render()
}

pub(super) fn render_user(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::User(user) = subject else {
        return Err(mismatch(RepresentationType::User, subject));
    };
    Ok(UserRenderer::new(ctx, follow, mode, user).render())
}

pub(super) fn render_version(
    ctx: &RendererContext<'_>,
    follow: FollowSpecs,
    subject: &Subject<'_>,
    mode: RenderMode,
) -> Result<Representation> {
    let Subject::Version = subject else {
        return Err(mismatch(RepresentationType::Version, subject));
    };
    Ok(VersionRenderer::new(ctx, follow, mode).render())
}

/// Link to the home page, used as `up` by top-level resources.
pub(crate) fn homepage_link(ctx: &RendererContext<'_>, rel: Rel) -> LinkBuilder {
    LinkBuilder::new(ctx, rel.name(), RepresentationType::HomePage, "")
}

struct HomePageRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
}

impl<'r, 'a> HomePageRenderer<'r, 'a> {
    fn new(ctx: &'r RendererContext<'a>, follow: FollowSpecs, mode: RenderMode) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(RepresentationType::HomePage, follow, mode),
        }
    }

    fn render(mut self) -> Result<Representation> {
        let ctx = self.ctx;
        let store = ctx.store();

        self.repr.link(homepage_link(ctx, Rel::SelfRel).build());

        let user = LinkBuilder::new(ctx, Rel::User.name(), RepresentationType::User, "user");
        self.repr.followable_link(user.build(), |follow| {
            ctx.render_nested(follow, &Subject::User(store.user()), RenderMode::Followed)
        })?;

        let services =
            LinkBuilder::new(ctx, Rel::Services.name(), RepresentationType::List, "services");
        self.repr.followable_link(services.build(), |follow| {
            ctx.render_nested(follow, &Subject::Services(store.services()), RenderMode::Followed)
        })?;

        let version =
            LinkBuilder::new(ctx, Rel::Version.name(), RepresentationType::Version, "version");
        self.repr.followable_link(version.build(), |follow| {
            ctx.render_nested(follow, &Subject::Version, RenderMode::Followed)
        })?;

        let domain_types = LinkBuilder::new(
            ctx,
            Rel::DomainTypes.name(),
            RepresentationType::TypeList,
            "domainTypes",
        );
        self.repr.followable_link(domain_types.build(), |follow| {
            ctx.render_nested(
                follow,
                &Subject::TypeList(store.domain_types()),
                RenderMode::Followed,
            )
        })?;

        Ok(self.repr.finish())
    }
}

struct UserRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
    user: &'r User,
}

impl<'r, 'a> UserRenderer<'r, 'a> {
    fn new(
        ctx: &'r RendererContext<'a>,
        follow: FollowSpecs,
        mode: RenderMode,
        user: &'r User,
    ) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(RepresentationType::User, follow, mode),
            user,
        }
    }

    fn render(mut self) -> Representation {
        if self.repr.includes_self() {
            let link = LinkBuilder::new(self.ctx, Rel::SelfRel.name(), RepresentationType::User, "user");
            self.repr.link(link.build());
            self.repr.link(homepage_link(self.ctx, Rel::Up).build());
        }
        self.repr.put("userName", self.user.user_name.as_str());
        self.repr.put("roles", self.user.roles.clone());
        self.repr.finish()
    }
}

struct VersionRenderer<'r, 'a> {
    ctx: &'r RendererContext<'a>,
    repr: ReprBuilder,
}

impl<'r, 'a> VersionRenderer<'r, 'a> {
    fn new(ctx: &'r RendererContext<'a>, follow: FollowSpecs, mode: RenderMode) -> Self {
        Self {
            ctx,
            repr: ReprBuilder::new(RepresentationType::Version, follow, mode),
        }
    }

    fn render(mut self) -> Representation {
        if self.repr.includes_self() {
            let link =
                LinkBuilder::new(self.ctx, Rel::SelfRel.name(), RepresentationType::Version, "version");
            self.repr.link(link.build());
            self.repr.link(homepage_link(self.ctx, Rel::Up).build());
        }
        self.repr.put("specVersion", SPEC_VERSION);
        self.repr.put("implVersion", env!("CARGO_PKG_VERSION"));
        self.repr.put(
            "optionalCapabilities",
            json!({
                "blobsClobs": "no",
                "deleteObjects": "no",
                "domainModel": "formal",
                "protoPersistentObjects": "no",
                "validateOnly": "no",
            }),
        );
        self.repr.finish()
    }
}
