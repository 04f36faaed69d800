//! Representation renderers.
//!
//! One renderer per [`RepresentationType`]. A renderer is built around its
//! subject, writes the mandatory fields, then walks its outgoing relations:
//! for each, it asks its [`FollowSpecs`] whether to descend and, if so, has a
//! fresh renderer for the linked entity produce the `value` embedded in the
//! link. Renderers are consumed by `render`.
//!
//! [`RendererRegistry`] maps each kind to its render function. It is built
//! explicitly and carried by the [`RendererContext`].

mod action_result;
mod builder;
mod error;
mod home;
mod list;
mod members;
mod object;
mod types;


use indexmap::IndexMap;
use rorepr_core::{MediaType, Representation, RepresentationType, Value};
use rorepr_follow::FollowSpecs;
use tracing::trace;

use crate::context::RendererContext;
use crate::model::{
    ActionSpec, CollectionSpec, DomainObject, DomainType, Invocation, ParamSpec, PropertySpec,
    User,
};
use crate::{RenderError, Result};

pub(crate) use builder::{ReprBuilder, expand};

/// How a representation is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Member inside its owning object.
    Inline,
    /// Expanded into a link's `value` by a follow directive.
    Followed,
    /// The addressed resource itself.
    Standalone,
    /// Returned after an action changed state.
    Mutated,
}

impl RenderMode {
    pub fn is_inline(self) -> bool {
        self == RenderMode::Inline
    }

    /// Standalone and mutated renders carry parameter and collection detail.
    pub fn is_detailed(self) -> bool {
        matches!(self, RenderMode::Standalone | RenderMode::Mutated)
    }
}

/// What a renderer renders.
#[derive(Debug, Clone)]
pub enum Subject<'s> {
    HomePage,
    User(&'s User),
    Version,
    /// Service singletons.
    Services(Vec<&'s DomainObject>),
    /// Objects returned by an action.
    List {
        objects: Vec<&'s DomainObject>,
        return_type: Option<&'s str>,
        element_type: Option<&'s str>,
    },
    ScalarValue {
        value: &'s Value,
        return_type: Option<&'s str>,
    },
    DomainObject(&'s DomainObject),
    Property(&'s DomainObject, &'s PropertySpec),
    Collection(&'s DomainObject, &'s CollectionSpec),
    Action(&'s DomainObject, &'s ActionSpec),
    ActionResult {
        target: &'s DomainObject,
        action: &'s ActionSpec,
        invocation: &'s Invocation,
        arguments: Representation,
    },
    TypeList(Vec<&'s DomainType>),
    DomainType(&'s DomainType),
    PropertyDescription(&'s DomainType, &'s PropertySpec),
    CollectionDescription(&'s DomainType, &'s CollectionSpec),
    ActionDescription(&'s DomainType, &'s ActionSpec),
    ActionParameterDescription {
        owner: &'s DomainType,
        action: &'s ActionSpec,
        param: &'s ParamSpec,
        number: usize,
    },
    TypeActionResult {
        domain_type: &'s DomainType,
        supertype: &'s str,
        value: bool,
    },
    Error(&'s RenderError),
}

impl Subject<'_> {
    pub fn repr_type(&self) -> RepresentationType {
        match self {
            Subject::HomePage => RepresentationType::HomePage,
            Subject::User(_) => RepresentationType::User,
            Subject::Version => RepresentationType::Version,
            Subject::Services(_) | Subject::List { .. } => RepresentationType::List,
            Subject::ScalarValue { .. } => RepresentationType::ScalarValue,
            Subject::DomainObject(_) => RepresentationType::DomainObject,
            Subject::Property(..) => RepresentationType::ObjectProperty,
            Subject::Collection(..) => RepresentationType::ObjectCollection,
            Subject::Action(..) => RepresentationType::ObjectAction,
            Subject::ActionResult { .. } => RepresentationType::ActionResult,
            Subject::TypeList(_) => RepresentationType::TypeList,
            Subject::DomainType(_) => RepresentationType::DomainType,
            Subject::PropertyDescription(..) => RepresentationType::PropertyDescription,
            Subject::CollectionDescription(..) => RepresentationType::CollectionDescription,
            Subject::ActionDescription(..) => RepresentationType::ActionDescription,
            Subject::ActionParameterDescription { .. } => {
                RepresentationType::ActionParameterDescription
            }
            Subject::TypeActionResult { .. } => RepresentationType::TypeActionResult,
            Subject::Error(_) => RepresentationType::Error,
        }
    }
}

/// Produces the representation of one subject.
pub type RenderFn =
    fn(&RendererContext<'_>, FollowSpecs, &Subject<'_>, RenderMode) -> Result<Representation>;

/// Render functions keyed by representation kind.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    factories: IndexMap<RepresentationType, RenderFn>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with a renderer for every kind except `Generic`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(RepresentationType::HomePage, home::render_homepage);
        registry.register(RepresentationType::User, home::render_user);
        registry.register(RepresentationType::Version, home::render_version);
        registry.register(RepresentationType::List, list::render_list);
        registry.register(RepresentationType::ScalarValue, list::render_scalar);
        registry.register(RepresentationType::DomainObject, object::render);
        registry.register(RepresentationType::ObjectProperty, members::render_property);
        registry.register(RepresentationType::ObjectCollection, members::render_collection);
        registry.register(RepresentationType::ObjectAction, members::render_action);
        registry.register(RepresentationType::ActionResult, action_result::render);
        registry.register(RepresentationType::TypeList, types::render_type_list);
        registry.register(RepresentationType::DomainType, types::render_domain_type);
        registry.register(
            RepresentationType::PropertyDescription,
            types::render_property_description,
        );
        registry.register(
            RepresentationType::CollectionDescription,
            types::render_collection_description,
        );
        registry.register(
            RepresentationType::ActionDescription,
            types::render_action_description,
        );
        registry.register(
            RepresentationType::ActionParameterDescription,
            types::render_param_description,
        );
        registry.register(
            RepresentationType::TypeActionResult,
            types::render_type_action_result,
        );
        registry.register(RepresentationType::Error, error::render);
        registry
    }

    /// Returns the previously registered function, if any.
    pub fn register(&mut self, repr_type: RepresentationType, render: RenderFn) -> Option<RenderFn> {
        self.factories.insert(repr_type, render)
    }

    pub fn find(&self, repr_type: RepresentationType) -> Option<RenderFn> {
        self.factories.get(&repr_type).copied()
    }

    pub fn find_by_media_type(&self, media_type: &MediaType) -> Option<RenderFn> {
        self.find(RepresentationType::lookup(Some(media_type)))
    }

    pub fn registered(&self) -> impl Iterator<Item = RepresentationType> + '_ {
        self.factories.keys().copied()
    }

    pub fn render(
        &self,
        ctx: &RendererContext<'_>,
        follow: FollowSpecs,
        subject: &Subject<'_>,
        mode: RenderMode,
    ) -> Result<Representation> {
        let repr_type = subject.repr_type();
        let render = self
            .find(repr_type)
            .ok_or(RenderError::NoRenderer(repr_type))?;
        trace!(%repr_type, ?mode, ?follow, "render");
        render(ctx, follow, subject, mode)
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

fn mismatch(expected: RepresentationType, subject: &Subject<'_>) -> RenderError {
    RenderError::SubjectMismatch {
        expected,
        actual: subject.repr_type(),
    }
}
