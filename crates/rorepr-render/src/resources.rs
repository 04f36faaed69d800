//! Resource dispatch: maps a request onto a renderer subject.
//!
//! Routes, relative to the base URI:
//!
//! ```text
//! /                                   homepage
//! /user  /version  /services          leaf resources and the services list
//! /services/{serviceId}               a service, addressed like an object
//! /objects/{type}/{id}                domain object
//!   .../properties/{p}  .../collections/{c}  .../actions/{a}
//!   .../actions/{a}/invoke            action result
//! /domainTypes  /domainTypes/{t}      type list, domain type
//!   .../properties/{p}  .../collections/{c}  .../actions/{a}
//!   .../actions/{a}/params/{p}
//!   .../typeactions/isSubtypeOf/invoke?supertype={t}
//! ```
//!
//! Checks run in order: route (404), lookup and visibility (404), method
//! (405), usability (403), `Accept` (406), `x-ro-follow-links` (400).

use rorepr_core::{Representation, RepresentationType, Value};
use rorepr_follow::FOLLOW_LINKS_PARAM;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::context::{RendererContext, RequestParams, ensure_compatible_accept};
use crate::model::{DomainObject, DomainType, HttpMethod, Invocation, MemberType, ObjectRef};
use crate::renderer::{RendererRegistry, Subject};
use crate::store::DomainStore;
use crate::{RenderError, Result};

/// An incoming request: method, path, query string and `Accept` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    pub path: String,
    pub query: String,
    pub accept: Option<String>,
}

impl Request {
    /// `target` is a path with an optional `?query`.
    pub fn new(method: HttpMethod, target: &str) -> Self {
        let (path, query) = parse_target(target);
        Self {
            method,
            path: path.to_string(),
            query: query.to_string(),
            accept: None,
        }
    }

    pub fn get(target: &str) -> Self {
        Self::new(HttpMethod::Get, target)
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Appends an encoded `x-ro-follow-links` argument to the query.
    pub fn with_follow_links(mut self, expr: &str) -> Self {
        let mut query = form_urlencoded::Serializer::for_suffix(std::mem::take(&mut self.query), 0);
        query.append_pair(FOLLOW_LINKS_PARAM, expr);
        self.query = query.finish();
        self
    }

    pub fn params(&self) -> RequestParams {
        RequestParams::from_query(&self.query)
    }
}

/// Splits a request target into path and query.
pub fn parse_target(target: &str) -> (&str, &str) {
    target.split_once('?').unwrap_or((target, ""))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub media_type: String,
    pub body: Representation,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Serves representations of a store's content.
pub struct Resources<'a> {
    store: &'a dyn DomainStore,
    registry: &'a RendererRegistry,
    base_uri: String,
}

impl<'a> Resources<'a> {
    pub fn new(
        store: &'a dyn DomainStore,
        registry: &'a RendererRegistry,
        base_uri: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registry,
            base_uri: base_uri.into(),
        }
    }

    /// Never fails: errors come back as `Error` representations.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub fn handle(&self, request: &Request) -> Response {
        match self.try_handle(request) {
            Ok(response) => {
                debug!(status = response.status, "rendered");
                response
            }
            Err(error) => {
                debug!(status = error.status(), %error, "request failed");
                self.error_response(&error)
            }
        }
    }

    fn try_handle(&self, request: &Request) -> Result<Response> {
        let params = request.params();
        let route = Route::parse(&request.path)
            .ok_or_else(|| RenderError::NoSuchResource(request.path.clone()))?;
        let void = Invocation::default();
        let subject = self.resolve(&route, request, &params, &void)?;

        ensure_compatible_accept(request.accept.as_deref(), subject.repr_type())?;
        let follow = params.follow_specs()?;

        let ctx = RendererContext::new(self.base_uri.as_str(), self.store, self.registry)
            .with_follow_links(follow);
        let body = ctx.render(&subject)?;
        Ok(Response {
            status: 200,
            media_type: subject.repr_type().media_type().to_string(),
            body,
        })
    }

    fn resolve<'s>(
        &'s self,
        route: &Route<'s>,
        request: &Request,
        params: &'s RequestParams,
        void: &'s Invocation,
    ) -> Result<Subject<'s>> {
        let store = self.store;

        let subject = match *route {
            Route::HomePage => Subject::HomePage,
            Route::User => Subject::User(store.user()),
            Route::Version => Subject::Version,
            Route::Services => Subject::Services(store.services()),
            Route::Object(owner) => Subject::DomainObject(self.owner(owner)?),
            Route::Member {
                owner,
                member_type,
                member_id,
            } => {
                let object = self.owner(owner)?;
                let domain_type = self.domain_type(&object.domain_type)?;
                let unknown = || unknown_member(&object.oid().to_string(), member_type, member_id);
                let subject = match member_type {
                    MemberType::Property => {
                        Subject::Property(object, domain_type.property(member_id).ok_or_else(unknown)?)
                    }
                    MemberType::Collection => Subject::Collection(
                        object,
                        domain_type.collection(member_id).ok_or_else(unknown)?,
                    ),
                    MemberType::Action => {
                        Subject::Action(object, domain_type.action(member_id).ok_or_else(unknown)?)
                    }
                };
                ensure_visible(object, member_type, member_id)?;
                subject
            }
            Route::Invoke { owner, action_id } => {
                let object = self.owner(owner)?;
                let domain_type = self.domain_type(&object.domain_type)?;
                let action = domain_type.action(action_id).ok_or_else(|| {
                    unknown_member(&object.oid().to_string(), MemberType::Action, action_id)
                })?;
                ensure_visible(object, MemberType::Action, action_id)?;

                if !action.semantics.permits(request.method) {
                    return Err(RenderError::MethodNotAllowed {
                        method: request.method,
                        path: request.path.clone(),
                    });
                }
                if let Some(reason) = object.usability(action_id).reason() {
                    return Err(RenderError::Disabled {
                        action: action_id.to_string(),
                        reason: reason.to_string(),
                    });
                }

                let mut arguments = Representation::new_map();
                for (key, value) in params.user_args() {
                    if action.parameter(key).is_none() {
                        return Err(RenderError::UnknownParameter {
                            action: action_id.to_string(),
                            param: key.to_string(),
                        });
                    }
                    arguments.map_put(key, value);
                }

                let invocation = store.invocation(&object.oid(), action_id).unwrap_or(void);
                Subject::ActionResult {
                    target: object,
                    action,
                    invocation,
                    arguments,
                }
            }
            Route::TypeList => Subject::TypeList(store.domain_types()),
            Route::DomainType(type_id) => Subject::DomainType(self.domain_type(type_id)?),
            Route::MemberDescription {
                type_id,
                member_type,
                member_id,
            } => {
                let domain_type = self.domain_type(type_id)?;
                let unknown = || unknown_member(type_id, member_type, member_id);
                match member_type {
                    MemberType::Property => Subject::PropertyDescription(
                        domain_type,
                        domain_type.property(member_id).ok_or_else(unknown)?,
                    ),
                    MemberType::Collection => Subject::CollectionDescription(
                        domain_type,
                        domain_type.collection(member_id).ok_or_else(unknown)?,
                    ),
                    MemberType::Action => Subject::ActionDescription(
                        domain_type,
                        domain_type.action(member_id).ok_or_else(unknown)?,
                    ),
                }
            }
            Route::ParamDescription {
                type_id,
                action_id,
                param_id,
            } => {
                let domain_type = self.domain_type(type_id)?;
                let action = domain_type
                    .action(action_id)
                    .ok_or_else(|| unknown_member(type_id, MemberType::Action, action_id))?;
                let (number, param) =
                    action
                        .parameter(param_id)
                        .ok_or_else(|| RenderError::UnknownParameter {
                            action: action_id.to_string(),
                            param: param_id.to_string(),
                        })?;
                Subject::ActionParameterDescription {
                    owner: domain_type,
                    action,
                    param,
                    number,
                }
            }
            Route::IsSubtypeOf(type_id) => {
                let domain_type = self.domain_type(type_id)?;
                let supertype = params
                    .get("supertype")
                    .ok_or_else(|| RenderError::MissingArgument("supertype".to_string()))?;
                self.domain_type(supertype)?;
                Subject::TypeActionResult {
                    domain_type,
                    supertype,
                    value: store.is_subtype_of(type_id, supertype),
                }
            }
        };

        if !matches!(route, Route::Invoke { .. }) && request.method != HttpMethod::Get {
            return Err(RenderError::MethodNotAllowed {
                method: request.method,
                path: request.path.clone(),
            });
        }
        Ok(subject)
    }

    fn owner(&self, owner: Owner<'_>) -> Result<&'a DomainObject> {
        match owner {
            Owner::Service(service_id) => self
                .store
                .service(service_id)
                .ok_or_else(|| RenderError::UnknownService(service_id.to_string())),
            Owner::Object {
                domain_type,
                instance_id,
            } => {
                let oid = ObjectRef::new(domain_type, instance_id);
                self.store
                    .object(&oid)
                    .ok_or_else(|| RenderError::UnknownObject(oid.to_string()))
            }
        }
    }

    fn domain_type(&self, type_id: &str) -> Result<&'a DomainType> {
        self.store
            .domain_type(type_id)
            .ok_or_else(|| RenderError::UnknownDomainType(type_id.to_string()))
    }

    fn error_response(&self, error: &RenderError) -> Response {
        let ctx = RendererContext::new(self.base_uri.as_str(), self.store, self.registry);
        let body = ctx.render(&Subject::Error(error)).unwrap_or_else(|_| {
            Representation::from_pairs([
                ("httpStatusCode", Value::from(error.status())),
                ("message", Value::from(error.to_string())),
            ])
        });
        Response {
            status: error.status(),
            media_type: RepresentationType::Error.media_type().to_string(),
            body,
        }
    }
}

fn unknown_member(owner: &str, member_type: MemberType, member: &str) -> RenderError {
    RenderError::UnknownMember {
        owner: owner.to_string(),
        member_type,
        member: member.to_string(),
    }
}

fn ensure_visible(object: &DomainObject, member_type: MemberType, member_id: &str) -> Result<()> {
    if object.visibility(member_id).is_vetoed() {
        return Err(RenderError::NotVisible {
            member_type,
            member: member_id.to_string(),
        });
    }
    Ok(())
}

/// Object-like resource owning members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner<'p> {
    Object {
        domain_type: &'p str,
        instance_id: &'p str,
    },
    Service(&'p str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'p> {
    HomePage,
    User,
    Version,
    Services,
    Object(Owner<'p>),
    Member {
        owner: Owner<'p>,
        member_type: MemberType,
        member_id: &'p str,
    },
    Invoke {
        owner: Owner<'p>,
        action_id: &'p str,
    },
    TypeList,
    DomainType(&'p str),
    MemberDescription {
        type_id: &'p str,
        member_type: MemberType,
        member_id: &'p str,
    },
    ParamDescription {
        type_id: &'p str,
        action_id: &'p str,
        param_id: &'p str,
    },
    IsSubtypeOf(&'p str),
}

impl<'p> Route<'p> {
    fn parse(path: &'p str) -> Option<Self> {
        let segments: Vec<&'p str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match *segments.as_slice() {
            [] => Route::HomePage,
            ["user"] => Route::User,
            ["version"] => Route::Version,
            ["services"] => Route::Services,
            ["services", service_id, ref rest @ ..] => Self::owned(Owner::Service(service_id), rest)?,
            ["objects", domain_type, instance_id, ref rest @ ..] => Self::owned(
                Owner::Object {
                    domain_type,
                    instance_id,
                },
                rest,
            )?,
            ["domainTypes"] => Route::TypeList,
            ["domainTypes", type_id] => Route::DomainType(type_id),
            ["domainTypes", type_id, "typeactions", "isSubtypeOf", "invoke"] => {
                Route::IsSubtypeOf(type_id)
            }
            ["domainTypes", type_id, "actions", action_id, "params", param_id] => {
                Route::ParamDescription {
                    type_id,
                    action_id,
                    param_id,
                }
            }
            ["domainTypes", type_id, part, member_id] => Route::MemberDescription {
                type_id,
                member_type: MemberType::from_url_part(part)?,
                member_id,
            },
            _ => return None,
        };
        Some(route)
    }

    fn owned(owner: Owner<'p>, rest: &[&'p str]) -> Option<Self> {
        let route = match *rest {
            [] => Route::Object(owner),
            ["actions", action_id, "invoke"] => Route::Invoke { owner, action_id },
            [part, member_id] => Route::Member {
                owner,
                member_type: MemberType::from_url_part(part)?,
                member_id,
            },
            _ => return None,
        };
        Some(route)
    }
}
