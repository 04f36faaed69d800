//! Access to the domain model.

use serde::Deserialize;
use tracing::debug;

use crate::Result;
use crate::model::{DomainObject, DomainType, Invocation, ObjectRef, User};

/// Everything the renderers may ask of the application.
pub trait DomainStore {
    fn user(&self) -> &User;

    /// All known types, in a stable order.
    fn domain_types(&self) -> Vec<&DomainType>;

    fn domain_type(&self, id: &str) -> Option<&DomainType>;

    fn object(&self, oid: &ObjectRef) -> Option<&DomainObject>;

    /// Service singletons, in registration order.
    fn services(&self) -> Vec<&DomainObject>;

    fn service(&self, service_id: &str) -> Option<&DomainObject> {
        self.services()
            .into_iter()
            .find(|s| s.service_id.as_deref() == Some(service_id))
    }

    /// Canned outcome of invoking `action_id` on `target`, if one is recorded.
    fn invocation(&self, target: &ObjectRef, action_id: &str) -> Option<&Invocation>;

    /// Reflexive, transitive check over declared supertypes.
    fn is_subtype_of(&self, sub: &str, sup: &str) -> bool {
        let mut pending = vec![sub];
        let mut seen: Vec<&str> = Vec::new();
        while let Some(id) = pending.pop() {
            if id == sup {
                return true;
            }
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(ty) = self.domain_type(id) {
                pending.extend(ty.supertypes.iter().map(String::as_str));
            }
        }
        false
    }
}

/// Store backed by a JSON fixture.
///
/// ```json
/// { "user": {...}, "types": [...], "objects": [...], "invocations": [...] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemoryStore {
    #[serde(default)]
    user: User,
    #[serde(default)]
    types: Vec<DomainType>,
    #[serde(default)]
    objects: Vec<DomainObject>,
    #[serde(default)]
    invocations: Vec<Invocation>,
}

impl InMemoryStore {
    pub fn from_json(json: &str) -> Result<Self> {
        let store: InMemoryStore = serde_json::from_str(json)?;
        debug!(
            types = store.types.len(),
            objects = store.objects.len(),
            invocations = store.invocations.len(),
            "loaded fixture"
        );
        Ok(store)
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }

    pub fn add_type(&mut self, domain_type: DomainType) {
        self.types.push(domain_type);
    }

    pub fn add_object(&mut self, object: DomainObject) {
        self.objects.push(object);
    }

    pub fn add_invocation(&mut self, invocation: Invocation) {
        self.invocations.push(invocation);
    }
}

impl DomainStore for InMemoryStore {
    fn user(&self) -> &User {
        &self.user
    }

    fn domain_types(&self) -> Vec<&DomainType> {
        self.types.iter().collect()
    }

    fn domain_type(&self, id: &str) -> Option<&DomainType> {
        self.types.iter().find(|t| t.id == id)
    }

    fn object(&self, oid: &ObjectRef) -> Option<&DomainObject> {
        self.objects
            .iter()
            .find(|o| o.domain_type == oid.domain_type && o.instance_id == oid.instance_id)
    }

    fn services(&self) -> Vec<&DomainObject> {
        self.objects.iter().filter(|o| o.is_service()).collect()
    }

    fn invocation(&self, target: &ObjectRef, action_id: &str) -> Option<&Invocation> {
        self.invocations
            .iter()
            .find(|i| i.target.as_ref() == Some(target) && i.action == action_id)
    }
}
