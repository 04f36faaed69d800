//! Domain model consumed by the renderers.
//!
//! Everything a renderer needs to know about a type or an object is spelled
//! out here; nothing is discovered at runtime.

use std::fmt;

use indexmap::IndexMap;
use rorepr_core::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plural_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_service: bool,
    /// Built-in scalar types such as `string` or `int`.
    #[serde(default)]
    pub is_value: bool,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

impl DomainType {
    pub fn property(&self, id: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn collection(&self, id: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn action(&self, id: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Domain type id of the property's value.
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionSemantics {
    #[default]
    List,
    Set,
}

impl CollectionSemantics {
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub element_type: String,
    #[serde(default)]
    pub semantics: CollectionSemantics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionSemantics {
    Safe,
    Idempotent,
    #[default]
    NonIdempotent,
}

impl ActionSemantics {
    pub fn name(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Idempotent => "idempotent",
            Self::NonIdempotent => "nonIdempotent",
        }
    }

    /// Method of the `invoke` link.
    pub fn invoke_method(self) -> HttpMethod {
        match self {
            Self::Safe => HttpMethod::Get,
            Self::Idempotent => HttpMethod::Put,
            Self::NonIdempotent => HttpMethod::Post,
        }
    }

    /// Whether an invoke request with `method` may run an action with these semantics.
    pub fn permits(self, method: HttpMethod) -> bool {
        match method {
            HttpMethod::Get => self == Self::Safe,
            HttpMethod::Put => self != Self::NonIdempotent,
            HttpMethod::Post => true,
            HttpMethod::Delete => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    #[default]
    User,
    Debug,
    Exploration,
}

impl ActionType {
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Debug => "debug",
            Self::Exploration => "exploration",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub semantics: ActionSemantics,
    #[serde(default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
    /// `None` for void actions.
    #[serde(default)]
    pub return_type: Option<String>,
    /// Set when the action returns a collection.
    #[serde(default)]
    pub element_type: Option<String>,
    /// Service id of the contributing service, for contributed actions.
    #[serde(default)]
    pub contributed_by: Option<String>,
}

impl ActionSpec {
    pub fn parameter(&self, id: &str) -> Option<(usize, &ParamSpec)> {
        self.parameters.iter().enumerate().find(|(_, p)| p.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub choices: Vec<PropertyValue>,
    #[serde(default)]
    pub default: Option<PropertyValue>,
}

/// Identity of a persisted domain object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObjectRef {
    pub domain_type: String,
    pub instance_id: String,
}

impl ObjectRef {
    pub fn new(domain_type: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            domain_type: domain_type.into(),
            instance_id: instance_id.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain_type, self.instance_id)
    }
}

/// A property value, parameter choice or default: a reference or a plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Reference(ObjectRef),
    Scalar(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberType {
    Property,
    Collection,
    Action,
}

impl MemberType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Collection => "collection",
            Self::Action => "action",
        }
    }

    /// Key carrying the member id in member maps, e.g. `propertyId`.
    pub fn id_key(self) -> &'static str {
        match self {
            Self::Property => "propertyId",
            Self::Collection => "collectionId",
            Self::Action => "actionId",
        }
    }

    /// Path segment of member URLs, e.g. `properties`.
    pub fn url_part(self) -> &'static str {
        match self {
            Self::Property => "properties",
            Self::Collection => "collections",
            Self::Action => "actions",
        }
    }

    pub fn from_url_part(part: &str) -> Option<Self> {
        match part {
            "properties" => Some(Self::Property),
            "collections" => Some(Self::Collection),
            "actions" => Some(Self::Action),
            _ => None,
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a visibility or usability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consent {
    Allowed,
    Vetoed(String),
}

impl Consent {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Consent::Allowed)
    }

    pub fn is_vetoed(&self) -> bool {
        !self.is_allowed()
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Consent::Allowed => None,
            Consent::Vetoed(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainObject {
    pub domain_type: String,
    pub instance_id: String,
    pub title: String,
    /// Set for service singletons; their URLs live under `services/`.
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default = "persistent_default")]
    pub persistent: bool,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
    #[serde(default)]
    pub collections: IndexMap<String, Vec<ObjectRef>>,
    /// Member ids hidden from the current user.
    #[serde(default)]
    pub hidden: Vec<String>,
    /// Member id to the reason it cannot be used.
    #[serde(default)]
    pub disabled: IndexMap<String, String>,
}

fn persistent_default() -> bool {
    true
}

impl DomainObject {
    pub fn oid(&self) -> ObjectRef {
        ObjectRef::new(&self.domain_type, &self.instance_id)
    }

    pub fn is_service(&self) -> bool {
        self.service_id.is_some()
    }

    /// Base path of the object and its members, relative to the base URI.
    pub fn href_path(&self) -> String {
        match &self.service_id {
            Some(id) => format!("services/{id}"),
            None => format!("objects/{}/{}", self.domain_type, self.instance_id),
        }
    }

    pub fn member_href_path(&self, member_type: MemberType, member_id: &str) -> String {
        format!("{}/{}/{}", self.href_path(), member_type.url_part(), member_id)
    }

    pub fn visibility(&self, member_id: &str) -> Consent {
        if self.hidden.iter().any(|h| h == member_id) {
            Consent::Vetoed(format!("`{member_id}` is hidden"))
        } else {
            Consent::Allowed
        }
    }

    pub fn usability(&self, member_id: &str) -> Consent {
        match self.disabled.get(member_id) {
            Some(reason) => Consent::Vetoed(reason.clone()),
            None => Consent::Allowed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvocationResult {
    #[default]
    Void,
    Object(ObjectRef),
    List(Vec<ObjectRef>),
    Scalar(Value),
}

/// Canned outcome of invoking an action on a target object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub target: Option<ObjectRef>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub result: InvocationResult,
    #[serde(default)]
    pub changed: Vec<ObjectRef>,
    #[serde(default)]
    pub disposed: Vec<ObjectRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn name(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported HTTP method `{other}`")),
        }
    }
}
