//! Representation kinds and their media types.

use std::fmt;

use crate::MediaType;

const PROFILE_PREFIX: &str = "urn:org.restfulobjects:repr-types/";

/// Every kind of representation a renderer can produce.
///
/// Each kind except [`RepresentationType::Generic`] owns a distinct
/// `application/json` profile; `Generic` is plain `application/json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RepresentationType {
    HomePage,
    User,
    Version,
    List,
    ScalarValue,
    DomainObject,
    ObjectProperty,
    ObjectCollection,
    ObjectAction,
    ActionResult,
    TypeList,
    DomainType,
    PropertyDescription,
    CollectionDescription,
    ActionDescription,
    ActionParameterDescription,
    TypeActionResult,
    Error,
    Generic,
}

impl RepresentationType {
    pub const ALL: [RepresentationType; 19] = [
        Self::HomePage,
        Self::User,
        Self::Version,
        Self::List,
        Self::ScalarValue,
        Self::DomainObject,
        Self::ObjectProperty,
        Self::ObjectCollection,
        Self::ObjectAction,
        Self::ActionResult,
        Self::TypeList,
        Self::DomainType,
        Self::PropertyDescription,
        Self::CollectionDescription,
        Self::ActionDescription,
        Self::ActionParameterDescription,
        Self::TypeActionResult,
        Self::Error,
        Self::Generic,
    ];

    /// Kebab-case name used in the profile URN. `None` for `Generic`.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::HomePage => "homepage",
            Self::User => "user",
            Self::Version => "version",
            Self::List => "list",
            Self::ScalarValue => "scalar-value",
            Self::DomainObject => "domain-object",
            Self::ObjectProperty => "object-property",
            Self::ObjectCollection => "object-collection",
            Self::ObjectAction => "object-action",
            Self::ActionResult => "action-result",
            Self::TypeList => "type-list",
            Self::DomainType => "domain-type",
            Self::PropertyDescription => "property-description",
            Self::CollectionDescription => "collection-description",
            Self::ActionDescription => "action-description",
            Self::ActionParameterDescription => "action-param-description",
            Self::TypeActionResult => "type-action-result",
            Self::Error => "error",
            Self::Generic => return None,
        };
        Some(name)
    }

    /// Profile URN, e.g. `urn:org.restfulobjects:repr-types/version`.
    pub fn media_type_profile(self) -> Option<String> {
        self.name().map(|name| format!("{PROFILE_PREFIX}{name}"))
    }

    pub fn media_type(self) -> MediaType {
        let json = MediaType::application_json();
        match self.media_type_profile() {
            Some(profile) => json.with_param("profile", profile),
            None => json,
        }
    }

    /// Inverse of [`RepresentationType::media_type`].
    ///
    /// Absent, non-JSON and unrecognized-profile media types all map to `Generic`.
    pub fn lookup(media_type: Option<&MediaType>) -> Self {
        let Some(media_type) = media_type else {
            return Self::Generic;
        };
        if !media_type.is_same_type(&MediaType::application_json()) {
            return Self::Generic;
        }
        let Some(profile) = media_type.profile() else {
            return Self::Generic;
        };
        Self::ALL
            .into_iter()
            .find(|t| t.media_type_profile().as_deref() == Some(profile))
            .unwrap_or(Self::Generic)
    }

    /// Like [`RepresentationType::lookup`], parsing the media type first.
    pub fn lookup_str(media_type: &str) -> Self {
        Self::lookup(media_type.parse::<MediaType>().ok().as_ref())
    }
}

impl fmt::Display for RepresentationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("generic"))
    }
}
