//! Link relation names.

const REL_PREFIX: &str = "urn:org.restfulobjects:rels/";

/// Semantic role of a link.
///
/// IANA relations use their registered bare names; the rest are namespaced
/// under `urn:org.restfulobjects:rels/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rel {
    // IANA
    SelfRel,
    Up,
    DescribedBy,

    // framework
    User,
    Services,
    Service,
    Version,
    DomainTypes,
    DomainType,
    Value,
    Details,
    Modify,
    Clear,
    AddTo,
    RemoveFrom,
    Invoke,
    Property,
    Collection,
    Action,
    ActionParam,
    ReturnType,
    ElementType,
    ContributedBy,
}

impl Rel {
    pub fn name(self) -> &'static str {
        match self {
            Self::SelfRel => "self",
            Self::Up => "up",
            Self::DescribedBy => "describedby",
            Self::User => "urn:org.restfulobjects:rels/user",
            Self::Services => "urn:org.restfulobjects:rels/services",
            Self::Service => "urn:org.restfulobjects:rels/service",
            Self::Version => "urn:org.restfulobjects:rels/version",
            Self::DomainTypes => "urn:org.restfulobjects:rels/domain-types",
            Self::DomainType => "urn:org.restfulobjects:rels/domain-type",
            Self::Value => "urn:org.restfulobjects:rels/value",
            Self::Details => "urn:org.restfulobjects:rels/details",
            Self::Modify => "urn:org.restfulobjects:rels/modify",
            Self::Clear => "urn:org.restfulobjects:rels/clear",
            Self::AddTo => "urn:org.restfulobjects:rels/add-to",
            Self::RemoveFrom => "urn:org.restfulobjects:rels/remove-from",
            Self::Invoke => "urn:org.restfulobjects:rels/invoke",
            Self::Property => "urn:org.restfulobjects:rels/property",
            Self::Collection => "urn:org.restfulobjects:rels/collection",
            Self::Action => "urn:org.restfulobjects:rels/action",
            Self::ActionParam => "urn:org.restfulobjects:rels/action-param",
            Self::ReturnType => "urn:org.restfulobjects:rels/return-type",
            Self::ElementType => "urn:org.restfulobjects:rels/element-type",
            Self::ContributedBy => "urn:org.restfulobjects:rels/contributed-by",
        }
    }

    /// Rel name qualified by one parameter: `<name>;key="value"`.
    ///
    /// ```
    /// use rorepr_core::Rel;
    ///
    /// assert_eq!(
    ///     Rel::Service.and_param("serviceId", "Customers"),
    ///     r#"urn:org.restfulobjects:rels/service;serviceId="Customers""#,
    /// );
    /// ```
    pub fn and_param(self, key: &str, value: &str) -> String {
        format!("{};{}=\"{}\"", self.name(), key, value)
    }

    pub fn is_namespaced(self) -> bool {
        self.name().starts_with(REL_PREFIX)
    }
}
