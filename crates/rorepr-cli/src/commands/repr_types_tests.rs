use super::repr_types::listing;

#[test]
fn lists_every_representation_type() {
    insta::assert_snapshot!(listing(), @r#"
    homepage                  application/json;profile="urn:org.restfulobjects:repr-types/homepage"
    user                      application/json;profile="urn:org.restfulobjects:repr-types/user"
    version                   application/json;profile="urn:org.restfulobjects:repr-types/version"
    list                      application/json;profile="urn:org.restfulobjects:repr-types/list"
    scalar-value              application/json;profile="urn:org.restfulobjects:repr-types/scalar-value"
    domain-object             application/json;profile="urn:org.restfulobjects:repr-types/domain-object"
    object-property           application/json;profile="urn:org.restfulobjects:repr-types/object-property"
    object-collection         application/json;profile="urn:org.restfulobjects:repr-types/object-collection"
    object-action             application/json;profile="urn:org.restfulobjects:repr-types/object-action"
    action-result             application/json;profile="urn:org.restfulobjects:repr-types/action-result"
    type-list                 application/json;profile="urn:org.restfulobjects:repr-types/type-list"
    domain-type               application/json;profile="urn:org.restfulobjects:repr-types/domain-type"
    property-description      application/json;profile="urn:org.restfulobjects:repr-types/property-description"
    collection-description    application/json;profile="urn:org.restfulobjects:repr-types/collection-description"
    action-description        application/json;profile="urn:org.restfulobjects:repr-types/action-description"
    action-param-description  application/json;profile="urn:org.restfulobjects:repr-types/action-param-description"
    type-action-result        application/json;profile="urn:org.restfulobjects:repr-types/type-action-result"
    error                     application/json;profile="urn:org.restfulobjects:repr-types/error"
    generic                   application/json
    "#);
}
