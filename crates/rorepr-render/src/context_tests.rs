use rorepr_core::RepresentationType;

use crate::context::{RendererContext, RequestParams, ensure_compatible_accept};
use crate::test_utils::demo_store;
use crate::{RenderError, RendererRegistry};

#[test]
fn decodes_query_arguments() {
    let params = RequestParams::from_query("?name=Alice+Smith&x-ro-follow-links=links%5Brel%3Dself%5D");
    assert_eq!(params.get("name"), Some("Alice Smith"));
    assert_eq!(params.follow_links().as_deref(), Some("links[rel=self]"));
    assert!(params.contains("name"));
    assert!(!params.contains("missing"));
}

#[test]
fn user_args_skip_reserved_arguments() {
    let params = RequestParams::from_query("x-ro-follow-links=members&product=tea&quantity=5");
    let args: Vec<_> = params.user_args().collect();
    assert_eq!(args, [("product", "tea"), ("quantity", "5")]);
}

#[test]
fn repeated_follow_links_are_alternatives() {
    let params = RequestParams::from_query("x-ro-follow-links=links&x-ro-follow-links=members.links");
    assert_eq!(params.get_all("x-ro-follow-links").len(), 2);
    assert_eq!(params.follow_links().as_deref(), Some("links,members.links"));

    let specs = params.follow_specs().unwrap();
    assert!(specs.follow("links").is_following());
    assert!(specs.follow("members").follow("links").is_following());
}

#[test]
fn blank_follow_links_follows_nothing() {
    let params = RequestParams::from_query("x-ro-follow-links=%20");
    assert_eq!(params.follow_links(), None);
    assert!(params.follow_specs().unwrap().follow("links").is_terminated());
}

#[test]
fn malformed_follow_links_is_a_bad_request() {
    let params = RequestParams::from_query("x-ro-follow-links=links%5Brel");
    let err = params.follow_specs().unwrap_err();
    assert!(matches!(err, RenderError::FollowLinks(_)));
    assert_eq!(err.status(), 400);
    assert!(err.detail().is_some());
}

#[test]
fn accept_without_profile_accepts_anything() {
    assert!(ensure_compatible_accept(None, RepresentationType::User).is_ok());
    assert!(ensure_compatible_accept(Some("application/json"), RepresentationType::User).is_ok());
    assert!(ensure_compatible_accept(Some("*/*"), RepresentationType::DomainObject).is_ok());
}

#[test]
fn accept_with_matching_profile() {
    let accept = r#"application/json;profile="urn:org.restfulobjects:repr-types/user""#;
    assert!(ensure_compatible_accept(Some(accept), RepresentationType::User).is_ok());
}

#[test]
fn accept_with_other_profile_is_not_acceptable() {
    let accept = r#"application/json;profile="urn:org.restfulobjects:repr-types/version""#;
    let err = ensure_compatible_accept(Some(accept), RepresentationType::User).unwrap_err();
    assert_eq!(err.status(), 406);
    assert_eq!(
        err.to_string(),
        "requested profile `urn:org.restfulobjects:repr-types/version` does not match `urn:org.restfulobjects:repr-types/user`"
    );
}

#[test]
fn accept_without_json_is_not_acceptable() {
    let err = ensure_compatible_accept(Some("application/atom+xml"), RepresentationType::User)
        .unwrap_err();
    assert!(matches!(err, RenderError::NotJson(_)));
    assert_eq!(err.status(), 406);
    assert_eq!(
        err.to_string(),
        "`application/atom+xml` does not accept application/json"
    );

    let generic = ensure_compatible_accept(Some("text/html"), RepresentationType::Generic);
    assert!(generic.is_err());
}

#[test]
fn accept_wildcards_admit_json() {
    for accept in [
        "application/*",
        "*/*",
        "application/atom+xml, application/json",
        "text/*, */*",
    ] {
        assert!(
            ensure_compatible_accept(Some(accept), RepresentationType::User).is_ok(),
            "{accept}"
        );
    }
}

#[test]
fn profile_on_non_json_entry_is_ignored() {
    let accept = r#"application/xml;profile="urn:org.restfulobjects:repr-types/version", application/json"#;
    assert!(ensure_compatible_accept(Some(accept), RepresentationType::User).is_ok());
}

#[test]
fn base_uri_gets_trailing_slash() {
    let store = demo_store();
    let registry = RendererRegistry::with_defaults();
    let ctx = RendererContext::new("http://localhost/restful", &store, &registry);
    assert_eq!(ctx.base_uri(), "http://localhost/restful/");
    assert_eq!(ctx.url_for("/objects/CUS/1"), "http://localhost/restful/objects/CUS/1");
    assert_eq!(ctx.url_for(""), "http://localhost/restful/");
}
