use std::io::Write;
use std::path::PathBuf;

use rorepr_render::model::HttpMethod;
use tempfile::NamedTempFile;

use super::render::{RenderArgs, RenderCommandError, render};

const DEMO_JSON: &str = include_str!("../../../rorepr-render/fixtures/demo.json");
const BASE_URI: &str = "http://example.org/ro/";

fn fixture(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn args(fixture: &NamedTempFile, target: &str) -> RenderArgs {
    RenderArgs {
        fixture: fixture.path().to_path_buf(),
        target: target.to_string(),
        method: HttpMethod::Get,
        follow_links: None,
        accept: None,
        base_uri: BASE_URI.to_string(),
        compact: false,
        color: false,
    }
}

#[test]
fn renders_homepage() {
    let file = fixture(DEMO_JSON);
    let response = render(&args(&file, "/")).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(
        response.media_type,
        r#"application/json;profile="urn:org.restfulobjects:repr-types/homepage""#
    );
    let self_link = response.body.link("self").unwrap();
    assert_eq!(self_link.get_str("href"), Some(BASE_URI));
}

#[test]
fn follow_links_embed_targets() {
    let file = fixture(DEMO_JSON);
    let mut args = args(&file, "/");
    args.follow_links = Some("links[rel=urn:org.restfulobjects:rels/user]".to_string());

    let response = render(&args).unwrap();
    let user = response
        .body
        .link("urn:org.restfulobjects:rels/user")
        .unwrap();
    assert_eq!(user.get("value").unwrap()["userName"], "sven");
}

#[test]
fn follow_links_in_query_are_honoured() {
    let file = fixture(DEMO_JSON);
    let args = args(&file, "objects/CUS/1?x-ro-follow-links=links%5Brel%3Ddescribedby%5D");

    let response = render(&args).unwrap();
    let described_by = response.body.link("describedby").unwrap();
    assert_eq!(described_by.get("value").unwrap()["domainType"], "CUS");
}

#[test]
fn invokes_action_with_method() {
    let file = fixture(DEMO_JSON);
    let mut args = args(&file, "objects/CUS/1/actions/placeOrder/invoke?product=tea&quantity=5");
    args.method = HttpMethod::Post;

    let response = render(&args).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.get_str("resulttype"), Some("domainobject"));
}

#[test]
fn failures_come_back_as_error_representations() {
    let file = fixture(DEMO_JSON);
    let response = render(&args(&file, "objects/CUS/99")).unwrap();

    assert!(!response.is_success());
    assert_eq!(response.status, 404);
    assert_eq!(response.body.get("httpStatusCode").unwrap(), 404);
}

#[test]
fn unacceptable_profile_is_406() {
    let file = fixture(DEMO_JSON);
    let mut args = args(&file, "user");
    args.accept =
        Some(r#"application/json;profile="urn:org.restfulobjects:repr-types/version""#.into());

    assert_eq!(render(&args).unwrap().status, 406);
}

#[test]
fn malformed_follow_links_is_rejected_before_dispatch() {
    let file = fixture(DEMO_JSON);
    let mut args = args(&file, "/");
    args.follow_links = Some("links[rel".to_string());

    let err = render(&args).unwrap_err();
    let RenderCommandError::FollowLinks(err) = err else {
        panic!("expected follow-links error, got {err:?}");
    };
    assert!(err.render(false).contains("x-ro-follow-links"));
}

#[test]
fn missing_fixture_is_reported() {
    let file = fixture(DEMO_JSON);
    let mut args = args(&file, "/");
    args.fixture = PathBuf::from("/definitely/not/here.json");

    let err = render(&args).unwrap_err();
    assert!(matches!(err, RenderCommandError::ReadFixture { .. }));
    assert!(err.to_string().starts_with("cannot read fixture `/definitely/not/here.json`"));
}

#[test]
fn invalid_fixture_is_reported() {
    let file = fixture(r#"{"types": 3}"#);
    let err = render(&args(&file, "/")).unwrap_err();
    assert!(matches!(err, RenderCommandError::LoadFixture { .. }));
}
