use indoc::indoc;

use crate::model::{InvocationResult, ObjectRef, PropertyValue};
use crate::test_utils::demo_store;
use crate::{DomainStore, InMemoryStore, RenderError};

#[test]
fn loads_demo_fixture() {
    let store = demo_store();
    assert_eq!(store.user().user_name, "sven");
    assert_eq!(store.domain_types().len(), 7);
    assert!(store.domain_type("CUS").is_some());
    assert!(store.domain_type("nope").is_none());
}

#[test]
fn services_are_objects_with_a_service_id() {
    let store = demo_store();
    let ids: Vec<_> = store
        .services()
        .iter()
        .filter_map(|s| s.service_id.as_deref())
        .collect();
    assert_eq!(ids, ["Customers", "Reports"]);
    assert_eq!(store.service("Reports").unwrap().title, "Reports");
    assert!(store.service("Missing").is_none());
}

#[test]
fn property_values_are_scalars_or_references() {
    let store = demo_store();
    let alice = store.object(&ObjectRef::new("CUS", "1")).unwrap();
    assert!(matches!(
        alice.properties.get("name"),
        Some(PropertyValue::Scalar(v)) if v == "Alice"
    ));
    assert_eq!(
        alice.properties.get("bestFriend"),
        Some(&PropertyValue::Reference(ObjectRef::new("CUS", "2")))
    );
}

#[test]
fn objects_default_to_persistent() {
    let store = demo_store();
    assert!(store.object(&ObjectRef::new("ORD", "1")).unwrap().persistent);
}

#[test]
fn finds_recorded_invocation() {
    let store = demo_store();
    let target = ObjectRef::new("CUS", "1");

    let invocation = store.invocation(&target, "placeOrder").unwrap();
    assert_eq!(
        invocation.result,
        InvocationResult::Object(ObjectRef::new("ORD", "1"))
    );
    assert_eq!(invocation.changed, [target.clone()]);
    assert!(store.invocation(&target, "archive").is_none());
}

#[test]
fn subtype_check_is_reflexive_and_follows_supertypes() {
    let store = demo_store();
    assert!(store.is_subtype_of("CUS", "CUS"));
    assert!(store.is_subtype_of("CUS", "PTY"));
    assert!(!store.is_subtype_of("PTY", "CUS"));
    assert!(!store.is_subtype_of("ORD", "PTY"));
}

#[test]
fn invalid_fixture_is_reported() {
    let err = InMemoryStore::from_json(r#"{"types": 3}"#).unwrap_err();
    assert!(matches!(err, RenderError::Fixture(_)));
    assert_eq!(err.status(), 500);
}

#[test]
fn minimal_fixture_fills_in_defaults() {
    let store = InMemoryStore::from_json(indoc! {r#"
        {
          "types": [{"id": "T", "name": "Thing"}],
          "objects": [{"domainType": "T", "instanceId": "1", "title": "One"}]
        }
    "#})
    .unwrap();

    assert_eq!(store.user().user_name, "");
    assert!(store.services().is_empty());

    let thing = store.object(&ObjectRef::new("T", "1")).unwrap();
    assert!(thing.persistent);
    assert!(thing.properties.is_empty());
    assert!(store.invocation(&thing.oid(), "anything").is_none());
}
