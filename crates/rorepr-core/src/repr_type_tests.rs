use crate::{MediaType, RepresentationType};

#[test]
fn roundtrip() {
    for repr_type in RepresentationType::ALL {
        let media_type = repr_type.media_type();
        assert_eq!(RepresentationType::lookup(Some(&media_type)), repr_type);
    }
}

#[test]
fn media_types_are_unique() {
    for a in RepresentationType::ALL {
        for b in RepresentationType::ALL {
            if a != b {
                assert_ne!(a.media_type(), b.media_type(), "{a} and {b} share a media type");
            }
        }
    }
}

#[test]
fn roundtrip_through_text() {
    for repr_type in RepresentationType::ALL {
        let text = repr_type.media_type().to_string();
        assert_eq!(RepresentationType::lookup_str(&text), repr_type);
    }
}

#[test]
fn when_unknown() {
    let svg = MediaType::new("image", "svg+xml");
    assert_eq!(
        RepresentationType::lookup(Some(&svg)),
        RepresentationType::Generic
    );
    assert_eq!(
        RepresentationType::lookup_str(r#"application/json;profile="urn:example:nope""#),
        RepresentationType::Generic
    );
    assert_eq!(
        RepresentationType::lookup_str("not a media type"),
        RepresentationType::Generic
    );
}

#[test]
fn when_null() {
    assert_eq!(RepresentationType::lookup(None), RepresentationType::Generic);
}

#[test]
fn media_type_profile() {
    assert_eq!(
        RepresentationType::Version.media_type_profile().as_deref(),
        Some("urn:org.restfulobjects:repr-types/version")
    );
    assert_eq!(RepresentationType::Generic.media_type_profile(), None);
}

#[test]
fn media_type_display() {
    insta::assert_snapshot!(
        RepresentationType::DomainObject.media_type().to_string(),
        @r#"application/json;profile="urn:org.restfulobjects:repr-types/domain-object""#
    );
    insta::assert_snapshot!(RepresentationType::Generic.media_type().to_string(), @"application/json");
}
