use rorepr_core::{Representation, RepresentationType, Value};

use crate::model::HttpMethod;
use crate::resources::{Request, parse_target};
use crate::test_utils::{get_following, get_ok, handle, is_expanded, links, rels, url};

const USER_REL: &str = "urn:org.restfulobjects:rels/user";
const SERVICES_REL: &str = "urn:org.restfulobjects:rels/services";
const DETAILS_REL: &str = "urn:org.restfulobjects:rels/details";

fn member<'r>(repr: &'r Representation, id: &str) -> &'r Value {
    &repr.get("members").expect("members")[id]
}

fn error_status(request: Request) -> u16 {
    let response = handle(request);
    assert_eq!(
        response.media_type,
        RepresentationType::Error.media_type().to_string()
    );
    assert_eq!(response.body.get("httpStatusCode"), Some(&Value::from(response.status)));
    response.status
}

#[test]
fn splits_request_target() {
    assert_eq!(parse_target("/objects/CUS/1?a=b"), ("/objects/CUS/1", "a=b"));
    assert_eq!(parse_target("/user"), ("/user", ""));
}

#[test]
fn follow_links_are_encoded_into_the_query() {
    let request = Request::get("/?a=b").with_follow_links("links[rel=self]");
    assert_eq!(request.query, "a=b&x-ro-follow-links=links%5Brel%3Dself%5D");
    assert_eq!(request.params().follow_links().as_deref(), Some("links[rel=self]"));
}

#[test]
fn homepage_links_are_bare_by_default() {
    let home = get_ok("/");
    assert_eq!(
        rels(&home),
        [
            "self",
            USER_REL,
            SERVICES_REL,
            "urn:org.restfulobjects:rels/version",
            "urn:org.restfulobjects:rels/domain-types",
        ]
    );
    assert!(links(&home).iter().all(|l| !is_expanded(l)));
}

#[test]
fn homepage_follows_selected_link_only() {
    let home = get_following("/", &format!("links[rel={USER_REL}]"));

    let user = home.link(USER_REL).unwrap();
    assert_eq!(user.get("value").unwrap()["userName"], "sven");
    assert_eq!(user.get_str("href"), Some(url("user").as_str()));

    let version = home.link("urn:org.restfulobjects:rels/version").unwrap();
    assert!(!version.contains_key("value"));
}

#[test]
fn user_representation() {
    let user = get_ok("/user");
    insta::assert_snapshot!(serde_json::to_string_pretty(&user).unwrap(), @r#"
    {
      "links": [
        {
          "rel": "self",
          "href": "http://localhost/restful/user",
          "method": "GET",
          "type": "application/json;profile=\"urn:org.restfulobjects:repr-types/user\""
        },
        {
          "rel": "up",
          "href": "http://localhost/restful/",
          "method": "GET",
          "type": "application/json;profile=\"urn:org.restfulobjects:repr-types/homepage\""
        }
      ],
      "userName": "sven",
      "roles": [
        "admin",
        "clerk"
      ],
      "extensions": {}
    }
    "#);
}

#[test]
fn version_representation() {
    let version = get_ok("/version");
    assert_eq!(version.get_str("specVersion"), Some("1.0.0"));
    assert_eq!(version.get_str("implVersion"), Some(env!("CARGO_PKG_VERSION")));
    assert_eq!(
        version.get("optionalCapabilities").unwrap()["domainModel"],
        "formal"
    );
}

#[test]
fn object_expands_only_the_followed_relation() {
    let alice = get_following("/objects/CUS/1", "links[rel=describedby]");

    assert_eq!(rels(&alice), ["self", "describedby"]);
    let self_link = alice.link("self").unwrap();
    assert!(!self_link.contains_key("value"));
    assert_eq!(self_link.get_str("href"), Some(url("objects/CUS/1").as_str()));

    let described_by = alice.link("describedby").unwrap();
    let domain_type = described_by.get("value").unwrap();
    assert_eq!(domain_type["name"], "Customer");
    assert_eq!(domain_type["domainType"], "CUS");

    let details = &member(&alice, "name")["links"][0];
    assert_eq!(details["rel"], DETAILS_REL);
    assert!(!is_expanded(details));
}

#[test]
fn object_fields_and_members() {
    let alice = get_ok("/objects/CUS/1");
    assert_eq!(alice.get_str("domainType"), Some("CUS"));
    assert_eq!(alice.get_str("instanceId"), Some("1"));
    assert_eq!(alice.get_str("title"), Some("Alice"));
    assert!(!alice.contains_key("serviceId"));

    let ids: Vec<&String> = alice.get("members").unwrap().as_object().unwrap().keys().collect();
    assert_eq!(
        ids,
        [
            "name",
            "address",
            "bestFriend",
            "orders",
            "placeOrder",
            "updateAddress",
            "similarCustomers",
            "archive",
            "creditRating",
        ]
    );

    let name = member(&alice, "name");
    assert_eq!(name["memberType"], "property");
    assert_eq!(name["value"], "Alice");
    assert_eq!(name["disabledReason"], "Names are fixed once registered");
    assert!(member(&alice, "address").get("disabledReason").is_none());

    let extensions = alice.get("extensions").unwrap();
    assert_eq!(extensions["isService"], false);
    assert_eq!(extensions["isPersistent"], true);
}

#[test]
fn followed_member_criteria_select_one_member() {
    let alice = get_following(
        "/objects/CUS/1",
        &format!("members[propertyId=name].links[rel={DETAILS_REL}]"),
    );

    let details = &member(&alice, "name")["links"][0];
    let name = &details["value"];
    assert_eq!(name["id"], "name");
    assert_eq!(name["value"], "Alice");
    let name_rels: Vec<&str> = name["links"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["rel"].as_str())
        .collect();
    assert_eq!(name_rels, ["self", "up", "describedby"]);

    assert!(!is_expanded(&member(&alice, "address")["links"][0]));
    assert!(!is_expanded(&member(&alice, "orders")["links"][0]));
}

#[test]
fn member_sub_paths_stay_with_their_own_criteria() {
    let alice = get_following(
        "/objects/CUS/1",
        &format!("members[propertyId=name].links[rel={DETAILS_REL}],members[propertyId=address]"),
    );

    assert!(is_expanded(&member(&alice, "name")["links"][0]));
    assert!(!is_expanded(&member(&alice, "address")["links"][0]));
}

#[test]
fn reference_property_value_is_followed() {
    let alice = get_following("/objects/CUS/1", "members[propertyId=bestFriend].value");

    let best_friend = &member(&alice, "bestFriend")["value"];
    assert_eq!(best_friend["rel"], "urn:org.restfulobjects:rels/value");
    assert_eq!(best_friend["href"], url("objects/CUS/2"));
    assert_eq!(best_friend["value"]["title"], "Bob");

    // Bob's own members stay unexpanded.
    let bob = &best_friend["value"];
    assert!(bob["members"]["bestFriend"]["value"].is_null());
}

#[test]
fn hidden_member_is_absent_and_not_addressable() {
    let alice = get_ok("/objects/CUS/1");
    assert!(member(&alice, "notes").is_null());
    assert_eq!(error_status(Request::get("/objects/CUS/1/properties/notes")), 404);
}

#[test]
fn member_description_link_is_followed() {
    let name = get_following("/objects/CUS/1/properties/name", "links[rel=describedby]");

    let described_by = name.link("describedby").unwrap();
    assert_eq!(
        described_by.get_str("href"),
        Some(url("domainTypes/CUS/properties/name").as_str())
    );
    let description = described_by.get("value").unwrap();
    assert_eq!(description["id"], "name");
    assert_eq!(description["optional"], false);
    assert!(!is_expanded(name.link("self").unwrap().as_value()));

    let place_order = get_following("/objects/CUS/1/actions/placeOrder", "links[rel=describedby]");
    let action = place_order.link("describedby").unwrap();
    assert_eq!(action.get("value").unwrap()["id"], "placeOrder");

    let bare = get_ok("/objects/CUS/1/properties/name");
    assert!(!bare.link("describedby").unwrap().contains_key("value"));
}

#[test]
fn property_mutators_follow_usability() {
    let address = get_ok("/objects/CUS/1/properties/address");
    assert_eq!(
        rels(&address),
        [
            "self",
            "up",
            "describedby",
            "urn:org.restfulobjects:rels/modify",
            "urn:org.restfulobjects:rels/clear",
        ]
    );
    let modify = address.link("urn:org.restfulobjects:rels/modify").unwrap();
    assert_eq!(modify.get_str("method"), Some("PUT"));

    let name = get_ok("/objects/CUS/1/properties/name");
    assert_eq!(rels(&name), ["self", "up", "describedby"]);
    assert_eq!(name.get_str("disabledReason"), Some("Names are fixed once registered"));
}

#[test]
fn collection_lists_elements_on_its_own_resource() {
    let alice = get_ok("/objects/CUS/1");
    assert!(member(&alice, "orders").get("value").is_none());

    let orders = get_following("/objects/CUS/1/collections/orders", "value");
    let values = orders.get("value").unwrap().as_array().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["href"], url("objects/ORD/1"));
    assert_eq!(values[0]["value"]["title"], "Order O-1");

    let add_to = orders.link("urn:org.restfulobjects:rels/add-to").unwrap();
    assert_eq!(add_to.get_str("method"), Some("POST"));
    let remove_from = orders.link("urn:org.restfulobjects:rels/remove-from").unwrap();
    assert_eq!(remove_from.get_str("method"), Some("DELETE"));
    assert_eq!(orders.get("extensions").unwrap()["collectionSemantics"], "list");
}

#[test]
fn action_lists_parameters_and_invoke_link() {
    let place_order = get_ok("/objects/CUS/1/actions/placeOrder");

    let invoke = place_order.link("urn:org.restfulobjects:rels/invoke").unwrap();
    assert_eq!(invoke.get_str("method"), Some("POST"));
    assert_eq!(
        invoke.get_str("href"),
        Some(url("objects/CUS/1/actions/placeOrder/invoke").as_str())
    );
    assert_eq!(
        invoke.get("arguments").unwrap(),
        &serde_json::json!({"product": null, "quantity": null})
    );

    let parameters = place_order.get("parameters").unwrap().as_array().unwrap();
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[1]["num"], 1);
    assert_eq!(parameters[1]["id"], "quantity");
    assert_eq!(parameters[1]["choices"], serde_json::json!([1, 5, 10]));
    assert_eq!(parameters[1]["default"], 1);

    let extensions = place_order.get("extensions").unwrap();
    assert_eq!(extensions["actionSemantics"], "nonIdempotent");
    assert_eq!(extensions["actionType"], "user");
}

#[test]
fn inline_action_has_no_parameters() {
    let alice = get_ok("/objects/CUS/1");
    assert!(member(&alice, "placeOrder").get("parameters").is_none());
}

#[test]
fn disabled_action_cannot_be_invoked() {
    let archive = get_ok("/objects/CUS/1/actions/archive");
    assert!(archive.link("urn:org.restfulobjects:rels/invoke").is_none());
    assert_eq!(archive.get_str("disabledReason"), Some("Customer has open orders"));

    let request = Request::new(HttpMethod::Post, "/objects/CUS/1/actions/archive/invoke");
    assert_eq!(error_status(request), 403);
}

#[test]
fn invoke_returns_object_result() {
    let response = handle(Request::new(
        HttpMethod::Post,
        "/objects/CUS/1/actions/placeOrder/invoke?product=tea&quantity=5",
    ));
    assert_eq!(response.status, 200);
    assert_eq!(
        response.media_type,
        RepresentationType::ActionResult.media_type().to_string()
    );

    let result = response.body;
    assert_eq!(result.get_str("resulttype"), Some("domainobject"));
    assert_eq!(result.get("result").unwrap()["title"], "Order O-1");

    let self_link = result.link("self").unwrap();
    assert_eq!(self_link.get_str("method"), Some("POST"));
    assert_eq!(
        self_link.get("arguments").unwrap(),
        &serde_json::json!({"product": "tea", "quantity": "5"})
    );

    let changed = &result.get("extensions").unwrap()["changed"];
    assert_eq!(changed[0]["href"], url("objects/CUS/1"));
}

#[test]
fn invoke_requires_a_matching_method() {
    let get = Request::get("/objects/CUS/1/actions/placeOrder/invoke");
    assert_eq!(error_status(get), 405);

    let put = Request::new(HttpMethod::Put, "/objects/CUS/1/actions/placeOrder/invoke");
    assert_eq!(error_status(put), 405);

    let idempotent = handle(Request::new(
        HttpMethod::Put,
        "/objects/CUS/1/actions/updateAddress/invoke?address=2+High+St",
    ));
    assert_eq!(idempotent.status, 200);
}

#[test]
fn invoke_without_recorded_outcome_is_void() {
    let response = handle(Request::new(
        HttpMethod::Put,
        "/objects/CUS/2/actions/updateAddress/invoke",
    ));
    assert_eq!(response.status, 200);
    assert_eq!(response.body.get_str("resulttype"), Some("void"));
    assert!(!response.body.contains_key("result"));
}

#[test]
fn invoke_rejects_unknown_arguments() {
    let request = Request::new(
        HttpMethod::Put,
        "/objects/CUS/1/actions/updateAddress/invoke?colour=red",
    );
    assert_eq!(error_status(request), 404);
}

#[test]
fn safe_action_result_list_is_followed_through_result() {
    let result = get_ok("/objects/CUS/1/actions/similarCustomers/invoke");
    assert_eq!(result.get_str("resulttype"), Some("list"));
    let list = result.get("result").unwrap();
    assert_eq!(list["value"][0]["title"], "Bob");
    assert!(list["value"][0].get("value").is_none());

    let result = get_following("/objects/CUS/1/actions/similarCustomers/invoke", "result.value");
    let list = result.get("result").unwrap();
    assert_eq!(list["value"][0]["value"]["title"], "Bob");
}

#[test]
fn contributed_action_links_to_its_service() {
    let action = get_ok("/objects/CUS/2/actions/creditRating");

    let contributed_by = action
        .link("urn:org.restfulobjects:rels/contributed-by")
        .unwrap();
    assert_eq!(contributed_by.get_str("href"), Some(url("services/Customers").as_str()));

    let invoke = action.link("urn:org.restfulobjects:rels/invoke").unwrap();
    assert_eq!(invoke.get_str("method"), Some("GET"));
    let customer = &invoke.get("arguments").unwrap()["customer"];
    assert_eq!(customer["href"], url("objects/CUS/2"));

    let result = get_ok("/objects/CUS/2/actions/creditRating/invoke");
    assert_eq!(result.get_str("resulttype"), Some("scalarvalue"));
    assert_eq!(result.get("result").unwrap()["value"], 42);
}

#[test]
fn services_list_follows_by_service_id() {
    let services = get_following(
        "/services",
        r#"value[rel=urn:org.restfulobjects:rels/service;serviceId="Customers"]"#,
    );
    let values = services.get("value").unwrap().as_array().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(
        values[0]["rel"],
        r#"urn:org.restfulobjects:rels/service;serviceId="Customers""#
    );
    assert_eq!(values[0]["value"]["serviceId"], "Customers");
    assert!(!is_expanded(&values[1]));
}

#[test]
fn homepage_follows_into_one_service() {
    let home = get_following(
        "/",
        &format!("links[rel={SERVICES_REL}].value[serviceId=Reports]"),
    );
    let services = home.link(SERVICES_REL).unwrap();
    let list = services.get("value").unwrap();
    assert!(!is_expanded(&list["value"][0]));
    assert_eq!(list["value"][1]["value"]["title"], "Reports");
}

#[test]
fn service_is_addressed_by_service_id() {
    let service = get_ok("/services/Customers");
    assert_eq!(service.get_str("serviceId"), Some("Customers"));
    assert_eq!(
        service.link("self").unwrap().get_str("href"),
        Some(url("services/Customers").as_str())
    );
    assert_eq!(member(&service, "findByName")["memberType"], "action");

    let result = get_ok("/services/Customers/actions/findByName/invoke?name=Alice");
    assert_eq!(result.get("result").unwrap()["title"], "Alice");
}

#[test]
fn type_list_follows_selected_types() {
    let types = get_following("/domainTypes", "values[title=Customer]");
    let values = types.get("values").unwrap().as_array().unwrap();
    assert_eq!(values.len(), 7);
    let expanded: Vec<&Value> = values.iter().filter(|v| is_expanded(v)).collect();
    assert_eq!(expanded.len(), 1);
    assert_eq!(expanded[0]["value"]["domainType"], "CUS");
}

#[test]
fn domain_type_members_and_type_actions() {
    let customer = get_following("/domainTypes/CUS", "members[propertyId=name]");
    assert_eq!(customer.get_str("name"), Some("Customer"));
    assert_eq!(customer.get_str("pluralName"), Some("Customers"));
    assert_eq!(customer.get("isService"), Some(&Value::Bool(false)));

    let members = customer.get("members").unwrap().as_array().unwrap();
    assert_eq!(members.len(), 10);
    assert_eq!(members[0]["value"]["id"], "name");
    assert!(members[1..].iter().all(|m| !is_expanded(m)));

    let type_action = &customer.get("typeActions").unwrap()[0];
    assert_eq!(type_action["id"], "isSubtypeOf");
    assert_eq!(
        type_action["href"],
        url("domainTypes/CUS/typeactions/isSubtypeOf/invoke")
    );
}

#[test]
fn action_description_follows_parameters() {
    let description = get_following("/domainTypes/CUS/actions/placeOrder", "parameters");
    let parameters = description.get("parameters").unwrap().as_array().unwrap();
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0]["value"]["number"], 0);
    assert_eq!(parameters[1]["value"]["id"], "quantity");
    assert_eq!(description.get_str("actionSemantics"), Some("nonIdempotent"));
}

#[test]
fn param_description_links_up_to_its_action() {
    let quantity = get_ok("/domainTypes/CUS/actions/placeOrder/params/quantity");
    assert_eq!(quantity.get("number"), Some(&Value::from(1)));
    assert_eq!(
        quantity.link("up").unwrap().get_str("href"),
        Some(url("domainTypes/CUS/actions/placeOrder").as_str())
    );
    assert_eq!(quantity.get("extensions").unwrap()["friendlyName"], "Quantity");
}

#[test]
fn property_description_follows_return_type() {
    let name = get_following(
        "/domainTypes/CUS/properties/bestFriend",
        "links[rel=urn:org.restfulobjects:rels/return-type]",
    );
    let return_type = name.link("urn:org.restfulobjects:rels/return-type").unwrap();
    assert_eq!(return_type.get("value").unwrap()["name"], "Customer");
    assert_eq!(name.get("optional"), Some(&Value::Bool(true)));
}

#[test]
fn is_subtype_of_type_action() {
    let result = get_ok("/domainTypes/CUS/typeactions/isSubtypeOf/invoke?supertype=PTY");
    assert_eq!(result.get("value"), Some(&Value::Bool(true)));

    let result = get_ok("/domainTypes/PTY/typeactions/isSubtypeOf/invoke?supertype=CUS");
    assert_eq!(result.get("value"), Some(&Value::Bool(false)));

    let missing = Request::get("/domainTypes/CUS/typeactions/isSubtypeOf/invoke");
    assert_eq!(error_status(missing), 400);
    let unknown = Request::get("/domainTypes/CUS/typeactions/isSubtypeOf/invoke?supertype=XYZ");
    assert_eq!(error_status(unknown), 404);
}

#[test]
fn unknown_resources_are_not_found() {
    assert_eq!(error_status(Request::get("/nope")), 404);
    assert_eq!(error_status(Request::get("/objects/CUS/9")), 404);
    assert_eq!(error_status(Request::get("/objects/CUS/1/properties/shoeSize")), 404);
    assert_eq!(error_status(Request::get("/services/Missing")), 404);
    assert_eq!(error_status(Request::get("/domainTypes/XYZ")), 404);
}

#[test]
fn unknown_member_message() {
    let response = handle(Request::get("/objects/CUS/1/collections/friends"));
    assert_eq!(
        response.body.get_str("message"),
        Some("collection `friends` not found on `CUS/1`")
    );
}

#[test]
fn mutating_methods_are_not_allowed_on_plain_resources() {
    assert_eq!(error_status(Request::new(HttpMethod::Post, "/user")), 405);
    assert_eq!(
        error_status(Request::new(HttpMethod::Delete, "/objects/CUS/1")),
        405
    );
}

#[test]
fn accept_without_json_is_not_acceptable() {
    let response = handle(Request::get("/user").with_accept("application/atom+xml"));
    assert_eq!(response.status, 406);
    assert_eq!(
        response.media_type,
        RepresentationType::Error.media_type().to_string()
    );
    assert_eq!(
        get_ok_with_accept("/user", "application/*").get_str("userName"),
        Some("sven")
    );
}

fn get_ok_with_accept(target: &str, accept: &str) -> Representation {
    let response = handle(Request::get(target).with_accept(accept));
    assert_eq!(response.status, 200);
    response.body
}

#[test]
fn accept_profile_mismatch_is_not_acceptable() {
    let request = Request::get("/user")
        .with_accept(r#"application/json;profile="urn:org.restfulobjects:repr-types/version""#);
    assert_eq!(error_status(request), 406);

    let response = handle(
        Request::get("/user")
            .with_accept(r#"application/json;profile="urn:org.restfulobjects:repr-types/user""#),
    );
    assert_eq!(response.status, 200);
}

#[test]
fn malformed_follow_links_is_a_bad_request_with_detail() {
    let response = handle(Request::get("/").with_follow_links("links[rel=self"));
    assert_eq!(response.status, 400);
    assert_eq!(response.body.get("httpStatusCode"), Some(&Value::from(400)));

    let detail = response.body.get("detail").unwrap().as_array().unwrap();
    assert!(detail[0].as_str().unwrap().starts_with("error:"));
    assert!(detail.iter().any(|l| l.as_str() == Some("1 | links[rel=self")));
}
