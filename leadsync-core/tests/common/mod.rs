#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CONTACTS_SEARCH: &str = "/api/v1/contacts/search";
pub const ORGANIZATIONS_SEARCH: &str = "/api/v1/organizations/search";
pub const TOP_PEOPLE: &str = "/api/v1/mixed_people/organization_top_people";
pub const EMAIL_VERIFIER: &str = "/v2/email-verifier";
pub const HUBSPOT_CONTACTS: &str = "/crm/v3/objects/contacts";
pub const HUBSPOT_COMPANIES: &str = "/crm/v3/objects/companies";
pub const HUBSPOT_ASSOCIATIONS: &str = "/crm/v4/associations/contacts/companies/batch/create";

/// A contact-search record shaped the way Apollo returns it, with the phone
/// only available under `phones` and the company under `account`.
pub fn apollo_contact(page: u32, index: usize) -> Value {
    json!({
        "id": format!("c{page}-{index}"),
        "first_name": "Ada",
        "last_name": format!("P{page}I{index}"),
        "title": "CTO",
        "email": format!("ada.{page}.{index}@example.com"),
        "contact_email_status": "verified",
        "phones": [{ "number": "+1 555 0100" }],
        "account": { "name": "Example Corp" }
    })
}

/// Mounts one contact-search page per entry of `sizes`, matched on the
/// `page` field of the request body. Each page expects exactly one request.
pub async fn mount_contact_pages(server: &MockServer, sizes: &[usize]) {
    for (i, size) in sizes.iter().enumerate() {
        let page = i as u32 + 1;
        let contacts: Vec<Value> = (0..*size).map(|index| apollo_contact(page, index)).collect();

        Mock::given(method("POST"))
            .and(path(CONTACTS_SEARCH))
            .and(body_partial_json(json!({ "page": page })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contacts": contacts })))
            .expect(1)
            .mount(server)
            .await;
    }
}

/// Responds to any creation on `object_path` with `201` and the given id.
pub async fn mount_hubspot_create(server: &MockServer, object_path: &str, id: &str) {
    Mock::given(method("POST"))
        .and(path(object_path))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": id })))
        .mount(server)
        .await;
}

pub fn hunter_data(result: &str, score: i64) -> Value {
    json!({
        "data": {
            "result": result,
            "score": score,
            "smtp_check": result == "deliverable"
        }
    })
}
