mod common;

use common::*;
use leadsync_core::{ApolloClient, HubspotClient, HunterClient, LeadPipeline, PipelineOptions};
use serde_json::json;
use shared_types::SearchRequest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline(server: &MockServer) -> LeadPipeline {
    LeadPipeline::new(
        ApolloClient::with_base_url(server.uri(), None).unwrap(),
        HunterClient::with_base_url(server.uri(), None).unwrap(),
        HubspotClient::with_base_url(server.uri(), None).unwrap(),
    )
}

async fn mount_three_contacts(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(CONTACTS_SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [
                apollo_contact(1, 0),
                { "id": "no-email", "first_name": "Nobody" },
                apollo_contact(1, 2)
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_verify_push_end_to_end() {
    let server = MockServer::start().await;
    mount_three_contacts(&server).await;
    Mock::given(method("GET"))
        .and(path(EMAIL_VERIFIER))
        .respond_with(ResponseTemplate::new(200).set_body_json(hunter_data("deliverable", 90)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(HUBSPOT_CONTACTS))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "42" })))
        .expect(2)
        .mount(&server)
        .await;

    let request = SearchRequest::new("apollo-key", "fintech").with_total(3).with_per_page(3);
    let report = pipeline(&server)
        .fetch_verify_push(&request, Some("hunter-key"), Some("token"), PipelineOptions::default())
        .await
        .unwrap();

    assert_eq!(report.total, 2);
    assert!(report.contacts.iter().all(|c| c.is_deliverable()));
    assert_eq!(report.crm_results.len(), 2);
    assert!(report.crm_results.iter().all(|r| r.is_success()));
    assert!(report.completed_at >= report.started_at);
}

#[tokio::test]
async fn skipped_stages_make_no_calls() {
    let server = MockServer::start().await;
    mount_three_contacts(&server).await;
    Mock::given(method("GET"))
        .and(path(EMAIL_VERIFIER))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(HUBSPOT_CONTACTS))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let request = SearchRequest::new("apollo-key", "fintech").with_total(3).with_per_page(3);
    let options = PipelineOptions {
        verify: false,
        push: false,
    };
    let report = pipeline(&server)
        .fetch_verify_push(&request, Some("hunter-key"), Some("token"), options)
        .await
        .unwrap();

    assert_eq!(report.total, 3);
    assert!(report.contacts.iter().all(|c| c.verification_result.is_none()));
    assert!(report.crm_results.is_empty());
}

#[tokio::test]
async fn fetch_failure_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONTACTS_SEARCH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let request = SearchRequest::new("apollo-key", "fintech").with_total(3);
    let err = pipeline(&server)
        .fetch_verify_push(&request, Some("hunter-key"), Some("token"), PipelineOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), 401);
}
