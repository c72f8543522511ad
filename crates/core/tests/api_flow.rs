//! End-to-end flows through facade, session and transport over a mock exchange

mod support;

use std::sync::Arc;

use responsys_core::MemoryTransactionLog;
use responsys_domain::{ErrorKind, Operation, OptionalData, ResponsysError};
use serde_json::{json, Value};
use support::{authenticated_exchange, BrokenRecorder, Harness};

const LISTS: &str = "/lists/CONTACTS_LIST";

fn body_of(request: &responsys_core::HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().unwrap_or("null")).unwrap()
}

#[tokio::test]
async fn merge_contact_posts_expected_payload() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 200, json!({ "recordData": { "records": [] } }));
    let harness = Harness::new(exchange);

    harness.api.merge_contact("jane@example.com", "CUST-42").await.unwrap();

    let merges = harness.exchange.requests_to(LISTS);
    assert_eq!(merges.len(), 1);
    assert_eq!(merges[0].url, "https://api.example.com/rest/api/v1/lists/CONTACTS_LIST");
    assert_eq!(merges[0].headers.get("Authorization"), Some("tok-1"));
    assert_eq!(merges[0].headers.get("Content-Type"), Some("application/json"));
    assert_eq!(merges[0].headers.get("User-Agent"), Some("responsys-tests/1.0"));

    let body = body_of(&merges[0]);
    assert_eq!(
        body,
        json!({
            "list": { "folderName": "MasterData" },
            "recordData": {
                "fieldNames": ["EMAIL_ADDRESS_", "CUSTOMER_ID_", "DATABASE_ID"],
                "records": [ { "fieldValues": ["jane@example.com", "CUST-42", "DB1"] } ]
            },
            "mergeRule": {
                "htmlValue": "H",
                "optinValue": "I",
                "textValue": "T",
                "insertOnNoMatch": true,
                "updateOnMatch": "REPLACE_ALL",
                "matchColumnName1": "CUSTOMER_ID_",
                "matchColumnName2": "DATABASE_ID",
                "matchOperator": "NONE",
                "optoutValue": 0,
                "rejectRecordIfChannelEmpty": null,
                "defaultPermissionStatus": "OPTIN"
            }
        })
    );
}

#[tokio::test]
async fn trigger_merges_first_then_posts_event() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 200, json!({}));
    exchange.respond_json("/events/API_SIGNUP", 200, json!([{ "success": true }]));
    let harness = Harness::new(exchange);

    let mut optional = OptionalData::new();
    optional.insert("source".into(), json!("web"));

    let result = harness
        .api
        .trigger_custom_event("SIGNUP", "jane@example.com", "CUST-42", optional)
        .await
        .unwrap();
    assert_eq!(result, json!([{ "success": true }]));

    let urls: Vec<_> = harness.exchange.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].contains("/auth/token?"));
    assert!(urls[1].ends_with(LISTS));
    assert_eq!(urls[2], "https://api.example.com/rest/api/v1/events/API_SIGNUP");

    let event = harness.exchange.requests_to("/events/API_SIGNUP").remove(0);
    assert_eq!(event.headers.get("Authorization"), Some("tok-1"));
    let body = body_of(&event);
    assert_eq!(body["recipientData"][0]["optionalData"], json!({ "source": "web" }));
    assert_eq!(
        body["recipientData"][0]["recipient"],
        json!({
            "customerId": "CUST-42",
            "emailAddress": "jane@example.com",
            "listName": { "folderName": "MasterData", "objectName": "CONTACTS_LIST" },
            "recipientId": null,
            "mobileNumber": null,
            "emailFormat": "HTML_FORMAT"
        })
    );
}

#[tokio::test]
async fn failed_merge_prevents_event() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 400, json!({ "errorCode": "X", "detail": "bad request" }));
    exchange.respond_json("/events/API_SIGNUP", 200, json!({}));
    let harness = Harness::new(exchange);

    let err = harness
        .api
        .trigger_custom_event("SIGNUP", "jane@example.com", "CUST-42", OptionalData::new())
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::MergeContact));
    assert_eq!(err.remote_detail(), Some("bad request"));
    assert!(harness.exchange.requests_to("/events/API_SIGNUP").is_empty());
}

#[tokio::test]
async fn non_json_response_is_protocol_error_and_audited() {
    let exchange = authenticated_exchange();
    exchange.respond_body(LISTS, 503, "Service Unavailable");
    let harness = Harness::new(exchange);

    let err = harness.api.merge_contact("jane@example.com", "CUST-42").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(err.root_cause().to_string(), "Invalid response from Responsys.");

    let record = harness.log.last().await.unwrap();
    assert!(record.request_uri.ends_with(LISTS));
    assert_eq!(record.response_status, 503);
    assert_eq!(record.response_error.as_deref(), Some("Invalid response from Responsys."));
}

#[tokio::test]
async fn remote_error_detail_reaches_caller_and_audit() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 400, json!({ "errorCode": "X", "detail": "bad request" }));
    let harness = Harness::new(exchange);

    let err = harness.api.merge_contact("jane@example.com", "CUST-42").await.unwrap_err();

    assert_eq!(err.to_string(), "Unable to add member details to contacts list");
    assert_eq!(err.root_cause().to_string(), "bad request");
    assert_eq!(
        harness.log.last().await.unwrap().response_error.as_deref(),
        Some("bad request")
    );
}

#[tokio::test]
async fn authenticates_once_across_operations() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 200, json!({}));
    let harness = Harness::new(exchange);

    harness.api.merge_contact("a@example.com", "1").await.unwrap();
    harness.api.merge_contact("b@example.com", "2").await.unwrap();
    harness.api.merge_contact("c@example.com", "3").await.unwrap();

    assert_eq!(harness.exchange.requests_to("/auth/token").len(), 1);
    assert_eq!(harness.exchange.requests_to(LISTS).len(), 3);
    assert_eq!(harness.log.len().await, 4);
}

#[tokio::test]
async fn reauthenticate_performs_one_round_trip() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 200, json!({}));
    let harness = Harness::new(exchange);

    harness.api.merge_contact("a@example.com", "1").await.unwrap();
    harness.exchange.respond_json("/auth/token", 200, json!({ "authToken": "tok-2" }));

    let token = harness.session.reauthenticate().await.unwrap();
    assert_eq!(token.expose(), "tok-2");
    assert_eq!(harness.exchange.requests_to("/auth/token").len(), 2);

    harness.api.merge_contact("a@example.com", "1").await.unwrap();
    let last = harness.exchange.requests_to(LISTS).pop().unwrap();
    assert_eq!(last.headers.get("Authorization"), Some("tok-2"));
}

#[tokio::test]
async fn invalid_event_names_send_no_requests() {
    let harness = Harness::new(authenticated_exchange());
    let overlong = "x".repeat(101);

    for name in ["../x", "a b", "API/other", "événement", overlong.as_str()] {
        let err = harness
            .api
            .trigger_custom_event(name, "jane@example.com", "CUST-42", OptionalData::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "{name}");
    }

    assert!(harness.exchange.requests().is_empty());
    assert!(harness.log.is_empty().await);
}

#[tokio::test]
async fn auth_failure_surfaces_through_operation() {
    let exchange = support::MockExchange::new();
    exchange.respond_json("/auth/token", 200, json!({ "issuedAt": 1 }));
    let harness = Harness::new(exchange);

    let err = harness.api.merge_contact("jane@example.com", "CUST-42").await.unwrap_err();

    assert_eq!(err.operation(), Some(Operation::MergeContact));
    assert_eq!(err.kind(), ErrorKind::Initialization);
    assert!(harness.exchange.requests_to(LISTS).is_empty());
}

#[tokio::test]
async fn transport_failure_is_classified_and_audited() {
    let exchange = authenticated_exchange();
    exchange.fail(LISTS, "connection reset by peer");
    let harness = Harness::new(exchange);

    let err = harness.api.merge_contact("jane@example.com", "CUST-42").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    let record = harness.log.last().await.unwrap();
    assert_eq!(record.response_status, 0);
    assert_eq!(record.response_error.as_deref(), Some("connection reset by peer"));
}

#[tokio::test]
async fn recorder_failure_does_not_mask_errors() {
    let exchange = authenticated_exchange();
    exchange.respond_json(LISTS, 400, json!({ "errorCode": "X", "detail": "bad request" }));
    let harness = Harness::with_recorder(
        exchange,
        Arc::new(MemoryTransactionLog::new()),
        Arc::new(BrokenRecorder),
    );

    let err = harness.api.merge_contact("jane@example.com", "CUST-42").await.unwrap_err();

    assert!(matches!(err.root_cause(), ResponsysError::Remote { .. }));
    assert_eq!(err.remote_detail(), Some("bad request"));
}
