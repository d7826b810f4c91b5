//! HTTP request and response handling tests.
//!
//! # Invariants
//! - JSON content type is always sent; bearer and business-unit headers only
//!   when the session has them
//! - `204` and empty bodies resolve to no content without error
//! - Error messages come from `detail`, `message`, `error`, then status text
//! - A `400` about a missing business unit is its own error variant

mod common;

use std::sync::Arc;

use common::*;
use provisio_client::endpoints::ApiRequest;
use provisio_client::{ClientError, MemorySessionStore, ProvisioningClient, SessionStore};
use provisio_config::BusinessUnitRef;
use wiremock::matchers::{header, method, path};

#[tokio::test]
async fn test_headers_include_token_and_business_unit() {
    let server = MockServer::start().await;
    let bu = uuid::Uuid::parse_str("6f1c2a9e-2b7d-4c1e-9a51-3b1e4f5d6a7b").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/deployments"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer tok"))
        .and(header("x-business-unit-id", bu.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("tok"));
    store.set_active_business_unit(Some(BusinessUnitRef {
        id: bu,
        name: "Retail".to_string(),
    }));
    let session: Arc<dyn SessionStore> = store;
    let client = ProvisioningClient::builder()
        .base_url(format!("{}/", server.uri()))
        .session_store(session)
        .build()
        .unwrap();

    let page = client
        .list_deployments(&Default::default(), &Default::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/plugins"))
        .respond_with(|req: &Request| {
            assert!(bearer_of(req).is_none());
            assert!(req.headers.get("x-business-unit-id").is_none());
            ResponseTemplate::new(200).set_body_json(load_fixture("plugins/list.json"))
        })
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), None);
    let page = client.list_plugins(&Default::default()).await.unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[2].id, "9");
}

#[tokio::test]
async fn test_204_and_empty_body_are_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/deployments/abc"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notifications/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("   "))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    client.delete_deployment("abc").await.unwrap();
    client.mark_all_notifications_read().await.unwrap();

    let raw = client
        .execute(ApiRequest::post("/api/v1/notifications/read-all"))
        .await
        .unwrap();
    assert!(raw.is_none());
}

#[tokio::test]
async fn test_error_message_from_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/deployments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "detail": "A deployment named orders-db already exists"
        })))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let params = provisio_client::CreateDeploymentParams {
        plugin_id: "pg".to_string(),
        name: "orders-db".to_string(),
        version: None,
        inputs: Default::default(),
    };
    let err = client.create_deployment(&params).await.unwrap_err();

    match err {
        ClientError::RequestFailed { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "A deployment named orders-db already exists");
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_message_falls_back_to_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/cost/summary"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let err = client.cost_summary(None).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (503): Service Unavailable");
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_validation_errors_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address"},
                {"loc": ["body", "password"], "msg": "ensure this value has at least 8 characters"}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let err = client
        .create_user(&provisio_client::UserParams {
            email: Some("nope".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Request failed (422): value is not a valid email address; ensure this value has at least 8 characters"
    );
}

#[tokio::test]
async fn test_missing_business_unit_is_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/deployments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Business unit context required"
        })))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let err = client
        .list_deployments(&Default::default(), &Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::BusinessUnitContext { .. }));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    let (client, _store) = client_for("http://127.0.0.1:9", Some("tok"));
    let err = client.get_deployment("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::HttpError(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_invalid_json_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/deployments/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let err = client.get_deployment("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unversioned_paths_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/legacy/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), None);
    let body = client
        .execute(ApiRequest::get("/api/legacy/health"))
        .await
        .unwrap();
    assert_eq!(body, Some(serde_json::json!({"ok": true})));
}

#[tokio::test]
async fn test_ids_are_percent_encoded_in_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "a/b",
            "email": "ab@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let user = client.get_user("a/b").await.unwrap();
    assert_eq!(user.id, "a/b");
}
