//! Deployment commands against a mock backend.

mod common;

use common::*;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};

#[tokio::test]
async fn test_list_renders_table_with_footer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deployments"))
        .and(query_param("page", "2"))
        .and(query_param("status", "active"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [deployment_json("abc", "active")],
            "total": 21,
            "page": 2,
            "page_size": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "list", "--page", "2", "--status", "active"])
        .assert()
        .success()
        .stdout(predicates::str::contains("orders-db"))
        .stdout(predicates::str::contains("Showing 21-21 of 21 (page 2 of 2)"));
}

#[tokio::test]
async fn test_active_business_unit_is_sent_as_header() {
    let server = MockServer::start().await;
    let bu = "6f1c2a9e-2b7d-4c1e-9a51-3b1e4f5d6a7b";
    Mock::given(method("GET"))
        .and(path("/api/v1/deployments"))
        .and(header("X-Business-Unit-Id", bu))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = SeededSession::with_business_unit("tok", bu, "Payments");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No deployments found."));
}

#[tokio::test]
async fn test_create_fills_plugin_defaults_and_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/pg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pg",
            "name": "Postgres",
            "version": "15.2",
            "is_locked": false,
            "inputs": [
                {"name": "size", "type": "string", "required": true},
                {"name": "region", "type": "string", "required": true, "default": "eu-west-1"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/deployments"))
        .and(body_partial_json(serde_json::json!({
            "plugin_id": "pg",
            "name": "orders-db",
            "version": "15.2",
            "inputs": {"size": "small", "region": "eu-west-1"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(deployment_json("abc", "provisioning")))
        .expect(1)
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    provisio_with(&server.uri(), &session)
        .args([
            "deployments", "create", "-p", "pg", "-n", "orders-db", "-i", "size=small", "-o", "json",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"provisioning\""));
}

#[tokio::test]
async fn test_create_missing_required_input_fails_before_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/pg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pg",
            "name": "Postgres",
            "inputs": [{"name": "size", "type": "string", "required": true}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/deployments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "create", "-p", "pg", "-n", "orders-db"])
        .assert()
        .code(5)
        .stderr(predicates::str::contains("Missing required inputs: size"));
}

#[tokio::test]
async fn test_create_of_locked_plugin_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/pg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pg",
            "name": "Postgres",
            "is_locked": true,
            "has_access": false
        })))
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "create", "-p", "pg", "-n", "orders-db"])
        .assert()
        .code(5)
        .stderr(predicates::str::contains("Request access"));
}

#[tokio::test]
async fn test_retry_watches_until_settled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/deployments/abc/retry"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deployments/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deployment_json("abc", "active")))
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "retry", "abc", "--quiet", "-o", "json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"active\""));
}

#[tokio::test]
async fn test_delete_with_force_skips_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/deployments/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "delete", "abc", "--force"])
        .assert()
        .success()
        .stdout(predicates::str::contains("is being deleted"));
}

#[tokio::test]
async fn test_output_file_receives_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deployments/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deployment_json("abc", "failed")))
        .mount(&server)
        .await;

    let session = SeededSession::with_token("tok");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("deployment.json");
    provisio_with(&server.uri(), &session)
        .args(["deployments", "get", "abc", "-o", "json", "--output-file"])
        .arg(&out)
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["status"], "failed");
}
