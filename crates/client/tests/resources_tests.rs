//! Resource endpoint tests: plugins, roles, groups, audit, cost,
//! notifications and business units.

mod common;

use std::sync::Arc;

use common::*;
use provisio_client::{
    AccessRequestStatus, AuditLogFilter, BusinessUnit, ClientError, GroupParams, ListQuery,
    MemorySessionStore, PluginPackage, ProvisioningClient, RoleParams, SessionStore,
};
use wiremock::matchers::{body_json, header, method, path, query_param};

const BU_ID: &str = "6f1c2a9e-2b7d-4c1e-9a51-3b1e4f5d6a7b";

#[tokio::test]
async fn test_plugin_catalog_parses_access_flags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("plugins/list.json")))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let plugins = client.list_plugins(&ListQuery::new()).await.unwrap().items;

    let pg = &plugins[0];
    assert!(pg.is_locked);
    assert!(!pg.can_provision());
    assert_eq!(pg.inputs.len(), 2);
    assert!(pg.inputs[0].required);

    assert!(plugins[1].can_provision());
    assert!(plugins[2].tags.is_empty());
}

#[tokio::test]
async fn test_lock_and_unlock_plugin() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/plugins/pg/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pg", "name": "Postgres", "is_locked": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/plugins/pg/unlock"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let locked = client.lock_plugin("pg").await.unwrap().unwrap();
    assert!(locked.is_locked);
    assert!(client.unlock_plugin("pg").await.unwrap().is_none());
}

#[tokio::test]
async fn test_access_request_flow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/plugins/pg/access-requests"))
        .and(body_json(serde_json::json!({"note": "need it for orders"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 5, "plugin_id": "pg", "status": "pending", "user_email": "dev@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/access-requests"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 5, "plugin_id": "pg", "status": "pending"},
            {"id": 6, "plugin_id": "pg", "status": "denied"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/plugins/access-requests/5/approve"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/plugins/access-requests/6/reject"))
        .and(body_json(serde_json::json!({"note": "not in budget"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));

    let request = client
        .request_plugin_access("pg", Some("need it for orders"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.id, "5");
    assert_eq!(request.user.as_deref(), Some("dev@example.com"));

    let pending = client
        .list_access_requests(&ListQuery::new(), Some("pending"))
        .await
        .unwrap();
    assert_eq!(pending.items[0].status, AccessRequestStatus::Pending);
    assert_eq!(pending.items[1].status, AccessRequestStatus::Rejected);

    client.approve_access_request("5").await.unwrap();
    client
        .reject_access_request("6", Some("not in budget"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_plugin_sends_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/plugins/upload"))
        .respond_with(|req: &Request| {
            let content_type = req
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
            let body = String::from_utf8_lossy(&req.body);
            assert!(body.contains("name=\"file\""));
            assert!(body.contains("filename=\"kafka.zip\""));
            assert!(body.contains("application/zip"));
            ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "kafka", "name": "Kafka"
            }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let plugin = client
        .upload_plugin(PluginPackage {
            file_name: "kafka.zip".to_string(),
            bytes: b"PK\x03\x04fake".to_vec(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(plugin.id, "kafka");
}

#[tokio::test]
async fn test_upload_rejects_empty_package_locally() {
    let (client, _store) = client_for("http://127.0.0.1:9", Some("tok"));
    let err = client
        .upload_plugin(PluginPackage {
            file_name: "empty.zip".to_string(),
            bytes: Vec::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_role_permissions_normalized_on_submit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/roles"))
        .and(body_json(serde_json::json!({
            "name": "Operators",
            "permissions": ["deployments:read", "deployments:create"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 3,
            "name": "Operators",
            "permissions": ["deployments:read", "deployments:create"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/roles/3"))
        .and(body_json(serde_json::json!({
            "name": "Operators",
            "permissions": ["audit:read"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3, "name": "Operators", "permissions": ["audit:read"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let params = RoleParams {
        name: "  Operators ".to_string(),
        description: None,
        permissions: vec![
            format!("bu:{BU_ID}:deployments:read"),
            "Deployments:Create".to_string(),
            "deployments:read".to_string(),
            " ".to_string(),
        ],
    };
    let role = client.create_role(&params).await.unwrap();
    assert_eq!(role.id, "3");

    let update = RoleParams {
        name: "Operators".to_string(),
        description: None,
        permissions: vec![format!("BU:{BU_ID}:AUDIT:READ")],
    };
    client.update_role("3", &update).await.unwrap();
}

#[tokio::test]
async fn test_permission_catalogue() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/permissions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("roles/permissions.json")),
        )
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let catalogue = client.list_permissions().await.unwrap();
    assert_eq!(catalogue.len(), 4);

    let matched = provisio_client::permissions::match_known(
        &["DEPLOYMENTS:READ", "billing:export"],
        &catalogue,
    );
    assert_eq!(matched.matched, vec!["deployments:read".to_string()]);
    assert_eq!(matched.unknown, vec!["billing:export".to_string()]);
}

#[tokio::test]
async fn test_group_crud_and_membership() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups"))
        .and(body_json(serde_json::json!({"name": "platform", "role_ids": ["3"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 11, "name": "platform", "role_ids": [3]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups/11/members/u-7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/groups/11/members/u-7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/groups/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let group = client
        .create_group(&GroupParams {
            name: "platform".to_string(),
            description: None,
            role_ids: vec!["3".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(group.id, "11");
    assert_eq!(group.role_ids, vec!["3".to_string()]);

    client.add_group_member("11", "u-7").await.unwrap();
    client.remove_group_member("11", "u-7").await.unwrap();
    client.delete_group("11").await.unwrap();
}

#[tokio::test]
async fn test_audit_logs_with_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/audit-logs"))
        .and(query_param("page", "2"))
        .and(query_param("action", "plugin.lock"))
        .and(query_param("start_date", "2024-05-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("audit/page.json")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let filter = AuditLogFilter {
        action: Some("plugin.lock".to_string()),
        start_date: Some("2024-05-01".to_string()),
        ..Default::default()
    };
    let page = client
        .list_audit_logs(&ListQuery::new().page(2).page_size(2), &filter)
        .await
        .unwrap();

    assert_eq!(page.total_pages(), 21);
    assert_eq!(page.items[1].details.as_ref().unwrap()["reason"], "cost");
}

#[tokio::test]
async fn test_cost_summary_and_deployment_cost() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/cost/summary"))
        .and(query_param("period", "2024-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("cost/summary.json")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/cost/deployments/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deployment_id": "abc",
            "total_cost": 12.5
        })))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let summary = client.cost_summary(Some("2024-05")).await.unwrap();
    assert_eq!(summary.currency, "EUR");
    assert!((summary.total - 1520.75).abs() < f64::EPSILON);
    assert_eq!(summary.by_plugin[1].key, "redis");
    assert!((summary.by_deployment[1].amount - 520.25).abs() < f64::EPSILON);

    let cost = client.deployment_cost("abc").await.unwrap();
    assert_eq!(cost.currency, "USD");
    assert!((cost.total - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_notifications() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/notifications"))
        .and(query_param("unread", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {"id": 1, "message": "orders-db is active", "type": "success", "is_read": false}
            ],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notifications/1/read"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server.uri(), Some("tok"));
    let page = client
        .list_notifications(&ListQuery::new(), true)
        .await
        .unwrap();
    assert_eq!(page.items[0].level.as_deref(), Some("success"));
    assert!(!page.items[0].read);

    client.mark_notification_read("1").await.unwrap();
}

#[tokio::test]
async fn test_deleting_active_business_unit_clears_scope() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/business-units/{BU_ID}")))
        .and(header("x-business-unit-id", BU_ID))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("tok"));
    let session: Arc<dyn SessionStore> = store.clone();
    let client = ProvisioningClient::builder()
        .base_url(server.uri())
        .session_store(session)
        .build()
        .unwrap();

    let unit: BusinessUnit = serde_json::from_value(serde_json::json!({
        "id": BU_ID,
        "name": "Retail"
    }))
    .unwrap();
    client.select_business_unit(&unit);
    assert_eq!(store.active_business_unit().unwrap().name, "Retail");

    client.delete_business_unit(BU_ID).await.unwrap();
    assert!(store.active_business_unit().is_none());
}
