//! Integration tests for request dispatch against a mock server.
//!
//! These tests drive [`NotionClient`] through the real reqwest transport
//! and verify headers, error mapping and retries.

use std::sync::Arc;
use std::time::Duration;

use notion_api::models::{CheckboxFilter, Filter, Page, Parent, PropertyCondition};
use notion_api::rest::DatabaseQuery;
use notion_api::{
    ApiKey, ApiVersion, ClientError, ConstantBackoff, NotionClient, NotionConfig, RateLimit,
    RequestContext, ResultLimit,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_ID: &str = "b55c9c91-384d-452b-81db-d1ef79372b75";
const DATABASE_ID: &str = "668d797c-76fa-4934-9b05-ad288df2d136";
const USER_ID: &str = "6794760a-1f15-45cd-9c65-0dfe42f5135a";

/// Creates a client pointed at the mock server with fast retries.
fn create_test_client(server: &MockServer, retry_on_429: bool) -> NotionClient {
    let config = NotionConfig::builder()
        .api_key(ApiKey::new("secret_test").unwrap())
        .api_version(ApiVersion::V2021_08_16)
        .base_url(server.uri())
        .max_retries(2)
        .retry_on_429(retry_on_429)
        .rate_limit(RateLimit::new(1000.0, 100).unwrap())
        .backoff(Arc::new(ConstantBackoff::new(Duration::from_millis(1))))
        .build()
        .unwrap();
    NotionClient::new(&config).unwrap()
}

fn page_json(id: &str) -> serde_json::Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2021-05-13T11:00:00Z",
        "last_edited_time": "2021-05-13T11:30:00Z",
        "parent": {"type": "database_id", "database_id": DATABASE_ID},
        "archived": false,
        "properties": {
            "Name": {
                "id": "title",
                "type": "title",
                "title": [{"type": "text", "text": {"content": "Tuscan kale"}, "plain_text": "Tuscan kale"}]
            }
        }
    })
}

fn error_json(status: u16, code: &str, message: &str) -> serde_json::Value {
    json!({"object": "error", "status": status, "code": code, "message": message})
}

// ============================================================================
// Headers and Request Shape
// ============================================================================

#[tokio::test]
async fn test_get_sends_auth_and_version_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{USER_ID}")))
        .and(header("Authorization", "Bearer secret_test"))
        .and(header("Notion-Version", "2021-08-16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "user",
            "id": USER_ID,
            "type": "bot",
            "bot": {},
            "name": "Doug Engelbot"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let user = client
        .get_user(&RequestContext::background(), USER_ID.parse().unwrap())
        .await
        .unwrap();

    assert_eq!(user.name.as_deref(), Some("Doug Engelbot"));
    assert!(user.is_bot());
}

#[tokio::test]
async fn test_post_query_sends_json_body_with_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/databases/{DATABASE_ID}/query")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "filter": {"property": "Done", "checkbox": {"equals": true}},
            "page_size": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [page_json(PAGE_ID)],
            "next_cursor": null,
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let query = DatabaseQuery::new().filter(Filter::property(
        "Done",
        PropertyCondition::Checkbox(CheckboxFilter::Equals(true)),
    ));
    let rows = client
        .query_database(&RequestContext::background(), DATABASE_ID.parse().unwrap(), &query)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title().as_deref(), Some("Tuscan kale"));
    assert!(!rows.has_more());
    assert!(rows.next_cursor().is_none());
}

#[tokio::test]
async fn test_get_listing_sends_page_size_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [
                {"object": "user", "id": USER_ID, "type": "person", "person": {"email": "avo@example.org"}}
            ],
            "next_cursor": null,
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let users = client
        .list_users(&RequestContext::background(), None, ResultLimit::AtMost(10))
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email(), Some("avo@example.org"));
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_not_found_surfaces_api_error_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{PAGE_ID}")))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "req-123")
                .set_body_json(error_json(
                    404,
                    "object_not_found",
                    "Could not find page.",
                )),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let error = client
        .get_page(&RequestContext::background(), PAGE_ID.parse().unwrap())
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(error.code(), Some("object_not_found"));
    let api = error.api_error().unwrap();
    assert_eq!(api.status, 404);
    assert_eq!(api.request_id.as_deref(), Some("req-123"));
    assert!(error.to_string().contains("404 Not Found"));
}

#[tokio::test]
async fn test_non_json_error_body_is_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/blocks/{PAGE_ID}")))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let error = client
        .get_block(&RequestContext::background(), PAGE_ID.parse().unwrap())
        .await
        .unwrap_err();

    match error {
        ClientError::UnexpectedResponse {
            status_text, body, ..
        } => {
            assert_eq!(status_text, "400 Bad Request");
            assert!(body.contains("bad gateway"));
        }
        other => panic!("expected UnexpectedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{PAGE_ID}")))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_json(
            429,
            "rate_limited",
            "Slow down.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, false);
    let error = client
        .get_page(&RequestContext::background(), PAGE_ID.parse().unwrap())
        .await
        .unwrap_err();

    assert!(error.is_rate_limited());
}

#[tokio::test]
async fn test_missing_id_is_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let page = Page::new(Parent::workspace());
    let error = client
        .update_page_properties(&RequestContext::background(), &page)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ClientError::MissingField {
            entity: "page",
            field: "id"
        }
    ));
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{PAGE_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_json(
            500,
            "internal_server_error",
            "Oops.",
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{PAGE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(PAGE_ID)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let page = client
        .get_page(&RequestContext::background(), PAGE_ID.parse().unwrap())
        .await
        .unwrap();

    assert_eq!(page.id.map(|id| id.to_string()).as_deref(), Some(PAGE_ID));
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{PAGE_ID}")))
        .respond_with(ResponseTemplate::new(503).set_body_json(error_json(
            503,
            "service_unavailable",
            "Try later.",
        )))
        .expect(3)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let error = client
        .get_page(&RequestContext::background(), PAGE_ID.parse().unwrap())
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some("service_unavailable"));
}
