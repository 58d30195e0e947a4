//! Mock Airtable tests.
//!
//! These tests use wiremock to simulate the Airtable REST API and verify the
//! store's wire behavior without network access or real credentials.

use biostart_airtable::{AirtableConfig, AirtableStore};
use biostart_core::traits::{RecordSource, UserSource};
use biostart_core::{Collection, Error, RawFields, RecordId};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_store(server: &MockServer) -> AirtableStore {
    let api_url = Url::parse(&server.uri()).unwrap();
    AirtableStore::new(AirtableConfig::new("test-key", "base123").with_api_url(api_url))
}

#[tokio::test]
async fn fetch_all_maps_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/base123/Quizzes"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                {"id": "recA", "fields": {"Title": "Quiz 1", "Perguntas": "[]"}},
                {"id": "recB", "fields": {"Title": "Quiz 2"}}
            ]
        })))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let records = store.fetch_all(&Collection::QUIZZES).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "recA");
    assert_eq!(records[0].string_field("Title"), Some("Quiz 1"));
    assert_eq!(records[1].string_field("Perguntas"), None);
}

#[tokio::test]
async fn create_wraps_fields_and_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v0/base123/Utilizadores"))
        .and(body_json(json!({
            "fields": {"Email": "a@b.pt", "Nome Completo": "Ana"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "recNew",
            "fields": {"Email": "a@b.pt", "Nome Completo": "Ana"}
        })))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let mut fields = RawFields::new();
    fields.insert("Email", "a@b.pt");
    fields.insert("Nome Completo", "Ana");

    let id = store.create(&Collection::USERS, fields).await.unwrap();
    assert_eq!(id.as_str(), "recNew");
}

#[tokio::test]
async fn update_patches_only_given_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v0/base123/Utilizadores/rec1"))
        .and(body_json(json!({
            "fields": {"checklistStateJSON": "{\"step1\":true}", "checklistProgress": 50.0}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "rec1"})))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let mut fields = RawFields::new();
    fields.insert("checklistStateJSON", "{\"step1\":true}");
    fields.insert("checklistProgress", 50.0);

    store
        .update(&Collection::USERS, &RecordId::new("rec1"), fields)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v0/base123/Utilizadores/recMissing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let mut fields = RawFields::new();
    fields.insert("checklistProgress", 10);

    let err = store
        .update(&Collection::USERS, &RecordId::new("recMissing"), fields)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn delete_missing_record_still_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v0/base123/Quizzes/recGone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    store
        .delete(&Collection::QUIZZES, &RecordId::new("recGone"))
        .await
        .unwrap();
}

#[tokio::test]
async fn find_first_sends_equality_formula() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/base123/Utilizadores"))
        .and(query_param(
            "filterByFormula",
            "AND({Email}='a@b.pt',{Senha (Hash)}='s3cret')",
        ))
        .and(query_param("maxRecords", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": "rec1", "fields": {"Email": "a@b.pt"}}]
        })))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let found = store
        .find_first(
            &Collection::USERS,
            &[("Email", "a@b.pt"), ("Senha (Hash)", "s3cret")],
        )
        .await
        .unwrap();
    assert_eq!(found.unwrap().id.as_str(), "rec1");
}

#[tokio::test]
async fn find_first_with_no_match_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/base123/Utilizadores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let found = store
        .find_first(&Collection::USERS, &[("Email", "missing@b.pt")])
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn fetch_missing_record_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/base123/Utilizadores/recMissing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let err = store
        .fetch(&Collection::USERS, &RecordId::new("recMissing"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn non_success_status_surfaces_as_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/base123/Quizzes"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"type": "SERVICE_UNAVAILABLE", "message": "try later"}
        })))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let err = store.fetch_all(&Collection::QUIZZES).await.unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("try later"));
}

#[tokio::test]
async fn non_json_error_body_is_handled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/base123/Quizzes"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let err = store.fetch_all(&Collection::QUIZZES).await.unwrap_err();
    assert!(err.to_string().contains("500"));
}
