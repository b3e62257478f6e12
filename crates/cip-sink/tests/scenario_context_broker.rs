use cip_schemas::{DomainEntity, EntityCommon, SportsVenue};
use cip_sink::{ContextBrokerClient, EntitySink, NgsiEntity, SinkError};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

const ID: &str = "urn:ngsi-ld:SportsVenue:se:sundsvall:facilities:1425";

fn venue() -> NgsiEntity {
    NgsiEntity::from(&DomainEntity::SportsVenue(SportsVenue {
        common: EntityCommon::new(ID, "Sporthallen"),
        public_access: None,
    }))
}

#[tokio::test]
async fn merge_patches_entity_with_ld_json() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path(format!("/ngsi-ld/v1/entities/{ID}"))
                .header("content-type", "application/ld+json")
                .json_body_partial(r#"{"name":{"type":"Property","value":"Sporthallen"}}"#);
            then.status(204);
        })
        .await;

    let client = ContextBrokerClient::new(server.base_url()).unwrap();
    let e = venue();
    client.merge_entity(&e.id, &e.attributes).await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn merge_404_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(format!("/ngsi-ld/v1/entities/{ID}"));
            then.status(404);
        })
        .await;

    let client = ContextBrokerClient::new(server.base_url()).unwrap();
    let e = venue();
    let err = client.merge_entity(&e.id, &e.attributes).await.unwrap_err();
    assert_eq!(err, SinkError::NotFound);
}

#[tokio::test]
async fn merge_server_error_is_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(format!("/ngsi-ld/v1/entities/{ID}"));
            then.status(500).body("boom");
        })
        .await;

    let client = ContextBrokerClient::new(server.base_url()).unwrap();
    let e = venue();
    let err = client.merge_entity(&e.id, &e.attributes).await.unwrap_err();
    assert_eq!(
        err,
        SinkError::Status {
            code: 500,
            body: "boom".to_string()
        }
    );
}

#[tokio::test]
async fn create_posts_full_document_and_accepts_conflict() {
    let server = MockServer::start_async().await;
    let created = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/ngsi-ld/v1/entities")
                .json_body_partial(
                    json!({"id": ID, "type": "SportsVenue"}).to_string(),
                );
            then.status(409);
        })
        .await;

    let client = ContextBrokerClient::new(server.base_url()).unwrap();
    client.create_entity(&venue()).await.unwrap();
    created.assert_async().await;
}

#[tokio::test]
async fn create_rejected_is_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ngsi-ld/v1/entities");
            then.status(400);
        })
        .await;

    let client = ContextBrokerClient::new(server.base_url()).unwrap();
    let err = client.create_entity(&venue()).await.unwrap_err();
    assert!(matches!(err, SinkError::Status { code: 400, .. }));
}

#[tokio::test]
async fn delete_hits_entity_url() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("/ngsi-ld/v1/entities/{ID}"));
            then.status(204);
        })
        .await;

    let client = ContextBrokerClient::new(server.base_url()).unwrap();
    client.delete_entity(ID).await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn unreachable_broker_is_transport_error() {
    let client = ContextBrokerClient::new("http://127.0.0.1:1").unwrap();
    let err = client.delete_entity(ID).await.unwrap_err();
    assert!(matches!(err, SinkError::Transport(_)));
}
