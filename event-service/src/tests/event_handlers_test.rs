use axum::{http::StatusCode, Router};
use log::{debug, error, info};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::routes::create_router_with_store;
use announce_shared::models::{now_str, EventRecord};
use announce_shared::notify::Notifier;
use announce_shared::store::dynamo::DynamoEventStore;
use announce_shared::store::EventStore;
use announce_shared::test_utils::dynamo_test_utils::{
    clear_dynamo_table, create_dynamo_client, create_event_table, put_event_without_date,
    use_dynamodb,
};
use announce_shared::test_utils::http_test_utils::{
    create_raw_request, create_test_request, response_to_json,
};
use announce_shared::test_utils::mock_event_store::MockEventStore;
use announce_shared::test_utils::recording_notifier::RecordingNotifier;
use announce_shared::test_utils::test_logging::init_test_logging;
use uuid::Uuid;

const TEST_TABLE_NAME: &str = "events-test-table";
const TEST_MAX_ITEMS: usize = 100;

enum TestStore {
    Mock(Arc<MockEventStore>),
    DynamoDB(Arc<DynamoEventStore>),
}

impl TestStore {
    fn handle(&self) -> Arc<dyn EventStore> {
        match self {
            TestStore::Mock(mock) => mock.clone() as Arc<dyn EventStore>,
            TestStore::DynamoDB(dynamo) => dynamo.clone() as Arc<dyn EventStore>,
        }
    }

    fn mock(&self) -> Option<&MockEventStore> {
        match self {
            TestStore::Mock(mock) => Some(mock),
            TestStore::DynamoDB(_) => None,
        }
    }
}

struct TestApp {
    app: Router,
    store: TestStore,
    notifier: Arc<RecordingNotifier>,
}

async fn create_test_app() -> TestApp {
    create_test_app_with(Arc::new(RecordingNotifier::new()), true, TEST_MAX_ITEMS).await
}

// Helper to set up test application with the appropriate store based on environment
async fn create_test_app_with(
    notifier: Arc<RecordingNotifier>,
    notifications_enabled: bool,
    max_items: usize,
) -> TestApp {
    init_test_logging();

    let app_notifier: Option<Arc<dyn Notifier>> = if notifications_enabled {
        Some(notifier.clone() as Arc<dyn Notifier>)
    } else {
        None
    };

    let store = if use_dynamodb() {
        info!("Using DynamoDB for event tests");
        let client = create_dynamo_client().await;

        match create_event_table(&client, TEST_TABLE_NAME).await {
            Ok(_) => info!("Test table created successfully"),
            Err(e) => {
                if !e.contains("ResourceInUseException") {
                    error!("Error creating table: {}", e);
                } else {
                    debug!("Table already exists, continuing");
                }
            }
        }

        if let Err(e) = clear_dynamo_table(&client, TEST_TABLE_NAME, "event_id").await {
            error!("Failed to clear table: {}", e);
        }

        TestStore::DynamoDB(Arc::new(DynamoEventStore::with_client_and_table(
            client,
            TEST_TABLE_NAME.to_string(),
        )))
    } else {
        debug!("Using mock store for event tests");
        TestStore::Mock(Arc::new(MockEventStore::new()))
    };

    let app = match &store {
        TestStore::Mock(mock) => create_router_with_store(mock.clone(), app_notifier, max_items, ""),
        TestStore::DynamoDB(dynamo) => {
            create_router_with_store(dynamo.clone(), app_notifier, max_items, "")
        }
    };

    TestApp {
        app,
        store,
        notifier,
    }
}

fn sample_event(title: &str, date: &str) -> EventRecord {
    EventRecord {
        event_id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        date: date.to_string(),
        description: format!("{} description", title),
        address: None,
        creator_name: None,
        created_at: now_str(),
    }
}

fn valid_payload() -> serde_json::Value {
    json!({
        "title": "Community Meetup",
        "date": "2025-06-14",
        "description": "Monthly get-together",
        "address": "12 Main Street",
        "creator_name": "Priya"
    })
}

#[tokio::test]
async fn test_create_event() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("POST", "/events", Some(valid_payload())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_to_json(response).await;
    assert_eq!(body["message"], "Event created successfully");

    let event_id = body["event_id"].as_str().unwrap();
    assert!(Uuid::parse_str(event_id).is_ok());

    let events = t.store.handle().list_events(TEST_MAX_ITEMS).await.unwrap();
    let stored = events.iter().find(|e| e.event_id == event_id).unwrap();
    assert_eq!(stored.title, "Community Meetup");
    assert_eq!(stored.date, "2025-06-14");
    assert_eq!(stored.address.as_deref(), Some("12 Main Street"));
    assert_eq!(stored.creator_name.as_deref(), Some("Priya"));
    assert!(chrono::DateTime::parse_from_rfc3339(&stored.created_at).is_ok());

    let published = t.notifier.published();
    assert_eq!(published.len(), 1);
    let (subject, message) = &published[0];
    assert_eq!(subject, "New Event: Community Meetup");
    assert!(message.contains("📅 Date: June 14, 2025"));
    assert!(message.contains(&format!("• Event ID: {}", event_id)));
    assert!(message.contains("Monthly get-together"));
}

#[tokio::test]
async fn test_create_event_missing_fields() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/events",
            Some(json!({ "title": "No date", "description": "Oops" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "Missing required fields");
    assert!(t.notifier.published().is_empty());

    if let Some(mock) = t.store.mock() {
        assert!(mock.events().is_empty());
    }
}

#[tokio::test]
async fn test_create_event_blank_title_rejected() {
    let t = create_test_app().await;

    let mut payload = valid_payload();
    payload["title"] = json!("   ");

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("POST", "/events", Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_event_without_body() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("POST", "/events", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "No body found in request");
}

#[tokio::test]
async fn test_create_event_malformed_body() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_raw_request("POST", "/events", "title=oops"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_create_event_with_notifications_disabled() {
    let t = create_test_app_with(Arc::new(RecordingNotifier::new()), false, TEST_MAX_ITEMS).await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("POST", "/events", Some(valid_payload())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(t.notifier.published().is_empty());
}

#[tokio::test]
async fn test_create_event_survives_publish_failure() {
    let t = create_test_app_with(Arc::new(RecordingNotifier::failing()), true, TEST_MAX_ITEMS).await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("POST", "/events", Some(valid_payload())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_to_json(response).await;
    let event_id = body["event_id"].as_str().unwrap();

    let events = t.store.handle().list_events(TEST_MAX_ITEMS).await.unwrap();
    assert!(events.iter().any(|e| e.event_id == event_id));
}

#[tokio::test]
async fn test_create_event_store_failure() {
    let t = create_test_app().await;
    let Some(mock) = t.store.mock() else {
        debug!("Skipping failure injection test against DynamoDB");
        return;
    };
    mock.fail_all();

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("POST", "/events", Some(valid_payload())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(t.notifier.published().is_empty());
}

#[tokio::test]
async fn test_list_events_sorted_by_date() {
    let t = create_test_app().await;
    let handle = t.store.handle();

    for (title, date) in [
        ("Summer Fair", "2025-07-20"),
        ("Spring Clean", "2025-03-02"),
        ("Winter Gala", "2025-12-11"),
    ] {
        handle.create_event(sample_event(title, date)).await.unwrap();
    }

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("GET", "/events", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Spring Clean", "Summer Fair", "Winter Gala"]);
}

#[tokio::test]
async fn test_list_events_with_undated_event_lists_it_first() {
    let t = create_test_app().await;
    let handle = t.store.handle();

    handle
        .create_event(sample_event("Harvest Supper", "2025-09-21"))
        .await
        .unwrap();

    let undated_id = Uuid::new_v4().to_string();
    match &t.store {
        TestStore::Mock(mock) => {
            let undated: EventRecord = serde_json::from_value(json!({
                "event_id": undated_id,
                "title": "Date TBC",
                "description": "No date yet",
                "created_at": "2025-01-01T00:00:00Z"
            }))
            .unwrap();
            mock.create_event(undated).await.unwrap();
        }
        TestStore::DynamoDB(_) => {
            let client = create_dynamo_client().await;
            put_event_without_date(&client, TEST_TABLE_NAME, &undated_id, "Date TBC")
                .await
                .unwrap();
        }
    }

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("GET", "/events", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event_id"], undated_id.as_str());
    assert_eq!(events[0]["date"], "");
    assert_eq!(events[1]["title"], "Harvest Supper");
}

#[tokio::test]
async fn test_list_events_capped_by_max_items() {
    let t = create_test_app_with(Arc::new(RecordingNotifier::new()), true, 2).await;
    let handle = t.store.handle();

    for i in 0..5 {
        handle
            .create_event(sample_event(&format!("Event {}", i), &format!("2025-01-0{}", i + 1)))
            .await
            .unwrap();
    }

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("GET", "/events", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_events_empty() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("GET", "/events", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_event() {
    let t = create_test_app().await;
    let handle = t.store.handle();

    let event = sample_event("Book Swap", "2025-04-05");
    let event_id = event.event_id.clone();
    handle.create_event(event).await.unwrap();

    let path = format!("/events/{}", event_id);
    let response = t
        .app
        .clone()
        .oneshot(create_test_request("DELETE", &path, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    assert_eq!(
        body["message"],
        format!("Event {} deleted successfully", event_id)
    );

    let remaining = handle.list_events(TEST_MAX_ITEMS).await.unwrap();
    assert!(remaining.iter().all(|e| e.event_id != event_id));
}

#[tokio::test]
async fn test_delete_unknown_event() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("DELETE", "/events/does-not-exist", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "Event does-not-exist not found");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let t = create_test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(create_test_request("GET", "/venues", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "The requested resource was not found");
}
