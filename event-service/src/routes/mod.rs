use announce_shared::http::{cors_layer, logging_middleware, not_found_fallback, with_prefix};
use announce_shared::notify::{Notifier, SnsNotifier};
use announce_shared::store::{dynamo::DynamoEventStore, EventStore};
use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use log::info;
use std::sync::Arc;

use crate::config::EventSettings;
use crate::handlers::{
    event_handlers::{create_event, delete_event, list_events},
    AppState,
};

/// Creates a router backed by DynamoDB and, when a topic is configured, SNS
pub async fn create_router(settings: EventSettings) -> Router {
    info!("Creating router with DynamoDB store");

    let store = Arc::new(
        DynamoEventStore::new(
            settings.table_name.clone(),
            settings.dynamodb_endpoint.as_deref(),
        )
        .await,
    );

    let notifier: Option<Arc<dyn Notifier>> = match settings.sns_topic_arn.clone() {
        Some(topic_arn) => {
            info!("Publishing event announcements to {}", topic_arn);
            Some(Arc::new(SnsNotifier::new(topic_arn).await) as Arc<dyn Notifier>)
        }
        None => None,
    };

    create_router_with_store(store, notifier, settings.max_items, &settings.route_prefix)
}

/// Creates a router with a given store and notifier
pub fn create_router_with_store<S>(
    store: Arc<S>,
    notifier: Option<Arc<dyn Notifier>>,
    max_items: usize,
    prefix: &str,
) -> Router
where
    S: EventStore + 'static,
{
    info!("Setting up event routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = cors_layer();
    info!("CORS configured for all origins, methods and headers");

    // Handlers share the store, notifier and list cap through router state
    let state = AppState {
        store,
        notifier,
        max_items,
    };

    let api_routes = Router::new()
        .route("/events", get(list_events::<S>).post(create_event::<S>))
        .route("/events/:event_id", delete(delete_event::<S>))
        .with_state(state);

    // Mount under the stage prefix and answer unmatched paths with JSON
    with_prefix(api_routes, prefix)
        .fallback(not_found_fallback)
        .layer(cors)
        // Logging middleware to trace all requests
        .layer(middleware::from_fn(logging_middleware))
}
