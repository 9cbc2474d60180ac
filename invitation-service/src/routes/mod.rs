use announce_shared::http::{cors_layer, logging_middleware, not_found_fallback, with_prefix};
use announce_shared::store::{dynamo::DynamoInvitationStore, InvitationStore};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;

use crate::config::InvitationSettings;
use crate::handlers::{
    invitation_handlers::{create_invitation, validate_invitation_token},
    AppState,
};

/// Creates a router backed by the DynamoDB token store
pub async fn create_router(settings: InvitationSettings) -> Router {
    info!("Creating router with DynamoDB store");

    let store = Arc::new(
        DynamoInvitationStore::new(
            settings.table_name.clone(),
            settings.dynamodb_endpoint.as_deref(),
        )
        .await,
    );

    create_router_with_store(store, settings.frontend_url, &settings.route_prefix)
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S>(
    store: Arc<S>,
    frontend_url: Option<String>,
    prefix: &str,
) -> Router
where
    S: InvitationStore + 'static,
{
    info!("Setting up invitation routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = cors_layer();
    info!("CORS configured for all origins, methods and headers");

    // Handlers share the store through router state
    let state = AppState {
        store,
        frontend_url: frontend_url.map(Arc::from),
    };

    let api_routes = Router::new()
        .route("/invitations", post(create_invitation::<S>))
        .route("/invitations/:token", get(validate_invitation_token::<S>))
        .with_state(state);

    // Mount under the stage prefix and answer unmatched paths with JSON
    with_prefix(api_routes, prefix)
        .fallback(not_found_fallback)
        .layer(cors)
        // Logging middleware to trace all requests
        .layer(middleware::from_fn(logging_middleware))
}
