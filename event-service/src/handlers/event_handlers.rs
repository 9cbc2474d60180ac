use announce_shared::error::{AppError, Result};
use announce_shared::models::{now_str, EventRecord, MessageResponse};
use announce_shared::notify::{event_subject, format_event_announcement};
use announce_shared::store::{EventStore, StoreError};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::{error, info, warn};
use uuid::Uuid;

use super::AppState;
use crate::models::{CreateEventRequest, CreateEventResponse};

// POST /events
pub async fn create_event<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateEventResponse>)>
where
    S: EventStore + 'static,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request("No body found in request".into()));
    }

    let request: CreateEventRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejecting malformed event request body: {}", e);
        AppError::bad_request("Invalid request body".into())
    })?;

    let fields = request
        .validate()
        .ok_or_else(|| AppError::bad_request("Missing required fields".into()))?;

    let event = EventRecord {
        event_id: Uuid::new_v4().to_string(),
        title: fields.title,
        date: fields.date,
        description: fields.description,
        address: fields.address,
        creator_name: fields.creator_name,
        created_at: now_str(),
    };

    let stored = state.store.create_event(event).await?;

    // The event is already stored, so a failed publish is only logged.
    match &state.notifier {
        Some(notifier) => {
            let subject = event_subject(&stored);
            let message = format_event_announcement(&stored);
            if let Err(e) = notifier.publish(&subject, &message).await {
                error!(
                    "Failed to publish announcement for event_id={}: {}",
                    stored.event_id, e
                );
            }
        }
        None => info!(
            "Notifications disabled, not announcing event_id={}",
            stored.event_id
        ),
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            message: "Event created successfully".to_string(),
            event_id: stored.event_id,
        }),
    ))
}

// GET /events
pub async fn list_events<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<EventRecord>>>
where
    S: EventStore + 'static,
{
    let mut events = state.store.list_events(state.max_items).await?;
    events.sort_by(|a, b| a.date.cmp(&b.date));

    info!("Retrieved {} events", events.len());
    Ok(Json(events))
}

// DELETE /events/:event_id
pub async fn delete_event<S>(
    State(state): State<AppState<S>>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>>
where
    S: EventStore + 'static,
{
    match state.store.delete_event(&event_id).await {
        Ok(()) => {
            info!("Deleted event_id={}", event_id);
            Ok(Json(MessageResponse::new(format!(
                "Event {} deleted successfully",
                event_id
            ))))
        }
        Err(StoreError::NotFound) => Err(AppError::not_found(format!(
            "Event {} not found",
            event_id
        ))),
        Err(e) => Err(e.into()),
    }
}
