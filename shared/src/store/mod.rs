use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EventRecord, Invitation};

pub mod dynamo;

/// Errors shared by every store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("item already exists")]
    AlreadyExists,
    #[error("conditional update rejected")]
    Conflict,
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Token store backing the invitation lifecycle.
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Point lookup. A missing token is `Ok(None)`, not an error.
    async fn get_invitation(&self, token: &str) -> Result<Option<Invitation>, StoreError>;

    /// Insert-only write; an existing token yields `StoreError::AlreadyExists`.
    async fn create_invitation(&self, invitation: Invitation) -> Result<Invitation, StoreError>;

    /// Atomically flips `used` from `false` to `true`.
    ///
    /// Returns `StoreError::NotFound` for an unknown token and
    /// `StoreError::Conflict` when the invitation was already used, so that
    /// at most one concurrent caller can redeem a token.
    async fn mark_used(&self, token: &str) -> Result<(), StoreError>;
}

/// Store for announced events.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, event: EventRecord) -> Result<EventRecord, StoreError>;

    /// Returns at most `limit` events in table order.
    async fn list_events(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError>;

    /// Deletes an event. `StoreError::NotFound` when nothing was stored under `event_id`.
    async fn delete_event(&self, event_id: &str) -> Result<(), StoreError>;
}
