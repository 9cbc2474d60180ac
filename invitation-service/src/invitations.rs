//! Invitation lifecycle: issuing tokens and classifying them on validation.
//!
//! Validation is a read-only classification of the stored record. Marking a
//! token as used is left to [`InvitationStore::mark_used`], which no handler
//! calls yet.

use announce_shared::models::{Invitation, DEFAULT_INVITER};
use announce_shared::store::{InvitationStore, StoreError};
use chrono::{DateTime, Utc};
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

/// Page on the frontend that redeems an invitation.
pub const REGISTER_PATH: &str = "/register.html";

#[derive(Debug, Error)]
pub enum InvitationError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read invitation: {0}")]
    StoreRead(#[source] StoreError),

    #[error("failed to store invitation: {0}")]
    StoreWrite(#[source] StoreError),
}

/// Outcome of validating a token, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    NotFound,
    AlreadyUsed,
    Expired,
    Valid {
        inviter_identity: String,
        expires_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedInvitation {
    pub invitation_url: String,
    pub expires_at: DateTime<Utc>,
}

pub fn invitation_url(base_url: &str, token: &str) -> String {
    format!(
        "{}{}?token={}",
        base_url.trim_end_matches('/'),
        REGISTER_PATH,
        token
    )
}

/// Creates and persists a new invitation, returning its redeemable link.
///
/// Each call writes a distinct record. Nothing is written when `frontend_url`
/// is missing.
pub async fn issue_invitation<S>(
    store: &S,
    frontend_url: Option<&str>,
    inviter_identity: Option<String>,
    now: DateTime<Utc>,
) -> Result<IssuedInvitation, InvitationError>
where
    S: InvitationStore + ?Sized,
{
    let base_url = frontend_url
        .ok_or_else(|| InvitationError::Configuration("FRONTEND_URL is not set".into()))?;

    let token = Uuid::new_v4().to_string();
    let inviter_identity = inviter_identity.unwrap_or_else(|| DEFAULT_INVITER.to_string());
    let invitation = Invitation::new(token, inviter_identity, now);

    let stored = store
        .create_invitation(invitation)
        .await
        .map_err(InvitationError::StoreWrite)?;

    info!(
        "Issued invitation from {} expiring at {}",
        stored.inviter_identity, stored.expires_at
    );

    Ok(IssuedInvitation {
        invitation_url: invitation_url(base_url, &stored.token),
        expires_at: stored.expires_at,
    })
}

/// Classifies `token` against the stored record as of `now`.
///
/// A used invitation reports `AlreadyUsed` even when it has also expired.
pub async fn validate_invitation<S>(
    store: &S,
    token: &str,
    now: DateTime<Utc>,
) -> Result<ValidationOutcome, InvitationError>
where
    S: InvitationStore + ?Sized,
{
    let invitation = match store
        .get_invitation(token)
        .await
        .map_err(InvitationError::StoreRead)?
    {
        Some(invitation) => invitation,
        None => {
            debug!("No invitation found for presented token");
            return Ok(ValidationOutcome::NotFound);
        }
    };

    if invitation.used {
        return Ok(ValidationOutcome::AlreadyUsed);
    }

    if invitation.is_expired_at(now) {
        debug!("Invitation expired at {}", invitation.expires_at);
        return Ok(ValidationOutcome::Expired);
    }

    Ok(ValidationOutcome::Valid {
        inviter_identity: invitation.inviter_identity,
        expires_at: invitation.expires_at,
    })
}
