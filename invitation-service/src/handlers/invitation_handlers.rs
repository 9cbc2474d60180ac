use announce_shared::error::{AppError, Result};
use announce_shared::store::InvitationStore;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use log::{info, warn};

use super::AppState;
use crate::invitations::{issue_invitation, validate_invitation, InvitationError, ValidationOutcome};
use crate::models::{CreateInvitationRequest, CreateInvitationResponse, ValidInvitationResponse};

impl From<InvitationError> for AppError {
    fn from(err: InvitationError) -> Self {
        AppError::internal_server_error(err.to_string())
    }
}

/// The body is optional; an empty body or JSON `null` means "no inviter given".
fn parse_create_request(body: &[u8]) -> Result<CreateInvitationRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateInvitationRequest::default());
    }

    let request: Option<CreateInvitationRequest> = serde_json::from_slice(body).map_err(|e| {
        warn!("Rejecting malformed invitation request body: {}", e);
        AppError::bad_request("Invalid request body".into())
    })?;

    Ok(request.unwrap_or_default())
}

// POST /invitations
pub async fn create_invitation<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Json<CreateInvitationResponse>>
where
    S: InvitationStore + 'static,
{
    let request = parse_create_request(&body)?;

    let issued = issue_invitation(
        state.store.as_ref(),
        state.frontend_url.as_deref(),
        request.inviter_identity,
        Utc::now(),
    )
    .await?;

    Ok(Json(CreateInvitationResponse {
        invitation_url: issued.invitation_url,
        expires_at: issued.expires_at,
    }))
}

// GET /invitations/:token
pub async fn validate_invitation_token<S>(
    State(state): State<AppState<S>>,
    Path(token): Path<String>,
) -> Result<Json<ValidInvitationResponse>>
where
    S: InvitationStore + 'static,
{
    match validate_invitation(state.store.as_ref(), &token, Utc::now()).await? {
        ValidationOutcome::Valid {
            inviter_identity,
            expires_at,
        } => {
            info!("Invitation from {} is valid", inviter_identity);
            Ok(Json(ValidInvitationResponse {
                valid: true,
                inviter_identity,
                expires_at,
            }))
        }
        ValidationOutcome::NotFound => Err(AppError::not_found("Invalid invitation token".into())),
        ValidationOutcome::AlreadyUsed => {
            Err(AppError::bad_request("Invitation already used".into()))
        }
        ValidationOutcome::Expired => Err(AppError::bad_request("Invitation expired".into())),
    }
}
