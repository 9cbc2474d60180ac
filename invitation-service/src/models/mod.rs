use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Request DTOs
#[derive(Deserialize, Debug, Default)]
pub struct CreateInvitationRequest {
    #[serde(default, alias = "inviter_email")]
    pub inviter_identity: Option<String>,
}

// Response DTOs
#[derive(Serialize, Debug)]
pub struct CreateInvitationResponse {
    pub invitation_url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct ValidInvitationResponse {
    pub valid: bool,
    pub inviter_identity: String,
    pub expires_at: DateTime<Utc>,
}
