use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub mod events;
pub mod invitations;

pub use events::EventRecord;
pub use invitations::{Invitation, DEFAULT_INVITER, INVITATION_VALIDITY_DAYS};

/// Current UTC time as an RFC 3339 string with second precision.
pub fn now_str() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Generic `{ "message": ... }` response body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
