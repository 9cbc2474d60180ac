use serde::{Deserialize, Serialize};

// Request DTOs
#[derive(Deserialize, Debug)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub creator_name: Option<String>,
}

/// Required fields of a create request, once checked
#[derive(Debug)]
pub struct ValidatedEvent {
    pub title: String,
    pub date: String,
    pub description: String,
    pub address: Option<String>,
    pub creator_name: Option<String>,
}

impl CreateEventRequest {
    /// `title`, `date` and `description` must be present and non-blank.
    pub fn validate(self) -> Option<ValidatedEvent> {
        fn required(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Some(ValidatedEvent {
            title: required(self.title)?,
            date: required(self.date)?,
            description: required(self.description)?,
            address: self.address,
            creator_name: self.creator_name,
        })
    }
}

// Response DTOs
#[derive(Serialize, Debug)]
pub struct CreateEventResponse {
    pub message: String,
    pub event_id: String,
}
