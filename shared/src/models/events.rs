use serde::{Deserialize, Serialize};

/// Announced event as stored in the events table, keyed by `event_id`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event_id: String,
    pub title: String,
    /// Empty when the stored item has no date; such events list first.
    #[serde(default)]
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    pub created_at: String,
}
