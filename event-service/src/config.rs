use log::{info, warn};
use std::env;
use thiserror::Error;

const DEFAULT_TABLE_NAME: &str = "events-table";
const DEFAULT_MAX_ITEMS: usize = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("MAX_ITEMS must be a positive integer, got '{0}'")]
    InvalidMaxItems(String),
}

/// Settings read once at cold start.
#[derive(Debug, Clone)]
pub struct EventSettings {
    pub table_name: String,
    /// Upper bound on events returned by a listing, also used as the scan page size.
    pub max_items: usize,
    /// Notifications are disabled when unset.
    pub sns_topic_arn: Option<String>,
    pub dynamodb_endpoint: Option<String>,
    pub route_prefix: String,
}

impl EventSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_items = match non_empty("MAX_ITEMS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxItems(raw)),
            },
            None => DEFAULT_MAX_ITEMS,
        };

        let sns_topic_arn = non_empty("SNS_TOPIC_ARN");
        if sns_topic_arn.is_none() {
            warn!("SNS_TOPIC_ARN is not set; event notifications are disabled");
        }

        let remove_base_path = lookup("REMOVE_BASE_PATH")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let settings = Self {
            table_name: non_empty("TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            max_items,
            sns_topic_arn,
            dynamodb_endpoint: non_empty("DYNAMODB_ENDPOINT"),
            route_prefix: if remove_base_path { "" } else { "/Prod" }.to_string(),
        };
        info!("Loaded event settings: {:?}", settings);
        Ok(settings)
    }
}
