use log::{info, warn};
use std::env;

const DEFAULT_TABLE_NAME: &str = "invitations-table";

/// Settings read once at cold start.
#[derive(Debug, Clone)]
pub struct InvitationSettings {
    /// `INVITATIONS_TABLE`
    pub table_name: String,
    /// `FRONTEND_URL`, without a trailing slash. Issuance fails while this is unset.
    pub frontend_url: Option<String>,
    /// `DYNAMODB_ENDPOINT`
    pub dynamodb_endpoint: Option<String>,
    /// `/Prod` unless `REMOVE_BASE_PATH=true`
    pub route_prefix: String,
}

impl InvitationSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let table_name =
            non_empty("INVITATIONS_TABLE").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        let frontend_url =
            non_empty("FRONTEND_URL").map(|url| url.trim_end_matches('/').to_string());
        if frontend_url.is_none() {
            warn!("FRONTEND_URL is not set; invitation issuance will fail until it is configured");
        }

        let remove_base_path = lookup("REMOVE_BASE_PATH")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);
        let route_prefix = if remove_base_path { "" } else { "/Prod" }.to_string();

        let settings = Self {
            table_name,
            frontend_url,
            dynamodb_endpoint: non_empty("DYNAMODB_ENDPOINT"),
            route_prefix,
        };
        info!("Loaded invitation settings: {:?}", settings);
        settings
    }
}
