use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Invitations stay redeemable for this many days after issuance.
pub const INVITATION_VALIDITY_DAYS: i64 = 5;

/// Inviter recorded when the caller does not supply one.
pub const DEFAULT_INVITER: &str = "unknown";

/// Invitation record as stored in the invitations table, keyed by `token`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Invitation {
    pub token: String,
    pub inviter_identity: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub used: bool,
}

impl Invitation {
    /// Builds a fresh, unused invitation whose expiry is fixed at
    /// `created_at + INVITATION_VALIDITY_DAYS`.
    pub fn new(token: String, inviter_identity: String, created_at: DateTime<Utc>) -> Self {
        Self {
            token,
            inviter_identity,
            created_at,
            expires_at: created_at + Duration::days(INVITATION_VALIDITY_DAYS),
            used: false,
        }
    }

    /// True once `now` is strictly past `expires_at`. The expiry instant itself is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
