//! Persisted current-identity record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The identity whose partition is active, as stored under the
/// `current_user` key. Written wholesale on login, removed on logout.
///
/// The identity is a bare email-like string used purely as a storage
/// partition key; nothing is verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIdentity {
    pub identity: String,
    pub login_at: DateTime<Utc>,
}

impl CurrentIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        CurrentIdentity {
            identity: identity.into(),
            login_at: Utc::now(),
        }
    }
}
