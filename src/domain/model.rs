use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier printed on a pass. Issued once per accepted registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassId(String);

impl PassId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PassId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PassId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub name: String,
    pub email: String,
    pub pass_id: PassId,
}

impl RegistrationRecord {
    pub fn issue(request: RegistrationRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            pass_id: PassId::generate(),
        }
    }
}

/// What the registration store keeps for each pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRegistration {
    pub record: RegistrationRecord,
    pub registered_at: DateTime<Utc>,
}

impl StoredRegistration {
    pub fn new(record: RegistrationRecord) -> Self {
        Self {
            record,
            registered_at: Utc::now(),
        }
    }
}
