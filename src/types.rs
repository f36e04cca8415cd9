//! API types matching the Lockbox vault server

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Body `status` value the server uses for success.
pub const STATUS_OK: u16 = 200;

/// Credential pair submitted to `/login` and `/setup`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response envelope shared by most endpoints.
///
/// The server replies HTTP 200 even when it rejects a request, so transport
/// status is meaningless here. Only the body's `status` field is
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    /// Absent means failure, so the default of 0 gives the right branch.
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    /// Splits the envelope into success or a rejection. A rejection carries
    /// the server message, or `fallback` when the message is missing or
    /// empty.
    pub fn into_result(self, fallback: &str) -> Result<StatusResponse, ApiError> {
        if self.status == STATUS_OK {
            Ok(self)
        } else {
            Err(self.into_rejection(fallback))
        }
    }

    /// Turns the envelope into a rejection regardless of its status code.
    /// Used for endpoints where a successful reply is never an envelope.
    pub fn into_rejection(self, fallback: &str) -> ApiError {
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Rejected(message)
    }
}

/// New vault entry payload for `/create/vault/entry`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSecret {
    pub key: String,
    pub value: String,
}

/// MongoDB extended-JSON object id: `{"$oid": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectId {
    #[serde(rename = "$oid")]
    pub oid: String,
}

/// MongoDB extended-JSON datetime: `{"$date": {"$numberLong": "<millis>"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BsonDateTime {
    #[serde(rename = "$date")]
    pub date: NumberLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NumberLong {
    #[serde(rename = "$numberLong")]
    pub millis: String,
}

impl BsonDateTime {
    /// Milliseconds since the epoch as a UTC timestamp, when parseable.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let millis: i64 = self.date.millis.parse().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// Vault entry metadata as listed by the API. The secret value itself is
/// only returned by the single-entry endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VaultEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub key: String,
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: BsonDateTime,
}

impl VaultEntry {
    /// Creation time the way the console displays it.
    pub fn created_at_display(&self) -> String {
        match self.created_at.to_utc() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "N/A".to_string(),
        }
    }
}
