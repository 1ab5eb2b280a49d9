//! Wire messages exchanged with the host shell.
//!
//! Outbound requests are JSON strings of the form
//! `{"name":"userinfo","data":null}`. Inbound replies carry the same `name`
//! and an arbitrary `data` object that must at least hold a string `id`.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Message name used for identity requests and replies.
pub const USERINFO_MESSAGE: &str = "userinfo";

/// Request sent to the host asking for the current user's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRequestMessage {
    /// Message name.
    pub name: String,
    /// Always null for identity requests.
    pub data: Option<Value>,
}

impl IdentityRequestMessage {
    /// Create a request with a custom message name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
        }
    }

    /// The standard `userinfo` request.
    pub fn userinfo() -> Self {
        Self::new(USERINFO_MESSAGE)
    }

    /// Serialize to the JSON string posted to the host.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for IdentityRequestMessage {
    fn default() -> Self {
        Self::userinfo()
    }
}

/// User identity returned by the host.
///
/// Only `id` is required. Every other field the host sends is kept as-is so
/// the identity serializes back to the `data` object the host sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Host-assigned user identifier.
    pub id: String,
    /// Remaining fields, unvalidated.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserIdentity {
    /// Create an identity with no extra fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }

    /// Add an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extra field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Why an inbound message could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MalformedReason {
    /// Payload is not valid JSON.
    InvalidJson(String),
    /// Payload is not an object with a string `name`.
    MissingName,
    /// Identity reply with null or absent `data`.
    MissingData,
    /// Identity reply whose `data` is not an object.
    InvalidData,
    /// Identity reply whose `data` has no non-empty string `id`.
    MissingIdentityId,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::InvalidJson(e) => write!(f, "invalid json: {}", e),
            MalformedReason::MissingName => write!(f, "missing message name"),
            MalformedReason::MissingData => write!(f, "identity reply without data"),
            MalformedReason::InvalidData => write!(f, "identity reply data is not an object"),
            MalformedReason::MissingIdentityId => write!(f, "identity reply without id"),
        }
    }
}

/// A classified inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum HostReply {
    /// A well-formed identity reply.
    Recognized(UserIdentity),
    /// A message with some other name.
    Unrecognized(String),
    /// A message that could not be interpreted.
    Malformed(MalformedReason),
}

impl HostReply {
    /// Classify a raw inbound message against the `userinfo` name.
    pub fn parse(raw: &str) -> Self {
        Self::parse_for(raw, USERINFO_MESSAGE)
    }

    /// Classify a raw inbound message against `expected` as the identity
    /// reply name.
    pub fn parse_for(raw: &str, expected: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => return HostReply::Malformed(MalformedReason::InvalidJson(e.to_string())),
        };

        let Some(name) = value.get("name").and_then(Value::as_str) else {
            return HostReply::Malformed(MalformedReason::MissingName);
        };

        if name != expected {
            return HostReply::Unrecognized(name.to_string());
        }

        let data = match value.get("data") {
            None | Some(Value::Null) => {
                return HostReply::Malformed(MalformedReason::MissingData)
            }
            Some(data) if !data.is_object() => {
                return HostReply::Malformed(MalformedReason::InvalidData)
            }
            Some(data) => data,
        };

        match UserIdentity::deserialize(data) {
            Ok(identity) if !identity.id.is_empty() => HostReply::Recognized(identity),
            _ => HostReply::Malformed(MalformedReason::MissingIdentityId),
        }
    }

    /// Whether this is an identity reply.
    pub fn is_recognized(&self) -> bool {
        matches!(self, HostReply::Recognized(_))
    }
}
