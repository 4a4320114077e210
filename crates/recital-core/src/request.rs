//! Typed inbound event envelope.
//!
//! The platform delivers loosely-typed nested mappings; they are parsed into
//! tagged structures here, at the boundary. Validation failures surface as
//! `RecitalError::MalformedRequest` instead of key-lookup failures inside
//! handler logic.

use crate::error::{RecitalError, Result};
use crate::session::SessionAttributes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete inbound event from the voice platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub session: SessionEnvelope,
    pub request: RequestBody,
}

impl SkillRequest {
    /// Parses a raw platform event.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRequest` when the payload does not match the
    /// expected envelope shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| RecitalError::malformed_request(e.to_string()))
    }

    /// Parses a raw platform event from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| RecitalError::malformed_request(e.to_string()))
    }
}

/// Transient per-invocation session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEnvelope {
    /// True on the first request of a conversation.
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    pub application: ApplicationRef,
    /// Attribute bag from the previous turn, absent on a fresh session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SessionAttributes>,
    pub user: UserRef,
}

/// Identifies which skill the platform believes it is calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRef {
    pub application_id: String,
}

/// Identifies the user across sessions; keys the durable step log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub user_id: String,
}

/// Request bodies, tagged by the platform's `type` field.
///
/// Any other request type fails deserialization and is reported as a
/// `MalformedRequest` by [`SkillRequest::from_value`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestBody {
    /// The user launched the skill without an intent.
    #[serde(rename_all = "camelCase")]
    LaunchRequest { request_id: String },
    /// The user's utterance was classified into an intent.
    #[serde(rename_all = "camelCase")]
    IntentRequest {
        request_id: String,
        intent: IntentPayload,
    },
    /// The platform ended the session. Not delivered when the skill itself
    /// sets `shouldEndSession`.
    #[serde(rename_all = "camelCase")]
    SessionEndedRequest {
        request_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

/// A classified utterance: a name plus optional named slot values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

/// A named parameter extracted from user speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl IntentPayload {
    /// Returns the slot's value when present and non-empty.
    ///
    /// The platform sometimes delivers a slot entry with an empty value;
    /// that counts as unresolved.
    pub fn slot_value(&self, slot_name: &str) -> Option<&str> {
        self.slots
            .get(slot_name)
            .and_then(|slot| slot.value.as_deref())
            .filter(|value| !value.is_empty())
    }
}
