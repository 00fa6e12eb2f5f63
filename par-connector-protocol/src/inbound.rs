//! Payloads received from the host process.
//!
//! The host posts serialized JSON objects. The only field the connector relies
//! on is `sender`, which names the handler the payload belongs to; everything
//! else is passed through untouched.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ProtocolError;

/// A parsed host payload.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMessage {
    sender: String,
    fields: Map<String, Value>,
}

impl HostMessage {
    /// Build a message from an already-decoded JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, ProtocolError> {
        let sender = fields
            .get("sender")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingSender)?
            .to_string();
        Ok(Self { sender, fields })
    }

    /// The handler tag this payload is addressed to.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// The `type` field, if present.
    pub fn message_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// The `tabID` field, if present.
    pub fn tab_id(&self) -> Option<&str> {
        self.fields.get("tabID").and_then(Value::as_str)
    }

    /// Look up an arbitrary field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, `sender` included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the message, returning the full JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Serialize for HostMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Parse raw text received from the host.
///
/// # Errors
/// - [`ProtocolError::Empty`] for blank input
/// - [`ProtocolError::Malformed`] when the text is not a JSON object
/// - [`ProtocolError::MissingSender`] when `sender` is absent or not a string
pub fn parse_host_message(raw: &str) -> Result<HostMessage, ProtocolError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Empty);
    }
    let fields: Map<String, Value> = serde_json::from_str(trimmed)?;
    HostMessage::from_fields(fields)
}
