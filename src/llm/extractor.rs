//! Turn one natural-language command into a structured intent proposal
//!
//! The language service's reply is untrusted input. It is decoded into a
//! dynamic JSON value and rebuilt field by field into the closed
//! ContactAction set; anything unrecognized degrades to Unknown with zero
//! confidence instead of an error, so a flaky or misbehaving service can
//! never unwind past this module.

use crate::llm::client::LlmClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operations the phone book understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactAction {
    /// Store a new contact
    Add,
    /// Look up a phone number by name
    Get,
    /// Reverse lookup: name by phone number
    GetByPhone,
    /// Show every stored contact
    List,
    /// Change an existing contact's number
    Update,
    /// Remove a contact
    Delete,
    /// Could not determine what was asked
    Unknown,
}

impl ContactAction {
    /// Map a wire-format action string to the closed set
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "add" => Self::Add,
            "get" => Self::Get,
            "get_by_phone" => Self::GetByPhone,
            "list" => Self::List,
            "update" => Self::Update,
            "delete" => Self::Delete,
            _ => Self::Unknown,
        }
    }

    /// Whether this action needs a contact name to execute
    pub fn requires_name(self) -> bool {
        matches!(self, Self::Add | Self::Get | Self::Update | Self::Delete)
    }

    /// Whether this action needs a phone number to execute
    pub fn requires_phone(self) -> bool {
        matches!(self, Self::Add | Self::Update | Self::GetByPhone)
    }
}

/// Structured result of interpreting one command
///
/// Built once per command and only read afterwards; nothing holds one
/// across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentProposal {
    /// The requested operation
    pub action: ContactAction,
    /// Contact name, where the command mentioned one
    pub name: Option<String>,
    /// Phone number, where the command mentioned one
    pub phone: Option<String>,
    /// Extractor's confidence in the interpretation (0.0 - 1.0)
    pub confidence: f32,
}

impl Default for IntentProposal {
    fn default() -> Self {
        Self {
            action: ContactAction::Unknown,
            name: None,
            phone: None,
            confidence: 0.0,
        }
    }
}

impl IntentProposal {
    /// Rebuild a proposal from an untrusted JSON value
    ///
    /// Unrecognized actions become Unknown, blank or non-string name/phone
    /// become None, and a missing or non-numeric confidence becomes 0.
    pub fn from_json(value: &Value) -> Self {
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .map(ContactAction::from_wire)
            .unwrap_or(ContactAction::Unknown);

        let confidence = value
            .get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0) as f32;

        Self {
            action,
            name: text_field(value, "name"),
            phone: text_field(value, "phone"),
            confidence,
        }
    }

    /// An executable proposal names a known action and carries every field
    /// that action requires
    pub fn is_executable(&self) -> bool {
        if self.action == ContactAction::Unknown {
            return false;
        }
        (!self.action.requires_name() || self.name.is_some())
            && (!self.action.requires_phone() || self.phone.is_some())
    }
}

/// Read an optional text field, treating null, non-strings, and blank
/// strings as absent
fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Extraction seam: the interpreter only needs something that turns text
/// into a proposal
pub trait ExtractIntent {
    /// Interpret one command
    ///
    /// Implementations must not fail; an uninterpretable command or an
    /// unreachable service yields an Unknown proposal instead.
    fn extract(&self, command: &str) -> impl std::future::Future<Output = IntentProposal> + Send;
}

/// Production extractor backed by the LLM client
pub struct LlmExtractor {
    client: LlmClient,
}

impl LlmExtractor {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

impl ExtractIntent for LlmExtractor {
    async fn extract(&self, command: &str) -> IntentProposal {
        let reply = match self.client.complete(EXTRACT_SYSTEM_PROMPT, command).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("intent extraction failed: {}", e);
                return IntentProposal::default();
            }
        };

        let Some(json) = extract_json(&reply) else {
            tracing::warn!("no JSON object in extractor reply");
            return IntentProposal::default();
        };

        match serde_json::from_str::<Value>(json) {
            Ok(value) => IntentProposal::from_json(&value),
            Err(e) => {
                tracing::warn!("malformed extractor reply: {}", e);
                IntentProposal::default()
            }
        }
    }
}

/// Extract the JSON object from an LLM reply (models sometimes wrap the
/// object in prose)
fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start <= end).then(|| &reply[start..=end])
}

/// System prompt for command extraction
const EXTRACT_SYSTEM_PROMPT: &str = r#"You are a phone book assistant that helps users manage their contacts.
Interpret the user's command and extract the necessary information.

AVAILABLE ACTIONS:
- add: store a new contact (needs name and phone)
- get: look up a phone number by name
- get_by_phone: look up a name by phone number
- list: show the full phone book
- update: change an existing contact's phone number (needs name and phone)
- delete: remove a contact by name
- unknown: the command fits none of the above

OUTPUT FORMAT (a single JSON object, no explanation):
{
  "action": "add" | "get" | "get_by_phone" | "list" | "update" | "delete" | "unknown",
  "name": "extracted name" or null,
  "phone": "extracted phone number" or null,
  "confidence": 0.0-1.0
}

Examples:
"Add John with number 123456789" -> {"action": "add", "name": "John", "phone": "123456789", "confidence": 0.95}
"What is the phone number for Joanna?" -> {"action": "get", "name": "Joanna", "phone": null, "confidence": 0.9}
"Who's number is 222333444?" -> {"action": "get_by_phone", "name": null, "phone": "222333444", "confidence": 0.9}
"Show me full phone book" -> {"action": "list", "name": null, "phone": null, "confidence": 0.95}
"I need to change Maria's phone to 555123456" -> {"action": "update", "name": "Maria", "phone": "555123456", "confidence": 0.9}
"Remove Alex from my contacts" -> {"action": "delete", "name": "Alex", "phone": null, "confidence": 0.9}
"make me a sandwich" -> {"action": "unknown", "name": null, "phone": null, "confidence": 0.2}
"#;
