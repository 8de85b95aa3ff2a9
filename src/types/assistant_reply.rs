use serde::{Deserialize, Serialize};

/// Shown when the service replies without an `ai_response` field.
pub const FALLBACK_RESPONSE: &str = "Sorry, I couldn't process your request.";

/// Confidence attached to every classification.
///
/// The upstream does not compute a confidence; it reports a fixed HIGH
/// alongside any classification it returns.
pub const FIXED_CONFIDENCE: &str = "HIGH";

/// The reply body returned by the assistant service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantReply {
    /// The assistant's answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,

    /// Pipe-delimited classification of the exchange, e.g. `Donation|OneTime`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reason: Option<String>,
}

impl AssistantReply {
    /// The response text, or the fixed fallback when the field is absent.
    pub fn response_text(&self) -> &str {
        self.ai_response.as_deref().unwrap_or(FALLBACK_RESPONSE)
    }

    /// The classification derived from `ai_reason`.
    ///
    /// Returns `None` when the reason is absent or empty; classification
    /// annotations are attached to a turn only in the `Some` case.
    pub fn classification(&self) -> Option<Classification> {
        match self.ai_reason.as_deref() {
            Some(reason) if !reason.is_empty() => Some(Classification::parse(reason)),
            _ => None,
        }
    }
}

/// Two-level category label describing the intent of a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Primary category, before the first `|`.
    pub primary: String,

    /// Secondary category, between the first and second `|`.
    pub secondary: String,
}

impl Classification {
    /// Parses a pipe-delimited reason string.
    ///
    /// Only the first two segments are meaningful; either defaults to the
    /// empty string when missing.
    pub fn parse(reason: &str) -> Self {
        let mut parts = reason.split('|');
        Self {
            primary: parts.next().unwrap_or("").to_string(),
            secondary: parts.next().unwrap_or("").to_string(),
        }
    }
}
