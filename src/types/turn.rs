use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{AssistantReply, FIXED_CONFIDENCE, UserInput};

/// Placeholder body for a user turn that carries an image.
const IMAGE_PLACEHOLDER: &str = "[Image]";

/// Author of a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person chatting.
    User,

    /// The assistant service (including locally authored recovery notices).
    Assistant,
}

/// One message in a transcript, immutable once appended.
///
/// Classification fields are populated only on assistant turns, and only when
/// the reply carried a non-empty reason string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    /// Who authored the turn.
    pub role: Role,

    /// Display text of the turn.
    pub text: String,

    /// When the turn was appended, RFC 3339.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,

    /// Whether the turn carries an image reference.
    pub is_image: bool,

    /// The image URL, when `is_image` holds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Primary classification of the assistant's reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    /// Secondary classification of the assistant's reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_classification: Option<String>,

    /// Reported confidence in the classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

impl Turn {
    /// Builds the user turn for a classified submission.
    ///
    /// Image references are displayed as a fixed placeholder with the URL
    /// attached alongside.
    pub fn user(input: &UserInput, timestamp: OffsetDateTime) -> Self {
        match input {
            UserInput::Text(text) => Self {
                role: Role::User,
                text: text.clone(),
                timestamp,
                is_image: false,
                image_url: None,
                classification: None,
                sub_classification: None,
                confidence: None,
            },
            UserInput::ImageRef(url) => Self {
                role: Role::User,
                text: IMAGE_PLACEHOLDER.to_string(),
                timestamp,
                is_image: true,
                image_url: Some(url.clone()),
                classification: None,
                sub_classification: None,
                confidence: None,
            },
        }
    }

    /// Builds the assistant turn for a successful reply.
    pub fn assistant(reply: &AssistantReply, timestamp: OffsetDateTime) -> Self {
        let classification = reply.classification();
        Self {
            role: Role::Assistant,
            text: reply.response_text().to_string(),
            timestamp,
            is_image: false,
            image_url: None,
            classification: classification.as_ref().map(|c| c.primary.clone()),
            sub_classification: classification.as_ref().map(|c| c.secondary.clone()),
            confidence: classification.as_ref().map(|_| FIXED_CONFIDENCE.to_string()),
        }
    }

    /// Builds an assistant-authored notice turn (error recovery).
    ///
    /// Notices carry no classification annotation.
    pub fn notice(text: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp,
            is_image: false,
            image_url: None,
            classification: None,
            sub_classification: None,
            confidence: None,
        }
    }

    /// Returns true if this turn carries a classification annotation.
    pub fn has_classification(&self) -> bool {
        self.classification.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};
    use time::macros::datetime;

    const TS: OffsetDateTime = datetime!(2024-01-15 10:30:00 UTC);

    #[test]
    fn user_text_turn() {
        let turn = Turn::user(&UserInput::classify("Namaste"), TS);
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "Namaste");
        assert!(!turn.is_image);
        assert_eq!(turn.image_url, None);
        assert!(!turn.has_classification());
    }

    #[test]
    fn user_image_turn() {
        let turn = Turn::user(&UserInput::classify("https://example.com/a.png"), TS);
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "[Image]");
        assert!(turn.is_image);
        assert_eq!(turn.image_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn assistant_turn_with_classification() {
        let reply: AssistantReply = serde_json::from_value(json!({
            "ai_response": "Thank you for your donation!",
            "ai_reason": "Donation|OneTime"
        }))
        .unwrap();
        let turn = Turn::assistant(&reply, TS);
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.text, "Thank you for your donation!");
        assert_eq!(turn.classification.as_deref(), Some("Donation"));
        assert_eq!(turn.sub_classification.as_deref(), Some("OneTime"));
        assert_eq!(turn.confidence.as_deref(), Some(FIXED_CONFIDENCE));
    }

    #[test]
    fn assistant_turn_without_reason_has_no_annotation() {
        let reply: AssistantReply =
            serde_json::from_value(json!({"ai_response": "Hello!"})).unwrap();
        let turn = Turn::assistant(&reply, TS);
        assert!(!turn.has_classification());
        assert_eq!(turn.sub_classification, None);
        assert_eq!(turn.confidence, None);
    }

    #[test]
    fn notice_turn() {
        let turn = Turn::notice("Request timed out. Please try again.", TS);
        assert_eq!(turn.role, Role::Assistant);
        assert!(!turn.has_classification());
        assert!(!turn.is_image);
    }

    #[test]
    fn turn_serialization_omits_empty_annotations() {
        let turn = Turn::user(&UserInput::classify("hi"), TS);
        let json = to_value(&turn).unwrap();
        assert_eq!(
            json,
            json!({
                "role": "user",
                "text": "hi",
                "timestamp": "2024-01-15T10:30:00Z",
                "is_image": false
            })
        );
    }

    #[test]
    fn turn_round_trip() {
        let reply: AssistantReply = serde_json::from_value(json!({
            "ai_response": "Done.",
            "ai_reason": "Receipt|Email"
        }))
        .unwrap();
        let turn = Turn::assistant(&reply, TS);
        let json = to_value(&turn).unwrap();
        let back: Turn = serde_json::from_value(json).unwrap();
        assert_eq!(back, turn);
    }
}
