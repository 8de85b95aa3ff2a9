use crate::types::MessageKind;

/// A user submission, classified as plain text or an image reference.
///
/// Classification is a prefix test only: any string beginning with `http://`
/// or `https://` is treated as an image reference, without further URL
/// validation. The prefixes are matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A plain text message.
    Text(String),

    /// An image referenced by URL.
    ImageRef(String),
}

impl UserInput {
    /// Classifies a raw submission.
    ///
    /// Callers are expected to reject empty submissions before classifying;
    /// `ChatSession::send` enforces that upstream.
    pub fn classify(raw: &str) -> UserInput {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            UserInput::ImageRef(raw.to_string())
        } else {
            UserInput::Text(raw.to_string())
        }
    }

    /// The wire message kind for this input.
    pub fn kind(&self) -> MessageKind {
        match self {
            UserInput::Text(_) => MessageKind::Text,
            UserInput::ImageRef(_) => MessageKind::Image,
        }
    }

    /// The message body sent on the wire; empty for image references.
    pub fn message_text(&self) -> &str {
        match self {
            UserInput::Text(text) => text,
            UserInput::ImageRef(_) => "",
        }
    }

    /// The image URL, if this input is an image reference.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            UserInput::Text(_) => None,
            UserInput::ImageRef(url) => Some(url),
        }
    }
}
