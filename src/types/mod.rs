// Public modules
pub mod assistant_reply;
pub mod direction;
pub mod donor_profile;
pub mod message_ingest;
pub mod message_kind;
pub mod transcript;
pub mod turn;
pub mod user_input;

// Re-exports
pub use assistant_reply::{AssistantReply, Classification, FALLBACK_RESPONSE, FIXED_CONFIDENCE};
pub use direction::Direction;
pub use donor_profile::DonorProfile;
pub use message_ingest::{INTEGRATION_TAG, MessageIngest};
pub use message_kind::MessageKind;
pub use transcript::Transcript;
pub use turn::{Role, Turn};
pub use user_input::UserInput;
