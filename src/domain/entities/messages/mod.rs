//! 대화방과 메시지 엔티티

pub mod conversation;
pub mod message;

pub use conversation::{pair_key, participant_pair, preview, Conversation, PREVIEW_MAX_CHARS};
pub use message::Message;
