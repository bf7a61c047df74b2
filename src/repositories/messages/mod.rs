//! 대화방/메시지 리포지토리

pub mod conversation_repo;
pub mod message_repo;

pub use conversation_repo::ConversationRepository;
pub use message_repo::MessageRepository;
