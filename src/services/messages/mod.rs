//! 대화방/메시지 서비스

pub mod message_service;

pub use message_service::MessageService;
