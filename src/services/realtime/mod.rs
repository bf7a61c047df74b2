//! 실시간 팬아웃

pub mod event_hub;

pub use event_hub::EventHub;
