//! 문의(티켓) DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
