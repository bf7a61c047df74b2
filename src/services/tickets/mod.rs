//! 문의(티켓) 서비스

pub mod ticket_service;

pub use ticket_service::TicketService;
