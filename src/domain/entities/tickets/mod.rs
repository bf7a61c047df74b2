pub mod ticket;

pub use ticket::{Ticket, TicketCategory, TicketPriority, TicketStatus};
