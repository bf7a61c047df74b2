use serde::Serialize;
use crate::domain::dto::common::{format_datetime, format_optional_datetime, hex_id};
use crate::domain::entities::tickets::{Ticket, TicketCategory, TicketPriority, TicketStatus};

#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub admin_response: Option<String>,
    pub resolved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: hex_id(&ticket.id),
            user_id: ticket.user.to_hex(),
            resolved_at: format_optional_datetime(&ticket.resolved_at),
            created_at: format_datetime(&ticket.created_at),
            updated_at: format_datetime(&ticket.updated_at),
            subject: ticket.subject,
            message: ticket.message,
            category: ticket.category,
            priority: ticket.priority,
            status: ticket.status,
            admin_response: ticket.admin_response,
        }
    }
}
