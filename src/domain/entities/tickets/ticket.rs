//! Support Ticket Entity Implementation
//!
//! 사용자가 관리자에게 보내는 문의입니다. 관리자의 답변과 상태 변경으로
//! `open → in-progress → resolved → closed` 흐름을 따릅니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    #[default]
    General,
    Account,
    Payment,
    Technical,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn from_str(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "in-progress" | "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(AppError::ValidationError(format!("Unknown ticket status: {}", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: ObjectId,
    pub subject: String,
    pub message: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Ticket {
    pub fn new(
        user: ObjectId,
        subject: String,
        message: String,
        category: TicketCategory,
        priority: TicketPriority,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user,
            subject,
            message,
            category,
            priority,
            status: TicketStatus::Open,
            admin_response: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_view(&self, user_id: &ObjectId, is_admin: bool) -> bool {
        is_admin || &self.user == user_id
    }

    /// 관리자 답변을 기록합니다.
    ///
    /// 상태 없이 답변만 오면 `open` 티켓은 `in-progress`로 넘어갑니다.
    /// `resolved` 또는 `closed`로 처음 바뀌는 순간 `resolved_at`이 기록됩니다.
    pub fn respond(&mut self, response: Option<String>, status: Option<TicketStatus>, now: DateTime) {
        let has_response = response.is_some();
        if has_response {
            self.admin_response = response;
        }

        let next = match status {
            Some(status) => status,
            None if has_response && self.status == TicketStatus::Open => TicketStatus::InProgress,
            None => self.status,
        };

        if next.is_final() && self.resolved_at.is_none() {
            self.resolved_at = Some(now);
        }
        self.status = next;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket::new(
            ObjectId::new(),
            "Payment missing".to_string(),
            "I was not paid for job 42".to_string(),
            TicketCategory::Payment,
            TicketPriority::High,
        )
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TicketCategory::default(), TicketCategory::General);
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
        assert_eq!(ticket().status, TicketStatus::Open);
    }

    #[test]
    fn test_response_moves_open_ticket_to_in_progress() {
        let mut ticket = ticket();

        ticket.respond(Some("Looking into it".to_string()), None, DateTime::now());

        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert!(ticket.resolved_at.is_none());
    }

    #[test]
    fn test_resolving_sets_timestamp() {
        let mut ticket = ticket();

        ticket.respond(None, Some(TicketStatus::Resolved), DateTime::now());

        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert!(ticket.resolved_at.is_some());
        assert!(ticket.status.is_final());
    }

    #[test]
    fn test_visibility() {
        let ticket = ticket();

        assert!(ticket.can_view(&ticket.user, false));
        assert!(ticket.can_view(&ObjectId::new(), true));
        assert!(!ticket.can_view(&ObjectId::new(), false));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TicketStatus::from_str("in-progress").unwrap(), TicketStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert!(TicketStatus::from_str("pending").is_err());
    }
}
