//! 문의(티켓) 서비스 구현
//!
//! 사용자는 문의를 등록하고 자신의 문의만 볼 수 있습니다.
//! 관리자는 전체 목록을 보고 답변과 상태를 갱신합니다.

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use validator::Validate;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::common::{PageQuery, PageResponse};
use crate::domain::dto::tickets::{CreateTicketRequest, RespondTicketRequest, TicketListQuery, TicketResponse};
use crate::domain::entities::tickets::{Ticket, TicketStatus};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::repositories::tickets::TicketRepository;
use crate::utils::string_utils::{clean_optional_string, parse_object_id};

pub struct TicketService {
    ticket_repo: Arc<TicketRepository>,
}

impl TicketService {
    pub fn new() -> Self {
        Self {
            ticket_repo: ServiceLocator::get::<TicketRepository>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    async fn load(&self, ticket_id: &str) -> Result<Ticket, AppError> {
        let id = parse_object_id(ticket_id, "ticket id")?;
        self.ticket_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }

    pub async fn create(&self, user: &ObjectId, request: CreateTicketRequest) -> Result<TicketResponse, AppError> {
        request.validate()?;

        let ticket = Ticket::new(
            *user,
            request.subject.trim().to_string(),
            request.message.trim().to_string(),
            request.category.unwrap_or_default(),
            request.priority.unwrap_or_default(),
        );
        let ticket = self.ticket_repo.insert(ticket).await?;

        log::info!("문의 등록 - user_id: {}, subject: {}", user, ticket.subject);
        Ok(TicketResponse::from(ticket))
    }

    pub async fn mine(&self, user: &ObjectId) -> Result<Vec<TicketResponse>, AppError> {
        let tickets = self.ticket_repo.find_by_user(user).await?;
        Ok(tickets.into_iter().map(TicketResponse::from).collect())
    }

    pub async fn get(&self, user: &AuthenticatedUser, ticket_id: &str) -> Result<TicketResponse, AppError> {
        let ticket = self.load(ticket_id).await?;
        if !ticket.can_view(&user.object_id()?, user.is_admin()) {
            return Err(AppError::AuthorizationError("You cannot view this ticket".to_string()));
        }

        Ok(TicketResponse::from(ticket))
    }

    pub async fn list(&self, query: TicketListQuery) -> Result<PageResponse<TicketResponse>, AppError> {
        let status = query.status.as_deref().map(TicketStatus::from_str).transpose()?;
        let page = PageQuery::new(query.page, query.limit);

        let (tickets, total) = self.ticket_repo.list(status, &page).await?;
        let items = tickets.into_iter().map(TicketResponse::from).collect();

        Ok(PageResponse::new(items, total, &page))
    }

    /// 관리자 답변. 답변과 상태 중 하나는 있어야 합니다.
    pub async fn respond(&self, ticket_id: &str, request: RespondTicketRequest) -> Result<TicketResponse, AppError> {
        request.validate()?;

        let response = clean_optional_string(request.admin_response);
        if response.is_none() && request.status.is_none() {
            return Err(AppError::ValidationError("Provide a response or a status".to_string()));
        }

        let mut ticket = self.load(ticket_id).await?;
        ticket.respond(response, request.status, DateTime::now());
        self.ticket_repo.save(&ticket).await?;

        log::info!("문의 답변 - ticket_id: {}, status: {}", ticket_id, ticket.status.as_str());
        Ok(TicketResponse::from(ticket))
    }
}

impl Service for TicketService {
    fn name(&self) -> &str {
        "TicketService"
    }
}
