//! 라우트 구성
//!
//! 기능별 스코프와 인증 수준을 한 곳에서 정의합니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/api/auth`, `/api/users`, `/api/jobs`, `/api/reviews` | 선택 (핸들러가 필요 시 요구) |
//! | `/api/messages`, `/api/tickets` | 필수 |
//! | `/api/admin` | admin 역할 |
//! | `/ws`, `/health` | - |
//!
//! 같은 접두사의 스코프는 하나만 매칭되므로, 공개/보호 엔드포인트가 섞인 스코프는
//! 선택적 인증으로 감싸고 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 추출자가 401을 돌려주게 합니다.

use actix_web::{error::InternalError, web, HttpRequest, HttpResponse};
use serde_json::json;
use crate::domain::entities::users::UserRole;
use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// ```rust,ignore
/// use actix_web::App;
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config());

    cfg.service(health_check);
    cfg.service(handlers::realtime::ws_entry);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_job_routes(cfg);
    configure_message_routes(cfg);
    configure_review_routes(cfg);
    configure_ticket_routes(cfg);
    configure_admin_routes(cfg);
}

fn bad_request(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(json!({ "error": message }));
    InternalError::from_response(AppError::ValidationError(message), response).into()
}

/// 본문 역직렬화 실패(필수 필드 누락 포함)를 400 JSON으로 변환합니다.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| bad_request(err.to_string()))
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| bad_request(err.to_string()))
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| bad_request(err.to_string()))
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .wrap(AuthMiddleware::optional())
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_tokens)
            .service(handlers::auth::get_current_user)
            .service(handlers::auth::logout)
    );
}

/// 고정 경로를 `/{user_id}`보다 먼저 등록합니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(AuthMiddleware::optional())
            .service(handlers::users::search_providers)
            .service(handlers::users::update_profile)
            .service(handlers::users::update_settings)
            .service(handlers::users::change_password)
            .service(handlers::users::delete_account)
            .service(handlers::users::get_public_profile)
    );
}

fn configure_job_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/jobs")
            .wrap(AuthMiddleware::optional())
            .service(handlers::jobs::list_jobs)
            .service(handlers::jobs::create_job)
            .service(handlers::jobs::my_jobs)
            .service(handlers::jobs::create_direct_hire)
            .service(handlers::jobs::get_job)
            .service(handlers::jobs::update_job)
            .service(handlers::jobs::delete_job)
            .service(handlers::jobs::apply_to_job)
            .service(handlers::jobs::select_provider)
            .service(handlers::jobs::accept_hire_request)
            .service(handlers::jobs::decline_hire_request)
            .service(handlers::jobs::reject_application)
            .service(handlers::jobs::complete_job)
            .service(handlers::jobs::cancel_job)
            .service(handlers::jobs::report_job)
    );
}

fn configure_message_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/messages")
            .wrap(AuthMiddleware::required())
            .service(handlers::messages::list_conversations)
            .service(handlers::messages::start_conversation)
            .service(handlers::messages::get_conversation)
            .service(handlers::messages::mark_conversation_read)
            .service(handlers::messages::unread_count)
            .service(handlers::messages::send_message)
    );
}

fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reviews")
            .wrap(AuthMiddleware::optional())
            .service(handlers::reviews::create_review)
            .service(handlers::reviews::user_reviews)
            .service(handlers::reviews::update_review)
            .service(handlers::reviews::delete_review)
    );
}

fn configure_ticket_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tickets")
            .wrap(AuthMiddleware::required())
            .service(handlers::tickets::create_ticket)
            .service(handlers::tickets::my_tickets)
            .service(handlers::tickets::get_ticket)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(AuthMiddleware::required_with_role(UserRole::Admin))
            .service(handlers::admin::stats)
            .service(handlers::admin::list_users)
            .service(handlers::admin::ban_user)
            .service(handlers::admin::unban_user)
            .service(handlers::admin::suspend_user)
            .service(handlers::admin::unsuspend_user)
            .service(handlers::admin::delete_user)
            .service(handlers::admin::reported_jobs)
            .service(handlers::admin::dismiss_reports)
            .service(handlers::admin::delete_job)
            .service(handlers::admin::list_tickets)
            .service(handlers::admin::respond_ticket)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "marketplace_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use crate::services::auth::account_guard::testing::{active_account, register_test_account_guard};
    use crate::services::auth::token_service::register_test_token_service;

    fn token_for(role: UserRole) -> String {
        let tokens = register_test_token_service();
        let accounts = register_test_account_guard();
        let id = active_account(&accounts, "65f1c0ffee0000000000abcd", role);
        tokens.generate_access_token(&id, role).unwrap()
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_job_without_budget_is_bad_request() {
        let token = token_for(UserRole::Seeker);
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/jobs")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "title": "Fix door",
                "description": "Hinge is loose",
                "category": "carpentry"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("budget"));
    }

    #[actix_web::test]
    async fn test_admin_scope_requires_token() {
        register_test_token_service();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/admin/stats").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_provider_cannot_post_job() {
        let token = token_for(UserRole::Provider);
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/jobs")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "title": "Fix door",
                "description": "Hinge is loose",
                "category": "carpentry",
                "budget": 40.0
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
