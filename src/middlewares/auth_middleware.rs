//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 추출합니다.
//! 역할 조건이 걸린 스코프에서는 역할이 맞지 않으면 403으로 끊습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 있으면 검증하고, 없어도 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: UserRole) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }

    pub fn required_with_roles(roles: Vec<UserRole>) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(roles))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::users::User;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::account_guard::testing::{active_account, register_test_account_guard};
    use crate::services::auth::{token_service::register_test_token_service, TokenService};
    use super::*;

    fn token_service() -> Arc<TokenService> {
        register_test_token_service()
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        token_service();
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/me").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_wrong_role_is_forbidden() {
        let tokens = token_service();
        let token = tokens.generate_access_token("65f1c0ffee0000000000abcd", UserRole::Seeker).unwrap();
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::required_with_role(UserRole::Admin))
                    .route("/stats", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin/stats")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let tokens = token_service();
        let accounts = register_test_account_guard();
        active_account(&accounts, "65f1c0ffee0000000000abcd", UserRole::Provider);
        let token = tokens.generate_access_token("65f1c0ffee0000000000abcd", UserRole::Provider).unwrap();
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required_with_roles(vec![UserRole::Provider, UserRole::Admin]))
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "65f1c0ffee0000000000abcd");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted_as_access_token() {
        let tokens = token_service();
        let token = tokens.generate_refresh_token("65f1c0ffee0000000000abcd", UserRole::Seeker).unwrap();
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_banned_user_with_live_token_is_forbidden() {
        let tokens = token_service();
        let accounts = register_test_account_guard();
        let id = ObjectId::new();
        let mut user = User::new("banned@example.com".to_string(), "hash".to_string(), UserRole::Seeker, "Banned".to_string());
        user.id = Some(id);
        user.is_banned = true;
        user.ban_reason = Some("spam".to_string());
        accounts.insert(user);
        let token = tokens.generate_access_token(&id.to_hex(), UserRole::Seeker).unwrap();

        for middleware in [AuthMiddleware::required(), AuthMiddleware::optional()] {
            let app = test::init_service(
                App::new().service(
                    web::scope("/api")
                        .wrap(middleware)
                        .route("/me", web::get().to(whoami)),
                ),
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/api/me")
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_request();
            let res = test::call_service(&app, req).await;

            assert_eq!(res.status(), StatusCode::FORBIDDEN);
            let body: serde_json::Value = test::read_body_json(res).await;
            assert!(body["error"].as_str().unwrap().contains("banned"));
        }
    }

    #[actix_web::test]
    async fn test_deleted_user_with_live_token_is_unauthorized() {
        let tokens = token_service();
        register_test_account_guard();
        let token = tokens.generate_access_token(&ObjectId::new().to_hex(), UserRole::Seeker).unwrap();
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
