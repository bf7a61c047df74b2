//! AuthMiddleware 인증 로직의 핵심적인 기능
//!
//! 토큰 검증 뒤 [`AccountGuard`]로 계정 상태를 다시 확인하므로,
//! 차단/정지된 사용자는 아직 만료되지 않은 액세스 토큰으로도 요청할 수 없습니다.
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::domain::models::token::TokenKind;
use crate::errors::AppError;
use crate::services::auth::{AccountGuard, TokenService};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let token_service = TokenService::instance();
            let auth_result = extract_user_from_request(&req, &token_service);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    return Ok(reject(req, err));
                },
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(user.role) {
                            log::warn!("권한 부족: 사용자 ID {} ({}), 필요 권한: {:?}",
                                user.user_id, user.role.as_str(), required);
                            let response = HttpResponse::Forbidden()
                                .json(serde_json::json!({
                                    "error": "You do not have permission to access this resource"
                                }));
                            let (req, _) = req.into_parts();
                            return Ok(ServiceResponse::new(req, response).map_into_right_body());
                        }
                    }

                    if let Err(err) = AccountGuard::instance().check(&user.user_id).await {
                        log::warn!("계정 상태 거부: 사용자 ID {} - {}", user.user_id, err);
                        return Ok(reject(req, err));
                    }

                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                },
                (AuthMode::Optional, Ok(user)) => {
                    let allowed = required_role
                        .as_ref()
                        .map_or(true, |required| required.is_satisfied(user.role));
                    if allowed {
                        match AccountGuard::instance().check(&user.user_id).await {
                            Ok(()) => {
                                log::debug!("선택적 인증 성공: 사용자 ID {}", user.user_id);
                                req.extensions_mut().insert(user);
                            },
                            Err(AppError::AuthenticationError(reason)) => {
                                log::debug!("선택적 인증: 계정 없음 ({}), 익명으로 진행", reason);
                            },
                            Err(err) => {
                                log::warn!("계정 상태 거부: 사용자 ID {} - {}", user.user_id, err);
                                return Ok(reject(req, err));
                            },
                        }
                    }
                },
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 에러를 상태 코드에 맞는 JSON 응답으로 바꿔 요청을 끝냅니다.
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청의 Bearer 액세스 토큰을 검증해 사용자 정보를 만듭니다.
fn extract_user_from_request(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization header is missing".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token, TokenKind::Access)?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        role: claims.role,
    })
}
