//! # 인증 서비스 구현
//!
//! 이메일/비밀번호 기반의 가입, 로그인, 토큰 갱신, 로그아웃을 처리합니다.
//!
//! 로그인과 토큰 갱신 시점마다 계정의 차단/정지 상태를 다시 확인하므로,
//! 관리자가 계정을 막으면 다음 갱신부터 새 토큰이 발급되지 않습니다.
//! 이미 발급된 액세스 토큰은 [`AccountGuard`](super::AccountGuard)가 요청마다 막습니다.
//! 정지 기한이 지난 계정은 로그인 시 자동으로 정지가 해제됩니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use validator::Validate;
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::users::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use crate::domain::entities::common::GeoPoint;
use crate::domain::entities::users::{AccessDecision, User, UserRole};
use crate::domain::models::token::TokenKind;
use crate::errors::AppError;
use crate::repositories::{tokens::TokenRepository, users::UserRepository};
use crate::services::auth::TokenService;
use crate::services::users::UserService;
use crate::utils::string_utils::{clean_optional_string, parse_object_id};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    token_repo: Arc<TokenRepository>,
    token_service: Arc<TokenService>,
}

/// 가입 요청으로 저장할 사용자 문서를 만듭니다. 비밀번호는 이미 해시된 값이어야 합니다.
pub fn build_user(request: RegisterRequest, password_hash: String) -> Result<User, AppError> {
    let role = UserRole::from_str(&request.role)?;
    if role == UserRole::Admin {
        return Err(AppError::ValidationError("Admin accounts cannot be registered".to_string()));
    }

    let mut user = User::new(
        request.email.trim().to_lowercase(),
        password_hash,
        role,
        request.name.trim().to_string(),
    );
    user.phone = clean_optional_string(request.phone);
    user.address = clean_optional_string(request.address);
    user.location = request.location.map(GeoPoint::try_from).transpose()?;
    if role == UserRole::Provider {
        user.specialties = request.specialties.unwrap_or_default();
    }

    Ok(user)
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            user_repo: ServiceLocator::get::<UserRepository>(),
            token_repo: ServiceLocator::get::<TokenRepository>(),
            token_service: ServiceLocator::get::<TokenService>(),
        }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 토큰 쌍을 발급하고 리프레시 토큰을 저장합니다.
    async fn issue_tokens(&self, user: User) -> Result<AuthResponse, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let pair = self.token_service.generate_token_pair(&user_id, user.role)?;
        self.token_repo
            .store_refresh_token(&user_id, &pair.refresh_token, self.token_service.refresh_ttl_seconds())
            .await?;

        Ok(AuthResponse::new(user, pair.access_token, pair.refresh_token, pair.expires_in))
    }

    /// 차단/정지 여부를 확인하고, 만료된 정지는 해제한 사용자를 돌려줍니다.
    async fn ensure_access(&self, user: User) -> Result<User, AppError> {
        match user.access_decision(DateTime::now()) {
            AccessDecision::Allowed => Ok(user),
            AccessDecision::Denied(reason) => Err(AppError::AuthorizationError(reason)),
            AccessDecision::SuspensionExpired => {
                let id = user
                    .id
                    .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
                log::info!("정지 기간 만료로 정지 해제 - user_id: {}", id);
                self.user_repo
                    .update_and_unset(&id, doc! { "is_suspended": false }, &["suspension_reason", "suspended_until"])
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
            }
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ValidationError("Email is already registered".to_string()));
        }

        let password_hash = UserService::hash_password(&request.password)?;
        let user = self.user_repo.create(build_user(request, password_hash)?).await?;

        log::info!("회원가입 완료 - email: {}, role: {}", user.email, user.role.as_str());
        self.issue_tokens(user).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if !UserService::verify_password(&request.password, &user.password_hash)? {
            log::warn!("로그인 실패 - email: {}", request.email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let user = self.ensure_access(user).await?;
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let user = self
            .user_repo
            .update_fields(&id, doc! { "last_login_at": DateTime::now() })
            .await?
            .unwrap_or(user);

        log::info!("로그인 성공 - user_id: {}", id);
        self.issue_tokens(user).await
    }

    pub async fn me(&self, user_id: &ObjectId) -> Result<UserResponse, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 저장된 리프레시 토큰과 일치할 때만 새 토큰 쌍을 발급합니다(토큰 회전).
    pub async fn refresh(&self, request: RefreshTokenRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let claims = self.token_service.verify_token(&request.refresh_token, TokenKind::Refresh)?;

        if !self.token_repo.verify_refresh_token(&claims.sub, &request.refresh_token).await? {
            return Err(AppError::AuthenticationError("Refresh token is invalid or revoked".to_string()));
        }

        let id = parse_object_id(&claims.sub, "token subject")
            .map_err(|_| AppError::AuthenticationError("Invalid token subject".to_string()))?;
        let user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("User no longer exists".to_string()))?;

        let user = self.ensure_access(user).await?;
        self.issue_tokens(user).await
    }

    pub async fn logout(&self, user_id: &str) -> Result<(), AppError> {
        self.token_repo.delete_refresh_token(user_id).await?;
        log::info!("로그아웃 - user_id: {}", user_id);
        Ok(())
    }
}

impl Service for AuthService {
    fn name(&self) -> &str {
        "AuthService"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::common::Coordinates;

    fn request(role: &str) -> RegisterRequest {
        RegisterRequest {
            name: " Lee ".to_string(),
            email: "Lee@Example.COM".to_string(),
            password: "secret1".to_string(),
            role: role.to_string(),
            phone: None,
            specialties: Some(vec!["cleaning".to_string()]),
            location: Some(Coordinates { lat: 37.5, lng: 127.0 }),
            address: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_build_user_normalizes_fields() {
        let user = build_user(request("provider"), "hash".to_string()).unwrap();

        assert_eq!(user.email, "lee@example.com");
        assert_eq!(user.name, "Lee");
        assert_eq!(user.role, UserRole::Provider);
        assert_eq!(user.specialties, vec!["cleaning".to_string()]);
        assert!(user.address.is_none());
        assert_eq!(user.location.unwrap().lat(), 37.5);
    }

    #[test]
    fn test_seeker_does_not_keep_specialties() {
        let user = build_user(request("seeker"), "hash".to_string()).unwrap();

        assert!(user.specialties.is_empty());
    }

    #[test]
    fn test_admin_cannot_register() {
        assert!(matches!(
            build_user(request("admin"), "hash".to_string()),
            Err(AppError::ValidationError(_))
        ));
    }
}
