use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::UserRole;
use crate::errors::AppError;
use crate::utils::string_utils::parse_object_id;

/// JWT 토큰에서 추출된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 사용자 역할
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    /// 역할 중 하나가 아니면 403
    pub fn require_any(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(
                "You do not have permission to access this resource".to_string(),
            ))
        }
    }

    /// 저장소 조회에 쓰는 ObjectId
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        parse_object_id(&self.user_id, "user id")
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication required".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_user_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            role: UserRole::Admin,
        });

        let user = AuthenticatedUser::extract(&req).await.unwrap();

        assert!(user.is_admin());
        assert!(user.object_id().is_ok());
    }

    #[test]
    fn test_require_any() {
        let user = AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            role: UserRole::Provider,
        };

        assert!(user.require_any(&[UserRole::Provider]).is_ok());
        assert!(matches!(
            user.require_any(&[UserRole::Seeker, UserRole::Admin]),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let result = AuthenticatedUser::extract(&req).await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
