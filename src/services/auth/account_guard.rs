//! 요청마다 계정의 차단/정지 상태를 확인하는 가드
//!
//! 액세스 토큰은 발급 이후의 제재를 알지 못하므로, 인증 미들웨어와 WebSocket 중계는
//! 토큰 검증 뒤에 이 가드로 현재 계정 상태를 다시 확인합니다.
//! 조회는 Redis 캐시를 거치는 [`UserRepository::find_by_id`]를 사용하고,
//! 제재 시 리포지토리가 캐시를 무효화합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::entities::users::{AccessDecision, User};
use crate::errors::AppError;
use crate::repositories::users::UserRepository;

/// 가드가 계정을 읽고 만료된 정지를 해제할 때 쓰는 저장소 경계
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    async fn lift_suspension(&self, id: &ObjectId) -> Result<(), AppError>;
}

#[async_trait]
impl AccountStore for UserRepository {
    async fn find_account(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        self.find_by_id(id).await
    }

    async fn lift_suspension(&self, id: &ObjectId) -> Result<(), AppError> {
        self.update_and_unset(id, doc! { "is_suspended": false }, &["suspension_reason", "suspended_until"])
            .await?;
        Ok(())
    }
}

pub struct AccountGuard {
    store: Arc<dyn AccountStore>,
}

impl AccountGuard {
    pub fn new() -> Self {
        Self::with_store(ServiceLocator::get::<UserRepository>())
    }

    pub fn with_store(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 토큰 주체가 지금도 활동 가능한 계정인지 확인합니다.
    ///
    /// 계정이 없으면 401, 차단/정지 중이면 403입니다.
    pub async fn check(&self, user_id: &str) -> Result<(), AppError> {
        let id = ObjectId::parse_str(user_id)
            .map_err(|_| AppError::AuthenticationError("Invalid token subject".to_string()))?;

        let account = self
            .store
            .find_account(&id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Account no longer exists".to_string()))?;

        match account.access_decision(DateTime::now()) {
            AccessDecision::Allowed => Ok(()),
            AccessDecision::Denied(reason) => Err(AppError::AuthorizationError(reason)),
            AccessDecision::SuspensionExpired => {
                log::info!("정지 기간 만료로 정지 해제 - user_id: {}", id);
                self.store.lift_suspension(&id).await
            }
        }
    }
}

impl Service for AccountGuard {
    fn name(&self) -> &str {
        "AccountGuard"
    }
}

/// 테스트 전체가 공유하는 메모리 계정 저장소
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};
    use once_cell::sync::Lazy;
    use super::*;
    use crate::domain::entities::users::UserRole;

    #[derive(Default)]
    pub(crate) struct InMemoryAccounts {
        users: RwLock<HashMap<ObjectId, User>>,
    }

    impl InMemoryAccounts {
        pub(crate) fn insert(&self, user: User) {
            if let Some(id) = user.id {
                self.users.write().unwrap().insert(id, user);
            }
        }

        pub(crate) fn get(&self, id: &ObjectId) -> Option<User> {
            self.users.read().unwrap().get(id).cloned()
        }
    }

    #[async_trait]
    impl AccountStore for InMemoryAccounts {
        async fn find_account(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
            Ok(self.get(id))
        }

        async fn lift_suspension(&self, id: &ObjectId) -> Result<(), AppError> {
            if let Some(user) = self.users.write().unwrap().get_mut(id) {
                user.is_suspended = false;
                user.suspension_reason = None;
                user.suspended_until = None;
            }
            Ok(())
        }
    }

    static ACCOUNTS: Lazy<Arc<InMemoryAccounts>> = Lazy::new(|| Arc::new(InMemoryAccounts::default()));

    /// 메모리 저장소를 쓰는 가드를 레지스트리에 등록합니다. 항상 같은 저장소가 등록됩니다.
    pub(crate) fn register_test_account_guard() -> Arc<InMemoryAccounts> {
        let accounts = ACCOUNTS.clone();
        ServiceLocator::set(Arc::new(AccountGuard::with_store(accounts.clone())));
        accounts
    }

    /// 활동 가능한 계정을 저장소에 넣고 16진수 ID를 돌려줍니다.
    pub(crate) fn active_account(accounts: &InMemoryAccounts, id: &str, role: UserRole) -> String {
        let mut user = User::new(format!("{}@example.com", id), "hash".to_string(), role, "Tester".to_string());
        user.id = ObjectId::parse_str(id).ok();
        accounts.insert(user);
        id.to_string()
    }
}
