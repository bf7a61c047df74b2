//! # Service Registry
//!
//! 타입 기반 싱글톤 레지스트리입니다. 각 컴포넌트는 `TypeId`를 키로
//! 정확히 하나의 `Arc<T>` 인스턴스로 등록되며, 어디서든
//! `ServiceLocator::get::<T>()` (또는 각 컴포넌트의 `instance()`)로 꺼내 씁니다.
//!
//! ## 초기화 순서
//!
//! ```text
//! main.rs                 ServiceLocator::set(Database), set(RedisClient)
//!   └─ initialize_all()   1. 리포지토리 생성 + 인덱스 생성 (Repository::init)
//!                         2. 이벤트 허브 생성
//!                         3. 서비스 생성 (리포지토리 Arc 주입)
//! ```
//!
//! 서비스 생성자는 `ServiceLocator::get`으로 의존성을 가져오므로
//! 반드시 리포지토리 등록 이후에 만들어져야 합니다.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::errors::AppError;
use crate::repositories::{
    jobs::JobRepository,
    messages::{ConversationRepository, MessageRepository},
    reviews::ReviewRepository,
    tickets::TicketRepository,
    tokens::TokenRepository,
    users::UserRepository,
};
use crate::services::{
    admin::AdminService,
    auth::{AccountGuard, AuthService, TokenService},
    jobs::JobService,
    messages::MessageService,
    realtime::EventHub,
    reviews::ReviewService,
    tickets::TicketService,
    users::UserService,
};
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 로그에 표시되는 서비스 이름
    fn name(&self) -> &str;

    /// 등록 직후 한 번 호출됩니다.
    async fn init(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리 로그에 표시되는 리포지토리 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 저장소 준비 작업
    async fn init(&self) -> Result<(), AppError>;
}

/// 싱글톤 의존성 주입 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
});

impl ServiceLocator {
    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체됩니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = Self::clean_type_name(std::any::type_name::<T>());
        log::debug!("📦 Registering: {}", type_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 인스턴스를 조회합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 등록된 인스턴스를 조회합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입을 요청하면 패닉합니다. 이는 초기화 순서 오류이므로
    /// 서버 기동 시점에 바로 드러나야 합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        Self::try_get::<T>().unwrap_or_else(|| {
            panic!(
                "Component not registered: {}. Register it with ServiceLocator::set() before use",
                std::any::type_name::<T>()
            )
        })
    }

    pub fn is_registered<T: 'static + Send + Sync>() -> bool {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances.contains_key(&TypeId::of::<T>())
    }

    fn clean_type_name(type_name: &str) -> &str {
        type_name.rsplit("::").next().unwrap_or(type_name)
    }

    async fn register_repository<R: Repository + 'static>(repository: R) -> Result<(), AppError> {
        print_sub_task(repository.name(), "Creating...");
        repository.init().await?;
        print_sub_task(repository.name(), &format!("✓ Ready ({})", repository.collection_name()));
        Self::set(Arc::new(repository));
        Ok(())
    }

    async fn register_service<S: Service + 'static>(service: S) -> Result<(), AppError> {
        print_sub_task(service.name(), "Creating...");
        service.init().await?;
        print_sub_task(service.name(), "✓ Created");
        Self::set(Arc::new(service));
        Ok(())
    }

    /// 모든 리포지토리와 서비스를 의존성 순서대로 생성/등록합니다.
    ///
    /// `Database`와 `RedisClient`는 호출 전에 `set`으로 등록되어 있어야 합니다.
    pub async fn initialize_all() -> Result<(), AppError> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        print_step_start(1, "Creating Repository instances");
        Self::register_repository(UserRepository::new()).await?;
        Self::register_repository(JobRepository::new()).await?;
        Self::register_repository(ReviewRepository::new()).await?;
        Self::register_repository(ConversationRepository::new()).await?;
        Self::register_repository(MessageRepository::new()).await?;
        Self::register_repository(TicketRepository::new()).await?;
        Self::register_repository(TokenRepository::new()).await?;
        let repo_count = 7;
        print_step_complete(1, "Repository instances created", repo_count);

        print_step_start(2, "Creating Service instances");
        if !Self::is_registered::<EventHub>() {
            Self::register_service(EventHub::from_config()).await?;
        }
        Self::register_service(TokenService::new()).await?;
        Self::register_service(AccountGuard::new()).await?;
        Self::register_service(UserService::new()).await?;
        Self::register_service(AuthService::new()).await?;
        Self::register_service(JobService::new()).await?;
        Self::register_service(ReviewService::new()).await?;
        Self::register_service(MessageService::new()).await?;
        Self::register_service(TicketService::new()).await?;
        Self::register_service(AdminService::new()).await?;
        let service_count = 10;
        print_step_complete(2, "Service instances created", service_count);

        print_final_summary(repo_count, service_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: u32,
    }

    struct NeverRegistered;

    #[test]
    fn test_set_and_get_roundtrip() {
        ServiceLocator::set(Arc::new(Counter { value: 7 }));

        assert!(ServiceLocator::is_registered::<Counter>());
        assert_eq!(ServiceLocator::get::<Counter>().value, 7);
    }

    #[test]
    fn test_try_get_missing_returns_none() {
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }

    #[test]
    #[should_panic(expected = "Component not registered")]
    fn test_get_missing_panics() {
        let _ = ServiceLocator::get::<NeverRegistered>();
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(ServiceLocator::clean_type_name("a::b::JobService"), "JobService");
        assert_eq!(ServiceLocator::clean_type_name("JobService"), "JobService");
    }
}
