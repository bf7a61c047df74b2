//! # Repository Layer
//!
//! 컬렉션별 데이터 액세스 계층입니다. 각 리포지토리는 `ServiceLocator`에
//! 싱글톤으로 등록되며 `instance()`로 꺼내 씁니다.
//!
//! | 리포지토리 | 저장소 |
//! |---|---|
//! | `UserRepository` | MongoDB `users` + Redis 프로필 캐시 |
//! | `JobRepository` | MongoDB `jobs` |
//! | `ReviewRepository` | MongoDB `reviews` |
//! | `ConversationRepository` / `MessageRepository` | MongoDB `conversations` / `messages` |
//! | `TicketRepository` | MongoDB `tickets` |
//! | `TokenRepository` | Redis 리프레시 토큰 |
//!
//! 필터 문서를 만드는 로직은 데이터베이스 없이 테스트할 수 있도록
//! 순수 함수로 분리되어 있습니다.

use mongodb::error::{ErrorKind, WriteFailure};

pub mod users;
pub mod jobs;
pub mod reviews;
pub mod messages;
pub mod tickets;
pub mod tokens;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}
