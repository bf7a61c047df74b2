//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 표준 클레임과 용도별 토큰 2개를 묶은 정보를 정의합니다.
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::UserRole;

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 사용자 ID
/// - `role`: 사용자 역할
/// - `kind`: 액세스/리프레시 구분
/// - `jti`: 토큰 고유 ID (같은 초에 발급된 리프레시 토큰도 서로 다르게)
/// - `iat` / `exp`: Unix timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: UserRole,
    pub kind: TokenKind,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
