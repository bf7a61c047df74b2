//! 응답 DTO 공용 도우미

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE: i64 = 10_000;

/// BSON 날짜를 RFC 3339 문자열로 변환합니다.
pub fn format_datetime(value: &DateTime) -> String {
    value
        .try_to_rfc3339_string()
        .unwrap_or_else(|_| value.timestamp_millis().to_string())
}

pub fn format_optional_datetime(value: &Option<DateTime>) -> Option<String> {
    value.as_ref().map(format_datetime)
}

pub fn hex_id(id: &Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

/// 목록 조회 공통 페이지 파라미터 (1부터 시작)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p > 0).map(|p| p.min(MAX_PAGE)).unwrap_or(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .filter(|l| *l > 0)
            .map(|l| l.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit()).max(0) as u64
    }
}

/// 페이지 단위 목록 응답
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: u64, query: &PageQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            limit: query.limit(),
        }
    }
}

/// 단순 확인 메시지 응답
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_bounds() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.skip(), 0);

        let query = PageQuery::new(Some(3), Some(500));
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
        assert_eq!(query.skip(), 200);

        let query = PageQuery::new(Some(-2), Some(0));
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_is_clamped() {
        let query = PageQuery::new(Some(i64::MAX), Some(20));

        assert_eq!(query.page(), MAX_PAGE);
        assert_eq!(query.skip(), ((MAX_PAGE - 1) * 20) as u64);
    }

    #[test]
    fn test_format_datetime() {
        let value = DateTime::from_millis(0);

        assert_eq!(format_datetime(&value), "1970-01-01T00:00:00Z");
        assert_eq!(hex_id(&None), "");
    }
}
