//! # 문자열 유틸리티
//!
//! 요청 값 정리와 ID 파싱에 쓰이는 공통 함수들입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use crate::errors::AppError;

/// 공백을 제거한 값이 비어 있으면 400 에러
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{} is required", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 공백 문자열은 `None`으로 정리합니다
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 경로/본문으로 받은 16진수 ID를 `ObjectId`로 변환합니다.
///
/// 형식이 틀린 ID는 존재하지 않는 리소스와 구분해 400으로 응답합니다.
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid {}: {}", field_name, value)))
}

/// 사용자 입력을 MongoDB `$regex`에 넣기 전에 메타 문자를 이스케이프합니다
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if "\\.^$|?*+()[]{}/".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Plumbing", "category").unwrap(), "Plumbing");
        assert_eq!(validate_required_string("  Fix sink  ", "title").unwrap(), "Fix sink");

        assert!(validate_required_string("", "title").is_err());
        assert!(validate_required_string("   ", "title").is_err());
        assert!(validate_required_string("\t\n", "title").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Notes {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            completion_notes: Option<String>,
        }

        let notes: Notes = serde_json::from_str(r#"{"completion_notes": "  done  "}"#).unwrap();
        assert_eq!(notes.completion_notes, Some("done".to_string()));

        let notes: Notes = serde_json::from_str(r#"{"completion_notes": "  "}"#).unwrap();
        assert_eq!(notes.completion_notes, None);

        let notes: Notes = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(notes.completion_notes, None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "job id").unwrap(), id);

        match parse_object_id("not-an-id", "job id") {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("job id")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("a.b"), "a\\.b");
        assert_eq!(escape_regex("kim (plumber)"), "kim \\(plumber\\)");
        assert_eq!(escape_regex("plain"), "plain");
    }
}
