use crate::domain::entities::users::UserRole;

/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 인증이 선택사항임 (있으면 검증, 없어도 허용)
    Optional,
}

/// 요구되는 역할 정보
#[derive(Debug, Clone)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(UserRole),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<UserRole>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, role: UserRole) -> bool {
        match self {
            RequiredRole::Single(required) => *required == role,
            RequiredRole::Any(required) => required.contains(&role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_requirements() {
        assert!(RequiredRole::Single(UserRole::Admin).is_satisfied(UserRole::Admin));
        assert!(!RequiredRole::Single(UserRole::Admin).is_satisfied(UserRole::Seeker));

        let any = RequiredRole::Any(vec![UserRole::Seeker, UserRole::Admin]);
        assert!(any.is_satisfied(UserRole::Seeker));
        assert!(!any.is_satisfied(UserRole::Provider));
    }
}
