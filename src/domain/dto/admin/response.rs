use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserStats {
    pub total: u64,
    pub seekers: u64,
    pub providers: u64,
    pub admins: u64,
    pub banned: u64,
    pub suspended: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobStats {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub reported: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketStats {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
}

/// 관리자 대시보드 집계
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsResponse {
    pub users: UserStats,
    pub jobs: JobStats,
    pub tickets: TicketStats,
    pub reviews: u64,
}
