//! 기동 로그 포맷팅 유틸리티
//!
//! 서비스 레지스트리 초기화 과정을 박스 제목, 단계, 하위 작업 형태로 로그에 남깁니다.

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(50);

    log::info!("╔{}╗", border);
    log::info!("║{:^49}║", title);
    log::info!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    log::info!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    log::info!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    log::info!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repos: usize, services: usize) {
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    log::info!("   📦 Repositories: {}", repos);
    log::info!("   🔧 Services: {}", services);
    log::info!("   🚀 Total Components: {}", repos + services);
}
