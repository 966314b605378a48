// ==========================================
// 高校排课系统 - 排课冲突审计工具
// ==========================================
// 用法: audit_schedule_db [db_path]
// 行为: 全量检查教室/星期重叠不变量, 发现冲突以退出码 1 结束
// ==========================================

use std::error::Error;

use course_scheduling_aps::db::get_default_db_path;
use course_scheduling_aps::domain::format_hhmm;
use course_scheduling_aps::engine::{ConflictAuditor, GenerationRepositories};
use course_scheduling_aps::i18n::{t, t_with_args};
use course_scheduling_aps::logging;

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    let repos = GenerationRepositories::open(&db_path)?;
    let slots = repos.schedule_repo.list_all()?;

    let auditor = ConflictAuditor::new();
    let report = auditor.audit(&slots);

    if report.is_clean() {
        println!("{}", t("audit.clean"));
        return Ok(());
    }

    eprintln!(
        "{}",
        t_with_args(
            "audit.violations_found",
            &[("count", &report.violations.len().to_string())],
        )
    );

    for v in &report.violations {
        eprintln!(
            "  {} {} : [{} {}-{}] x [{} {}-{}]",
            v.room_id,
            v.day,
            v.first_schedule_id,
            format_hhmm(v.first_interval.start_min),
            format_hhmm(v.first_interval.end_min),
            v.second_schedule_id,
            format_hhmm(v.second_interval.start_min),
            format_hhmm(v.second_interval.end_min),
        );
    }

    std::process::exit(1);
}
