// ==========================================
// 高校排课系统 - 排课命令主入口
// ==========================================
// 用法: course-scheduling-aps <course_code> [db_path] [seed]
// 行为: 为指定课程生成本学期班级与时段, 逐科目打印结果
// ==========================================

use std::error::Error;

use course_scheduling_aps::config::ConfigManager;
use course_scheduling_aps::db::{get_default_db_path, read_schema_version, CURRENT_SCHEMA_VERSION};
use course_scheduling_aps::domain::format_hhmm;
use course_scheduling_aps::engine::{
    ClassGenerator, GenerationError, GenerationRepositories, SlotRng,
};
use course_scheduling_aps::i18n::{t, t_with_args};
use course_scheduling_aps::{logging, APP_NAME, VERSION};

fn main() -> Result<(), Box<dyn Error>> {
    // 初始化日志系统
    logging::init();

    let course_code = match std::env::args().nth(1) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            eprintln!("用法: course-scheduling-aps <course_code> [db_path] [seed]");
            std::process::exit(2);
        }
    };

    let db_path = std::env::args().nth(2).unwrap_or_else(get_default_db_path);

    let seed = std::env::args()
        .nth(3)
        .and_then(|s| s.parse::<u64>().ok());

    tracing::info!("==================================================");
    tracing::info!("{} - 教务决策支持系统", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");
    tracing::info!("使用数据库: {}", db_path);

    // 打开仓储集合（共享同一连接）
    let repos = GenerationRepositories::open(&db_path)?;

    // schema 版本提示（不做自动迁移）
    {
        let conn = repos.conn().lock().map_err(|e| format!("锁获取失败: {}", e))?;
        match read_schema_version(&conn)? {
            Some(v) if v == CURRENT_SCHEMA_VERSION => {}
            Some(v) => tracing::warn!(
                "schema_version={} 与当前代码期望 {} 不一致，请检查数据库",
                v,
                CURRENT_SCHEMA_VERSION
            ),
            None => tracing::warn!("数据库缺少 schema_version 表，可能不是本系统的库"),
        }
    }

    // 加载排课参数
    let config_manager = ConfigManager::from_connection(repos.conn().clone())?;
    let config = config_manager.load_generation_config()?;
    tracing::debug!("生效配置快照: {}", config_manager.get_config_snapshot()?);

    // 随机源: 显式种子可复现
    let mut rng = match seed {
        Some(s) => {
            tracing::info!("使用显式随机种子: {}", s);
            SlotRng::from_seed(s)
        }
        None => SlotRng::from_entropy(),
    };

    // 执行排课
    let generator = ClassGenerator::new(repos, config);
    let report = match generator.generate(&course_code, &mut rng) {
        Ok(report) => report,
        Err(GenerationError::SettingsMissing) => {
            eprintln!("{}", t("generate.settings_missing"));
            std::process::exit(1);
        }
        Err(GenerationError::NoRoomsAvailable) => {
            eprintln!("{}", t("generate.no_rooms"));
            std::process::exit(1);
        }
        Err(e) => return Err(Box::new(e)),
    };

    // 逐科目打印结果
    println!(
        "{}",
        t_with_args(
            "generate.run_started",
            &[
                ("course", &report.course_code),
                ("school_year", &report.school_year),
                ("semester", &report.semester.to_string()),
            ],
        )
    );

    if report.outcomes.is_empty() {
        println!(
            "{}",
            t_with_args("generate.no_subjects", &[("course", &report.course_code)])
        );
        return Ok(());
    }

    for outcome in &report.outcomes {
        match &outcome.placement {
            Some(placement) => println!(
                "{}",
                t_with_args(
                    "generate.scheduled_line",
                    &[
                        ("subject", &outcome.subject_code),
                        ("section", &outcome.section),
                        ("day", &placement.day.to_string()),
                        ("start", &format_hhmm(placement.interval.start_min)),
                        ("end", &format_hhmm(placement.interval.end_min)),
                        ("room", &placement.room_name),
                    ],
                )
            ),
            None => println!(
                "{}",
                t_with_args(
                    "generate.unscheduled_line",
                    &[
                        ("subject", &outcome.subject_code),
                        ("section", &outcome.section),
                    ],
                )
            ),
        }
    }

    println!(
        "{}",
        t_with_args(
            "generate.summary",
            &[
                ("scheduled", &report.scheduled_count().to_string()),
                ("unscheduled", &report.unscheduled_count().to_string()),
            ],
        )
    );

    Ok(())
}
