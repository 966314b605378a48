// ==========================================
// 高校排课系统 - 教学目录导入工具
// ==========================================
// 用法: import_catalog <db_path> <subjects|rooms> <csv_path>
// ==========================================

use std::error::Error;
use std::sync::{Arc, Mutex};

use course_scheduling_aps::db::open_sqlite_connection;
use course_scheduling_aps::i18n::t_with_args;
use course_scheduling_aps::importer::CatalogImporter;
use course_scheduling_aps::logging;
use course_scheduling_aps::repository::{RoomRepository, SubjectRepository};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("用法: import_catalog <db_path> <subjects|rooms> <csv_path>");
        std::process::exit(2);
    }

    let db_path = &args[1];
    let kind = args[2].as_str();
    let csv_path = &args[3];

    let conn = Arc::new(Mutex::new(open_sqlite_connection(db_path)?));
    let importer = CatalogImporter::new(
        Arc::new(SubjectRepository::from_connection(conn.clone())),
        Arc::new(RoomRepository::from_connection(conn)),
    );

    let summary = match kind {
        "subjects" => importer.import_subjects_from_csv(csv_path)?,
        "rooms" => importer.import_rooms_from_csv(csv_path)?,
        other => {
            eprintln!("未知导入类型: {}（仅支持 subjects / rooms）", other);
            std::process::exit(2);
        }
    };

    println!(
        "{}",
        t_with_args(
            "import.completed",
            &[
                ("success", &summary.success.to_string()),
                ("skipped", &summary.skipped.len().to_string()),
            ],
        )
    );

    for (row, reason) in &summary.skipped {
        eprintln!("  行 {}: {}", row, reason);
    }

    Ok(())
}
