// ==========================================
// 高校排课系统 - 开发库重置与演示数据种子
// ==========================================
// 用法: reset_and_seed_demo_db [db_path] [subject_count]
// 行为: 备份并重建开发库, 写入演示目录数据
// ==========================================

use chrono::Local;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fs;
use std::path::Path;

use course_scheduling_aps::db::{get_default_db_path, open_sqlite_connection};

const DEFAULT_SUBJECT_COUNT: i32 = 12;
const DEMO_SCHOOL_YEAR: &str = "2026-2027";
const DEMO_COURSES: [&str; 2] = ["BSIT", "BSCS"];

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    let subject_count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(DEFAULT_SUBJECT_COUNT)
        .max(1);

    backup_and_reset_db(&db_path)?;

    if let Some(parent) = Path::new(&db_path).parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = open_sqlite_connection(&db_path)?;

    // Create schema
    let schema_sql = include_str!("../../scripts/dev_db/schema.sql");
    conn.execute_batch(schema_sql)?;

    // Seed data
    seed_demo_catalog(&conn, subject_count)?;

    print_quick_counts(&conn)?;

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn seed_demo_catalog(conn: &Connection, subject_count: i32) -> Result<(), Box<dyn Error>> {
    let now_sql_dt = Local::now().naive_local().format("%Y-%m-%d %H:%M:%S").to_string();

    let tx = conn.unchecked_transaction()?;

    // schema_version（与 src/db.rs CURRENT_SCHEMA_VERSION 对齐）
    tx.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (1, ?1)",
        params![now_sql_dt],
    )?;

    // 排课参数默认集（与代码内缺省一致, 便于在库里直接调整）
    tx.execute(
        "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global','candidate_days','MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY,SATURDAY',?1)",
        params![now_sql_dt],
    )?;
    tx.execute(
        "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global','earliest_start_hour','8',?1)",
        params![now_sql_dt],
    )?;
    tx.execute(
        "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global','latest_start_hour','16',?1)",
        params![now_sql_dt],
    )?;
    tx.execute(
        "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global','latest_end_minutes','1080',?1)",
        params![now_sql_dt],
    )?;
    tx.execute(
        "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global','duration_options','60,90',?1)",
        params![now_sql_dt],
    )?;
    tx.execute(
        "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global','section_label','A',?1)",
        params![now_sql_dt],
    )?;

    // 教务设置
    tx.execute(
        "INSERT INTO portal_settings (id, semester, school_year) VALUES (1, 'FIRST', ?1)",
        params![DEMO_SCHOOL_YEAR],
    )?;

    // 教室
    for (idx, name) in [
        "Main Building 101",
        "Main Building 102",
        "Main Building 201",
        "Annex Lab 1",
        "Annex Lab 2",
        "Science Hall 301",
    ]
    .iter()
    .enumerate()
    {
        tx.execute(
            "INSERT INTO rooms (room_id, name, capacity) VALUES (?1, ?2, ?3)",
            params![format!("RM-{}", 101 + idx as i32), name, 40 + (idx as i32 % 3) * 5],
        )?;
    }

    // 科目（轮流分配到演示课程与年级, 两学期交替）
    for i in 0..subject_count {
        let course = DEMO_COURSES[(i as usize) % DEMO_COURSES.len()];
        let year_level = 1 + (i / 4) % 4;
        let semester = if i % 2 == 0 { "FIRST" } else { "SECOND" };

        tx.execute(
            r#"
            INSERT INTO subjects (
                subject_code, descriptive_title, course_code, semester, year_level, units
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                format!("{}{}", course, 100 + i),
                format!("Demo Subject {:02}", i + 1),
                course,
                semester,
                year_level,
                3.0,
            ],
        )?;
    }

    tx.commit()?;

    Ok(())
}

fn print_quick_counts(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let subjects: i64 = conn.query_row("SELECT COUNT(*) FROM subjects", [], |r| r.get(0))?;
    let rooms: i64 = conn.query_row("SELECT COUNT(*) FROM rooms", [], |r| r.get(0))?;

    println!("Seeded demo db:");
    println!("  subjects = {}", subjects);
    println!("  rooms    = {}", rooms);
    println!("  settings = FIRST / {}", DEMO_SCHOOL_YEAR);

    Ok(())
}
