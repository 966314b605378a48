// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use course_scheduling_aps::db::configure_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;

    // 初始化 schema（与种子工具共用同一份 schema.sql）
    let schema_sql = include_str!("../scripts/dev_db/schema.sql");
    conn.execute_batch(schema_sql)?;
    conn.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (1, datetime('now'))",
        [],
    )?;

    Ok((temp_file, db_path))
}

/// 打开测试库连接（统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 写入教务设置
pub fn insert_test_settings(
    conn: &Connection,
    semester: &str,
    school_year: &str,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO portal_settings (id, semester, school_year) VALUES (1, ?1, ?2)",
        params![semester, school_year],
    )?;
    Ok(())
}

/// 写入 n 间测试教室（RM-101 起）
pub fn insert_test_rooms(conn: &Connection, count: i32) -> Result<(), Box<dyn Error>> {
    for i in 0..count {
        conn.execute(
            "INSERT INTO rooms (room_id, name, capacity) VALUES (?1, ?2, 40)",
            params![format!("RM-{}", 101 + i), format!("Test Room {}", 101 + i)],
        )?;
    }
    Ok(())
}

/// 写入单个测试科目
pub fn insert_test_subject(
    conn: &Connection,
    subject_code: &str,
    course_code: &str,
    semester: &str,
    year_level: i32,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO subjects (
            subject_code, descriptive_title, course_code, semester, year_level, units
        ) VALUES (?1, ?2, ?3, ?4, ?5, 3.0)
        "#,
        params![
            subject_code,
            format!("Title of {}", subject_code),
            course_code,
            semester,
            year_level,
        ],
    )?;
    Ok(())
}

/// 批量写入测试科目（code 前缀 + 序号）
pub fn insert_test_subjects(
    conn: &Connection,
    prefix: &str,
    course_code: &str,
    semester: &str,
    count: i32,
) -> Result<(), Box<dyn Error>> {
    for i in 0..count {
        insert_test_subject(
            conn,
            &format!("{}{:03}", prefix, i + 1),
            course_code,
            semester,
            1 + i % 4,
        )?;
    }
    Ok(())
}

/// 写入 global scope 配置项
pub fn set_global_config(
    conn: &Connection,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO config_kv (scope_id, key, value, updated_at)
        VALUES ('global', ?1, ?2, datetime('now'))
        ON CONFLICT(scope_id, key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        params![key, value],
    )?;
    Ok(())
}
