// ==========================================
// 高校排课系统 - 开课班级仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::schedule::ClassSection;
use crate::domain::types::Semester;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// created_at 存储格式
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// ClassSectionRepository - 开课班级仓储
// ==========================================

/// 开课班级仓储
/// 职责: 管理 class_sections 表的CRUD操作
pub struct ClassSectionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ClassSectionRepository {
    /// 创建新的开课班级仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = Connection::open(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入开课班级
    ///
    /// # 参数
    /// - section: 班级记录
    pub fn insert(&self, section: &ClassSection) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let created_at_str = section.created_at.format(DATETIME_FMT).to_string();

        conn.execute(
            r#"
            INSERT INTO class_sections (
                class_id, subject_code, course_code, year_level,
                semester, school_year, section, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                section.class_id,
                section.subject_code,
                section.course_code,
                section.year_level,
                section.semester.to_string(),
                section.school_year,
                section.section,
                created_at_str,
            ],
        )?;

        Ok(())
    }

    /// 按课程与学年/学期查询开课班级
    ///
    /// # 参数
    /// - course_code: 课程代码
    /// - semester: 学期
    /// - school_year: 学年
    pub fn find_by_course_and_term(
        &self,
        course_code: &str,
        semester: Semester,
        school_year: &str,
    ) -> RepositoryResult<Vec<ClassSection>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                class_id, subject_code, course_code, year_level,
                semester, school_year, section, created_at
            FROM class_sections
            WHERE course_code = ?1 AND semester = ?2 AND school_year = ?3
            ORDER BY year_level, subject_code
            "#,
        )?;

        let sections = stmt
            .query_map(
                params![course_code, semester.to_string(), school_year],
                map_class_section_row,
            )?
            .collect::<SqliteResult<Vec<ClassSection>>>()?;

        Ok(sections)
    }

    /// 统计班级总数
    pub fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM class_sections", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}

/// class_sections 行映射
fn map_class_section_row(row: &rusqlite::Row<'_>) -> SqliteResult<ClassSection> {
    let semester_str: String = row.get(4)?;
    let created_at_str: String = row.get(7)?;

    Ok(ClassSection {
        class_id: row.get(0)?,
        subject_code: row.get(1)?,
        course_code: row.get(2)?,
        year_level: row.get(3)?,
        semester: Semester::parse(&semester_str).unwrap_or(Semester::First),
        school_year: row.get(5)?,
        section: row.get(6)?,
        created_at: NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc()),
    })
}
