// ==========================================
// 高校排课系统 - 教学目录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::domain::catalog::{Room, Subject};
use crate::domain::types::Semester;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// SubjectRepository - 科目仓储
// ==========================================

/// 科目仓储
/// 职责: 管理 subjects 表的查询与写入
pub struct SubjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SubjectRepository {
    /// 创建新的科目仓储实例
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

    /// 按课程与学期查询待排科目
    ///
    /// # 参数
    /// - course_code: 课程（专业）代码
    /// - semester: 学期
    ///
    /// # 返回
    /// - Ok(Vec<Subject>): 科目列表（按科目代码排序，保证扫描顺序稳定）
    pub fn find_by_course_and_semester(
        &self,
        course_code: &str,
        semester: Semester,
    ) -> RepositoryResult<Vec<Subject>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                subject_code, descriptive_title, course_code, semester, year_level, units
            FROM subjects
            WHERE course_code = ?1 AND semester = ?2
            ORDER BY year_level, subject_code
            "#,
        )?;

        let subjects = stmt
            .query_map(params![course_code, semester.to_string()], map_subject_row)?
            .collect::<SqliteResult<Vec<Subject>>>()?;

        Ok(subjects)
    }

    /// 插入或更新单个科目
    pub fn upsert_single(&self, subject: &Subject) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO subjects (
                subject_code, descriptive_title, course_code, semester, year_level, units
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                subject.subject_code,
                subject.descriptive_title,
                subject.course_code,
                subject.semester.to_string(),
                subject.year_level,
                subject.units,
            ],
        )?;

        Ok(())
    }

    /// 批量插入或更新科目
    ///
    /// # 返回
    /// - Ok(usize): 成功写入的记录数
    pub fn upsert_batch(&self, subjects: &[Subject]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        // 开启事务
        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;

        for subject in subjects {
            let affected = conn.execute(
                r#"
                INSERT OR REPLACE INTO subjects (
                    subject_code, descriptive_title, course_code, semester, year_level, units
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    subject.subject_code,
                    subject.descriptive_title,
                    subject.course_code,
                    subject.semester.to_string(),
                    subject.year_level,
                    subject.units,
                ],
            )?;

            updated_count += affected;
        }

        // 提交事务
        conn.execute("COMMIT", [])?;

        Ok(updated_count)
    }
}

/// subjects 行映射
fn map_subject_row(row: &rusqlite::Row<'_>) -> SqliteResult<Subject> {
    let semester_str: String = row.get(3)?;
    Ok(Subject {
        subject_code: row.get(0)?,
        descriptive_title: row.get(1)?,
        course_code: row.get(2)?,
        // 非法学期值按 FIRST 兜底（schema CHECK 约束下不应出现）
        semester: Semester::parse(&semester_str).unwrap_or(Semester::First),
        year_level: row.get(4)?,
        units: row.get(5)?,
    })
}

// ==========================================
// RoomRepository - 教室仓储
// ==========================================

/// 教室仓储
/// 职责: 管理 rooms 表的查询与写入
pub struct RoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoomRepository {
    /// 创建新的教室仓储实例
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

    /// 查询全部可用教室
    ///
    /// # 返回
    /// - Ok(Vec<Room>): 教室列表（按教室ID排序；洗牌由引擎层负责）
    pub fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT room_id, name, capacity
            FROM rooms
            ORDER BY room_id
            "#,
        )?;

        let rooms = stmt
            .query_map([], |row| {
                Ok(Room {
                    room_id: row.get(0)?,
                    name: row.get(1)?,
                    capacity: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<Room>>>()?;

        Ok(rooms)
    }

    /// 插入或更新单个教室
    pub fn upsert_single(&self, room: &Room) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO rooms (room_id, name, capacity)
            VALUES (?1, ?2, ?3)
            "#,
            params![room.room_id, room.name, room.capacity],
        )?;

        Ok(())
    }

    /// 批量插入或更新教室
    pub fn upsert_batch(&self, rooms: &[Room]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;

        for room in rooms {
            let affected = conn.execute(
                r#"
                INSERT OR REPLACE INTO rooms (room_id, name, capacity)
                VALUES (?1, ?2, ?3)
                "#,
                params![room.room_id, room.name, room.capacity],
            )?;

            updated_count += affected;
        }

        conn.execute("COMMIT", [])?;

        Ok(updated_count)
    }
}
