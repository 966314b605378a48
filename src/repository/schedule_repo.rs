// ==========================================
// 高校排课系统 - 排课时段仓储
// ==========================================
// 红线: Repository 不含业务逻辑 (冲突判定由引擎层负责)
// ==========================================

use crate::domain::schedule::{format_hhmm, parse_hhmm, ScheduleSlot};
use crate::domain::types::Weekday;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// created_at 存储格式
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// ScheduleSlotRepository - 排课时段仓储
// ==========================================

/// 排课时段仓储
/// 职责: 管理 schedule_slots 表的CRUD操作
pub struct ScheduleSlotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScheduleSlotRepository {
    /// 创建新的排课时段仓储实例
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

    /// 插入排课时段
    ///
    /// # 参数
    /// - slot: 时段记录（时间以 "HH:MM" 文本落库）
    pub fn insert(&self, slot: &ScheduleSlot) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let created_at_str = slot.created_at.format(DATETIME_FMT).to_string();

        conn.execute(
            r#"
            INSERT INTO schedule_slots (
                schedule_id, class_id, room_id, day_of_week,
                start_time, end_time, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                slot.schedule_id,
                slot.class_id,
                slot.room_id,
                slot.day_of_week.to_string(),
                format_hhmm(slot.start_min),
                format_hhmm(slot.end_min),
                created_at_str,
            ],
        )?;

        Ok(())
    }

    /// 查询某教室的全部已排时段（引擎冲突扫描输入）
    ///
    /// # 参数
    /// - room_id: 教室ID
    ///
    /// # 返回
    /// - Ok(Vec<ScheduleSlot>): 该教室全部时段（按星期、起始时间排序）
    pub fn find_by_room(&self, room_id: &str) -> RepositoryResult<Vec<ScheduleSlot>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                schedule_id, class_id, room_id, day_of_week,
                start_time, end_time, created_at
            FROM schedule_slots
            WHERE room_id = ?1
            ORDER BY day_of_week, start_time
            "#,
        )?;

        let slots = stmt
            .query_map(params![room_id], map_schedule_slot_row)?
            .collect::<SqliteResult<Vec<ScheduleSlot>>>()?;

        Ok(slots)
    }

    /// 查询某教室某星期的已排时段
    ///
    /// # 参数
    /// - room_id: 教室ID
    /// - day: 星期
    pub fn find_by_room_and_day(
        &self,
        room_id: &str,
        day: Weekday,
    ) -> RepositoryResult<Vec<ScheduleSlot>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                schedule_id, class_id, room_id, day_of_week,
                start_time, end_time, created_at
            FROM schedule_slots
            WHERE room_id = ?1 AND day_of_week = ?2
            ORDER BY start_time
            "#,
        )?;

        let slots = stmt
            .query_map(params![room_id, day.to_string()], map_schedule_slot_row)?
            .collect::<SqliteResult<Vec<ScheduleSlot>>>()?;

        Ok(slots)
    }

    /// 查询全部已排时段（冲突审计输入）
    pub fn list_all(&self) -> RepositoryResult<Vec<ScheduleSlot>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                schedule_id, class_id, room_id, day_of_week,
                start_time, end_time, created_at
            FROM schedule_slots
            ORDER BY room_id, day_of_week, start_time
            "#,
        )?;

        let slots = stmt
            .query_map([], map_schedule_slot_row)?
            .collect::<SqliteResult<Vec<ScheduleSlot>>>()?;

        Ok(slots)
    }

    /// 统计时段总数
    pub fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM schedule_slots", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}

/// schedule_slots 行映射
fn map_schedule_slot_row(row: &rusqlite::Row<'_>) -> SqliteResult<ScheduleSlot> {
    let day_str: String = row.get(3)?;
    let start_str: String = row.get(4)?;
    let end_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    Ok(ScheduleSlot {
        schedule_id: row.get(0)?,
        class_id: row.get(1)?,
        room_id: row.get(2)?,
        // 非法星期值按 MONDAY 兜底（schema CHECK 约束下不应出现）
        day_of_week: Weekday::parse(&day_str).unwrap_or(Weekday::Monday),
        start_min: parse_hhmm(&start_str).unwrap_or(0),
        end_min: parse_hhmm(&end_str).unwrap_or(0),
        created_at: NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc()),
    })
}
