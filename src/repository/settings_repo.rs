// ==========================================
// 高校排课系统 - 教务设置仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::settings::PortalSettings;
use crate::domain::types::Semester;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// SettingsRepository - 教务设置仓储
// ==========================================

/// 教务设置仓储
/// 职责: 管理 portal_settings 表（单行,id=1）
pub struct SettingsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SettingsRepository {
    /// 创建新的教务设置仓储实例
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

    /// 读取当前教务设置
    ///
    /// # 返回
    /// - Ok(PortalSettings): 当前学期/学年
    /// - Err(NotFound): 设置记录缺失（排课致命错误）
    pub fn load(&self) -> RepositoryResult<PortalSettings> {
        let conn = self.get_conn()?;

        let row = conn
            .query_row(
                "SELECT semester, school_year FROM portal_settings WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                    ))
                },
            )
            .optional()?;

        let (semester_str, school_year) = row.ok_or_else(|| RepositoryError::NotFound {
            entity: "PortalSettings".to_string(),
            id: "1".to_string(),
        })?;

        let semester = Semester::parse(&semester_str).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "semester".to_string(),
                message: format!("非法学期值: {}", semester_str),
            }
        })?;

        Ok(PortalSettings {
            semester,
            school_year,
        })
    }

    /// 写入教务设置（存在则覆盖）
    ///
    /// # 参数
    /// - settings: 学期/学年
    pub fn upsert(&self, settings: &PortalSettings) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO portal_settings (id, semester, school_year)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                semester = excluded.semester,
                school_year = excluded.school_year
            "#,
            params![settings.semester.to_string(), settings.school_year],
        )?;

        Ok(())
    }
}
