// ==========================================
// 高校排课系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、缺省值管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::generation::GenerationConfig;
use crate::db::open_sqlite_connection;
use crate::domain::types::{SlotDuration, Weekday};
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ===== 配置键 =====
const KEY_CANDIDATE_DAYS: &str = "candidate_days";
const KEY_EARLIEST_START_HOUR: &str = "earliest_start_hour";
const KEY_LATEST_START_HOUR: &str = "latest_start_hour";
const KEY_LATEST_END_MINUTES: &str = "latest_end_minutes";
const KEY_DURATION_OPTIONS: &str = "duration_options";
const KEY_SECTION_LABEL: &str = "section_label";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 加载排课运行参数
    ///
    /// 缺失的键使用默认值；已存储但格式非法的值视为错误（不静默回退）。
    ///
    /// # 返回
    /// - Ok(GenerationConfig): 排课参数
    /// - Err: 配置值解析失败
    pub fn load_generation_config(&self) -> Result<GenerationConfig, Box<dyn Error>> {
        let defaults = GenerationConfig::default();

        // 候选星期
        let days_raw = self.get_config_or_default(
            KEY_CANDIDATE_DAYS,
            "MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY,SATURDAY",
        )?;
        let mut candidate_days = Vec::new();
        for token in days_raw.split(',') {
            let day = Weekday::parse(token).ok_or_else(|| {
                format!("配置值格式错误 (key: {}, value: {})", KEY_CANDIDATE_DAYS, token)
            })?;
            candidate_days.push(day);
        }
        if candidate_days.is_empty() {
            return Err(format!("配置值格式错误 (key: {}): 候选星期为空", KEY_CANDIDATE_DAYS).into());
        }

        // 起始整点范围
        let earliest_start_hour: i32 = self
            .get_config_or_default(KEY_EARLIEST_START_HOUR, &defaults.earliest_start_hour.to_string())?
            .trim()
            .parse()
            .map_err(|e| format!("配置值格式错误 (key: {}): {}", KEY_EARLIEST_START_HOUR, e))?;
        let latest_start_hour: i32 = self
            .get_config_or_default(KEY_LATEST_START_HOUR, &defaults.latest_start_hour.to_string())?
            .trim()
            .parse()
            .map_err(|e| format!("配置值格式错误 (key: {}): {}", KEY_LATEST_START_HOUR, e))?;
        if !(0..24).contains(&earliest_start_hour)
            || !(0..24).contains(&latest_start_hour)
            || earliest_start_hour > latest_start_hour
        {
            return Err(format!(
                "配置值范围错误: earliest_start_hour={}, latest_start_hour={}",
                earliest_start_hour, latest_start_hour
            )
            .into());
        }

        // 下课硬上限
        let latest_end_min: i32 = self
            .get_config_or_default(KEY_LATEST_END_MINUTES, &defaults.latest_end_min.to_string())?
            .trim()
            .parse()
            .map_err(|e| format!("配置值格式错误 (key: {}): {}", KEY_LATEST_END_MINUTES, e))?;

        // 课时时长候选
        let durations_raw = self.get_config_or_default(KEY_DURATION_OPTIONS, "60,90")?;
        let mut duration_options = Vec::new();
        for token in durations_raw.split(',') {
            let minutes: i32 = token
                .trim()
                .parse()
                .map_err(|e| format!("配置值格式错误 (key: {}): {}", KEY_DURATION_OPTIONS, e))?;
            let duration = SlotDuration::from_minutes(minutes).ok_or_else(|| {
                format!(
                    "配置值范围错误 (key: {}): 不支持的课时时长 {}",
                    KEY_DURATION_OPTIONS, minutes
                )
            })?;
            duration_options.push(duration);
        }
        if duration_options.is_empty() {
            return Err(format!("配置值格式错误 (key: {}): 时长候选为空", KEY_DURATION_OPTIONS).into());
        }

        // 班级段后缀
        let section_label = self.get_config_or_default(KEY_SECTION_LABEL, &defaults.section_label)?;

        Ok(GenerationConfig {
            candidate_days,
            earliest_start_hour,
            latest_start_hour,
            latest_end_min,
            duration_options,
            section_label,
        })
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 返回
    /// - Ok(String): 配置快照的JSON字符串
    /// - Err: 获取失败
    ///
    /// # 用途
    /// - 排课运行日志中记录当时生效的参数，便于事后解释结果
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        // 查询所有global scope的配置
        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        // 序列化为JSON
        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 写入 global scope 配置值（测试/维护工具用）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

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
}
