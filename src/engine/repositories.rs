// ==========================================
// 高校排课系统 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合排课引擎所需的所有 Repository
// 约束: 各仓储共享同一个连接（运行级事务的前提）
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::db::open_sqlite_connection;
use crate::repository::{
    ClassSectionRepository, RepositoryResult, RoomRepository, ScheduleSlotRepository,
    SettingsRepository, SubjectRepository,
};

/// 排课引擎仓储集合
///
/// 聚合排课引擎所需的所有 Repository，简化依赖注入。
///
/// # 包含的仓储
/// - `settings_repo`: 教务设置
/// - `subject_repo`: 科目主数据
/// - `room_repo`: 教室主数据
/// - `class_repo`: 开课班级
/// - `schedule_repo`: 排课时段
#[derive(Clone)]
pub struct GenerationRepositories {
    /// 共享连接（运行级事务控制用）
    conn: Arc<Mutex<Connection>>,
    /// 教务设置仓储
    pub settings_repo: Arc<SettingsRepository>,
    /// 科目仓储
    pub subject_repo: Arc<SubjectRepository>,
    /// 教室仓储
    pub room_repo: Arc<RoomRepository>,
    /// 开课班级仓储
    pub class_repo: Arc<ClassSectionRepository>,
    /// 排课时段仓储
    pub schedule_repo: Arc<ScheduleSlotRepository>,
}

impl GenerationRepositories {
    /// 打开数据库并创建仓储集合（统一 PRAGMA）
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建仓储集合
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            settings_repo: Arc::new(SettingsRepository::from_connection(conn.clone())),
            subject_repo: Arc::new(SubjectRepository::from_connection(conn.clone())),
            room_repo: Arc::new(RoomRepository::from_connection(conn.clone())),
            class_repo: Arc::new(ClassSectionRepository::from_connection(conn.clone())),
            schedule_repo: Arc::new(ScheduleSlotRepository::from_connection(conn.clone())),
            conn,
        }
    }

    /// 共享连接（供运行级事务控制使用）
    pub fn conn(&self) -> &Arc<Mutex<Connection>> {
        &self.conn
    }
}

// 注: 单元测试需要在集成测试环境中运行，因为各个 Repository
// 的构造函数需要数据库连接。GenerationRepositories 作为简单的
// 聚合结构体，其正确性由集成测试和 ClassGenerator 的测试来验证。
