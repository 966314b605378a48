// ==========================================
// 高校排课系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 排课引擎错误类型
#[derive(Error, Debug)]
pub enum GenerationError {
    // ===== 前置条件错误 =====
    #[error("教务设置记录缺失: 无法确定当前学期/学年")]
    SettingsMissing,

    #[error("教室列表为空: 排课中止")]
    NoRoomsAvailable,

    // ===== 数据访问错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

/// Result 类型别名
pub type GenerationResult<T> = Result<T, GenerationError>;
