// ==========================================
// 高校排课系统 - 教务设置领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql portal_settings 表（单行）
// ==========================================

use crate::domain::types::Semester;
use serde::{Deserialize, Serialize};

// ==========================================
// PortalSettings - 教务全局上下文
// ==========================================
// 用途: 排课运行的学期/学年来源
// 约束: 记录缺失视为致命错误（排课无法进行）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSettings {
    pub semester: Semester,  // 当前学期
    pub school_year: String, // 当前学年（如 "2026-2027"）
}
