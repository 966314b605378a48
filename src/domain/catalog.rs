// ==========================================
// 高校排课系统 - 教学目录领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql subjects/rooms 表
// ==========================================

use crate::domain::types::Semester;
use serde::{Deserialize, Serialize};

// ==========================================
// Subject - 科目主数据
// ==========================================
// 用途: 导入层写入,引擎层只读（排课运行期内不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    // ===== 主键 =====
    pub subject_code: String,      // 科目代码（如 "IT101"）

    // ===== 基础信息 =====
    pub descriptive_title: String, // 科目名称
    pub course_code: String,       // 所属课程（专业）代码
    pub semester: Semester,        // 开课学期
    pub year_level: i32,           // 适用年级 (1..4)
    pub units: f64,                // 学分
}

// ==========================================
// Room - 教室主数据
// ==========================================
// 用途: 排课时随机选取,运行期内只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    // ===== 主键 =====
    pub room_id: String,       // 教室唯一标识（如 "RM-101"）

    // ===== 基础信息 =====
    pub name: String,          // 教室名称
    pub capacity: Option<i32>, // 容量（座位数，可缺省）
}
