// ==========================================
// 高校排课系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod schedule;
pub mod settings;
pub mod types;

// 重导出核心类型
pub use catalog::{Room, Subject};
pub use schedule::{
    format_hhmm, parse_hhmm, CandidateSlot, ClassSection, ScheduleSlot, TimeInterval,
};
pub use settings::PortalSettings;
pub use types::{ScheduleOutcome, Semester, SlotDuration, Weekday};
