// ==========================================
// 高校排课系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 上课星期 (Weekday)
// ==========================================
// 候选顺序固定: 周一..周六 (周日不排课)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// 固定候选顺序（周一优先）
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// 从数据库文本解析
    ///
    /// # 参数
    /// - s: SCREAMING_SNAKE_CASE 文本（如 "MONDAY"）
    pub fn parse(s: &str) -> Option<Weekday> {
        match s.trim().to_uppercase().as_str() {
            "MONDAY" => Some(Weekday::Monday),
            "TUESDAY" => Some(Weekday::Tuesday),
            "WEDNESDAY" => Some(Weekday::Wednesday),
            "THURSDAY" => Some(Weekday::Thursday),
            "FRIDAY" => Some(Weekday::Friday),
            "SATURDAY" => Some(Weekday::Saturday),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weekday::Monday => write!(f, "MONDAY"),
            Weekday::Tuesday => write!(f, "TUESDAY"),
            Weekday::Wednesday => write!(f, "WEDNESDAY"),
            Weekday::Thursday => write!(f, "THURSDAY"),
            Weekday::Friday => write!(f, "FRIDAY"),
            Weekday::Saturday => write!(f, "SATURDAY"),
        }
    }
}

// ==========================================
// 学期 (Semester)
// ==========================================
// 与 portal_settings.semester / subjects.semester 对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semester {
    First,  // 第一学期
    Second, // 第二学期
    Summer, // 暑期学期
}

impl Semester {
    /// 从数据库文本解析
    pub fn parse(s: &str) -> Option<Semester> {
        match s.trim().to_uppercase().as_str() {
            "FIRST" => Some(Semester::First),
            "SECOND" => Some(Semester::Second),
            "SUMMER" => Some(Semester::Summer),
            _ => None,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::First => write!(f, "FIRST"),
            Semester::Second => write!(f, "SECOND"),
            Semester::Summer => write!(f, "SUMMER"),
        }
    }
}

// ==========================================
// 课时时长 (Slot Duration)
// ==========================================
// 随机取值: 60 或 90 分钟
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotDuration {
    Sixty,  // 60 分钟
    Ninety, // 90 分钟
}

impl SlotDuration {
    /// 时长（分钟）
    pub fn minutes(&self) -> i32 {
        match self {
            SlotDuration::Sixty => 60,
            SlotDuration::Ninety => 90,
        }
    }

    /// 从分钟数解析
    pub fn from_minutes(minutes: i32) -> Option<SlotDuration> {
        match minutes {
            60 => Some(SlotDuration::Sixty),
            90 => Some(SlotDuration::Ninety),
            _ => None,
        }
    }
}

impl fmt::Display for SlotDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

// ==========================================
// 排课结果 (Schedule Outcome)
// ==========================================
// 单门科目的落位结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleOutcome {
    Scheduled,   // 已找到无冲突时段
    Unscheduled, // 候选耗尽，保持未排课
}

impl fmt::Display for ScheduleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleOutcome::Scheduled => write!(f, "SCHEDULED"),
            ScheduleOutcome::Unscheduled => write!(f, "UNSCHEDULED"),
        }
    }
}
