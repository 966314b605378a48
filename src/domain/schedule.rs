// ==========================================
// 高校排课系统 - 排课领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql class_sections/schedule_slots 表
// 红线: 同教室同星期的两个时段区间不得重叠
// ==========================================

use crate::domain::types::{Semester, Weekday};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// TimeInterval - 半开时间区间 [start, end)
// ==========================================
// 单位: 自 00:00 起的分钟数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start_min: i32, // 起始分钟（含）
    pub end_min: i32,   // 结束分钟（不含）
}

impl TimeInterval {
    /// 构造区间
    pub fn new(start_min: i32, end_min: i32) -> Self {
        Self { start_min, end_min }
    }

    /// 由起始分钟与时长构造
    pub fn from_start_and_duration(start_min: i32, duration_min: i32) -> Self {
        Self {
            start_min,
            end_min: start_min + duration_min,
        }
    }

    /// 重叠判定
    ///
    /// 两个半开区间重叠当且仅当:
    /// existing.start < proposed.end 且 existing.end > proposed.start
    ///
    /// # 返回
    /// - `true`: 重叠（不可同教室同星期共存）
    /// - `false`: 不重叠（允许首尾相接，如 [480,540) 与 [540,600)）
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start_min < other.end_min && self.end_min > other.start_min
    }

    /// 区间时长（分钟）
    pub fn duration_min(&self) -> i32 {
        self.end_min - self.start_min
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_hhmm(self.start_min),
            format_hhmm(self.end_min)
        )
    }
}

/// 分钟数格式化为 "HH:MM"（数据库存储格式）
pub fn format_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// "HH:MM" 解析为分钟数
///
/// # 返回
/// - Some(minutes): 解析成功
/// - None: 格式非法
pub fn parse_hhmm(s: &str) -> Option<i32> {
    let (h, m) = s.trim().split_once(':')?;
    let h: i32 = h.parse().ok()?;
    let m: i32 = m.parse().ok()?;
    if !(0..24).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    Some(h * 60 + m)
}

// ==========================================
// CandidateSlot - 候选时段
// ==========================================
// 用途: Slot Search 的扫描单元 (星期, 区间)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub day: Weekday,           // 候选星期
    pub interval: TimeInterval, // 候选区间
}

// ==========================================
// ClassSection - 开课班级
// ==========================================
// 用途: 每门科目每次排课运行生成一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSection {
    // ===== 主键 =====
    pub class_id: String,         // 班级ID (UUIDv4)

    // ===== 开课信息 =====
    pub subject_code: String,     // 科目代码
    pub course_code: String,      // 课程（专业）代码
    pub year_level: i32,          // 年级
    pub semester: Semester,       // 学期
    pub school_year: String,      // 学年（如 "2026-2027"）
    pub section: String,          // 班级段标签（如 "1A"）

    // ===== 审计 =====
    pub created_at: NaiveDateTime, // 创建时间
}

// ==========================================
// ScheduleSlot - 排课时段
// ==========================================
// 用途: 为班级找到无冲突时段后生成一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    // ===== 主键 =====
    pub schedule_id: String,       // 时段ID (UUIDv4)

    // ===== 关联 =====
    pub class_id: String,          // 所属班级
    pub room_id: String,           // 占用教室

    // ===== 时段 =====
    pub day_of_week: Weekday,      // 上课星期
    pub start_min: i32,            // 起始分钟
    pub end_min: i32,              // 结束分钟

    // ===== 审计 =====
    pub created_at: NaiveDateTime, // 创建时间
}

impl ScheduleSlot {
    /// 时段区间视图
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start_min, self.end_min)
    }

    /// 冲突判定: 同教室同星期且区间重叠
    pub fn conflicts_with(&self, other: &ScheduleSlot) -> bool {
        self.room_id == other.room_id
            && self.day_of_week == other.day_of_week
            && self.interval().overlaps(&other.interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_strict() {
        // 部分重叠
        let a = TimeInterval::new(480, 570); // 08:00-09:30
        let b = TimeInterval::new(540, 600); // 09:00-10:00
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_adjacent_intervals_do_not_overlap() {
        // 首尾相接不算冲突（半开区间）
        let a = TimeInterval::new(480, 540); // 08:00-09:00
        let b = TimeInterval::new(540, 600); // 09:00-10:00
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_interval_overlaps() {
        let outer = TimeInterval::new(480, 600); // 08:00-10:00
        let inner = TimeInterval::new(510, 540); // 08:30-09:00
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_hhmm_roundtrip() {
        assert_eq!(format_hhmm(480), "08:00");
        assert_eq!(format_hhmm(1080), "18:00");
        assert_eq!(parse_hhmm("08:00"), Some(480));
        assert_eq!(parse_hhmm("17:30"), Some(1050));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("abc"), None);
    }

    #[test]
    fn test_slot_conflict_requires_same_room_and_day() {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let base = ScheduleSlot {
            schedule_id: "S1".to_string(),
            class_id: "C1".to_string(),
            room_id: "RM-101".to_string(),
            day_of_week: Weekday::Monday,
            start_min: 480,
            end_min: 570,
            created_at: now,
        };

        let mut same_room_same_day = base.clone();
        same_room_same_day.schedule_id = "S2".to_string();
        same_room_same_day.start_min = 540;
        same_room_same_day.end_min = 630;
        assert!(base.conflicts_with(&same_room_same_day));

        let mut other_day = same_room_same_day.clone();
        other_day.day_of_week = Weekday::Tuesday;
        assert!(!base.conflicts_with(&other_day));

        let mut other_room = same_room_same_day.clone();
        other_room.room_id = "RM-102".to_string();
        assert!(!base.conflicts_with(&other_room));
    }
}
