// ==========================================
// 高校排课系统 - 排课冲突审计引擎
// ==========================================
// 职责: 对已落库时段做全量教室/星期重叠检查
// 用途: 排课不变量校验（同教室同星期区间互不重叠）
// 红线: Engine 不拼 SQL, 所有违规必须输出明细
// ==========================================

use crate::domain::schedule::{ScheduleSlot, TimeInterval};
use crate::domain::types::Weekday;
use std::collections::HashMap;
use tracing::instrument;

// ==========================================
// RoomDayConflict - 单组冲突明细
// ==========================================
#[derive(Debug, Clone)]
pub struct RoomDayConflict {
    pub room_id: String,               // 冲突教室
    pub day: Weekday,                  // 冲突星期
    pub first_schedule_id: String,     // 时段A
    pub first_interval: TimeInterval,  // 时段A区间
    pub second_schedule_id: String,    // 时段B
    pub second_interval: TimeInterval, // 时段B区间
}

// ==========================================
// ConflictAuditReport - 审计报告
// ==========================================
#[derive(Debug, Clone)]
pub struct ConflictAuditReport {
    pub slots_checked: usize,             // 检查的时段总数
    pub violations: Vec<RoomDayConflict>, // 冲突明细
}

impl ConflictAuditReport {
    /// 审计是否通过
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

// ==========================================
// ConflictAuditor - 冲突审计引擎
// ==========================================
pub struct ConflictAuditor {
    // 无状态引擎，不需要注入依赖
}

impl ConflictAuditor {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 全量冲突审计
    ///
    /// 按 (教室, 星期) 分组，组内按起始时间排序后两两比对。
    ///
    /// # 参数
    /// - `slots`: 全部已落库时段
    ///
    /// # 返回
    /// 审计报告（violations 为空表示不变量成立）
    #[instrument(skip(self, slots), fields(slots_count = slots.len()))]
    pub fn audit(&self, slots: &[ScheduleSlot]) -> ConflictAuditReport {
        let mut groups: HashMap<(&str, Weekday), Vec<&ScheduleSlot>> = HashMap::new();

        for slot in slots {
            groups
                .entry((slot.room_id.as_str(), slot.day_of_week))
                .or_default()
                .push(slot);
        }

        let mut violations = Vec::new();

        for ((room_id, day), mut group) in groups {
            group.sort_by_key(|s| (s.start_min, s.end_min));

            // 组内已按起始排序: 对每个时段只需向后比对到首个不再重叠的起点
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    if group[j].start_min >= group[i].end_min {
                        break;
                    }
                    if group[i].interval().overlaps(&group[j].interval()) {
                        violations.push(RoomDayConflict {
                            room_id: room_id.to_string(),
                            day,
                            first_schedule_id: group[i].schedule_id.clone(),
                            first_interval: group[i].interval(),
                            second_schedule_id: group[j].schedule_id.clone(),
                            second_interval: group[j].interval(),
                        });
                    }
                }
            }
        }

        // 输出顺序稳定，便于比对与测试
        violations.sort_by(|a, b| {
            (a.room_id.as_str(), a.day, a.first_interval.start_min).cmp(&(
                b.room_id.as_str(),
                b.day,
                b.first_interval.start_min,
            ))
        });

        ConflictAuditReport {
            slots_checked: slots.len(),
            violations,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ConflictAuditor {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    /// 创建测试用时段
    fn create_test_slot(
        schedule_id: &str,
        room_id: &str,
        day: Weekday,
        start_min: i32,
        end_min: i32,
    ) -> ScheduleSlot {
        ScheduleSlot {
            schedule_id: schedule_id.to_string(),
            class_id: "CTEST".to_string(),
            room_id: room_id.to_string(),
            day_of_week: day,
            start_min,
            end_min,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 8, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_clean_schedule_passes() {
        // 测试：互不重叠的时段审计通过
        let auditor = ConflictAuditor::new();
        let slots = vec![
            create_test_slot("S1", "RM-101", Weekday::Monday, 480, 540),
            create_test_slot("S2", "RM-101", Weekday::Monday, 540, 630), // 首尾相接
            create_test_slot("S3", "RM-101", Weekday::Tuesday, 480, 540),
            create_test_slot("S4", "RM-102", Weekday::Monday, 480, 540),
        ];

        let report = auditor.audit(&slots);

        assert!(report.is_clean());
        assert_eq!(report.slots_checked, 4);
    }

    #[test]
    fn test_overlap_same_room_same_day_detected() {
        // 测试：同教室同星期的重叠被检出
        let auditor = ConflictAuditor::new();
        let slots = vec![
            create_test_slot("S1", "RM-101", Weekday::Monday, 480, 570),
            create_test_slot("S2", "RM-101", Weekday::Monday, 540, 630),
        ];

        let report = auditor.audit(&slots);

        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.room_id, "RM-101");
        assert_eq!(v.day, Weekday::Monday);
        assert_eq!(v.first_schedule_id, "S1");
        assert_eq!(v.second_schedule_id, "S2");
    }

    #[test]
    fn test_overlap_other_room_not_flagged() {
        // 测试：不同教室的同时段不算冲突
        let auditor = ConflictAuditor::new();
        let slots = vec![
            create_test_slot("S1", "RM-101", Weekday::Monday, 480, 570),
            create_test_slot("S2", "RM-102", Weekday::Monday, 480, 570),
        ];

        let report = auditor.audit(&slots);

        assert!(report.is_clean());
    }

    #[test]
    fn test_multiple_overlaps_all_reported() {
        // 测试：一个长时段覆盖多个短时段时逐对上报
        let auditor = ConflictAuditor::new();
        let slots = vec![
            create_test_slot("S1", "RM-101", Weekday::Friday, 480, 720), // 08:00-12:00
            create_test_slot("S2", "RM-101", Weekday::Friday, 540, 600),
            create_test_slot("S3", "RM-101", Weekday::Friday, 600, 660),
        ];

        let report = auditor.audit(&slots);

        // S1-S2 与 S1-S3 两组冲突（S2-S3 首尾相接不算）
        assert_eq!(report.violations.len(), 2);
    }
}
