// ==========================================
// 高校排课系统 - 排课参数
// ==========================================
// 来源: config_kv 表 (scope='global')，键缺失时使用代码内缺省值
// ==========================================

use crate::domain::types::{SlotDuration, Weekday};
use serde::{Deserialize, Serialize};

// ==========================================
// GenerationConfig - 排课运行参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    // ===== 候选扫描顺序 =====
    pub candidate_days: Vec<Weekday>, // 候选星期（固定顺序）
    pub earliest_start_hour: i32,     // 最早起始整点（默认 8）
    pub latest_start_hour: i32,       // 最晚起始整点（默认 16）

    // ===== 时段约束 =====
    pub latest_end_min: i32,          // 下课硬上限（分钟，默认 1080 = 18:00）

    // ===== 随机参数 =====
    pub duration_options: Vec<SlotDuration>, // 课时时长候选（默认 60/90 分钟）

    // ===== 班级段 =====
    pub section_label: String,        // 班级段后缀（默认 "A"）
}

impl GenerationConfig {
    /// 候选起始分钟序列（整点步进）
    pub fn candidate_start_minutes(&self) -> Vec<i32> {
        (self.earliest_start_hour..=self.latest_start_hour)
            .map(|h| h * 60)
            .collect()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            candidate_days: Weekday::ALL.to_vec(),
            earliest_start_hour: 8,
            latest_start_hour: 16,
            latest_end_min: 18 * 60,
            duration_options: vec![SlotDuration::Sixty, SlotDuration::Ninety],
            section_label: "A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidate_grid() {
        let config = GenerationConfig::default();
        let starts = config.candidate_start_minutes();

        // 08:00..=16:00 共 9 个整点
        assert_eq!(starts.len(), 9);
        assert_eq!(starts.first(), Some(&480));
        assert_eq!(starts.last(), Some(&960));
        assert_eq!(config.candidate_days.len(), 6);
        assert_eq!(config.latest_end_min, 1080);
    }
}
