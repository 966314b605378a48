// ==========================================
// 高校排课系统 - 时段搜索引擎
// ==========================================
// 职责: 冲突感知的首次适配 (first-fit) 时段搜索
// 输入: 目标教室的已排时段 + 随机时长 + 排课参数
// 输出: 第一个无冲突候选 (星期, 区间)，或候选耗尽
// 红线: Engine 不拼 SQL, 所有规则必须输出 reason
// ==========================================

use crate::config::GenerationConfig;
use crate::domain::schedule::{CandidateSlot, ScheduleSlot, TimeInterval};
use crate::domain::types::SlotDuration;
use tracing::instrument;

// ==========================================
// SlotSearchEngine - 时段搜索引擎
// ==========================================
pub struct SlotSearchEngine {
    // 无状态引擎，不需要注入依赖
}

/// 单次搜索结果
#[derive(Debug, Clone)]
pub struct SlotSearchResult {
    pub chosen: Option<CandidateSlot>, // 首个无冲突候选
    pub candidates_examined: usize,    // 实际检查的候选数（跳过越界候选不计）
}

impl SlotSearchEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 首次适配搜索
    ///
    /// 扫描顺序固定: candidate_days 顺序 × 起始整点升序。
    /// 对每个候选区间 [start, start+duration):
    /// 1) 结束时间超过 latest_end_min 的候选直接跳过
    /// 2) 与该教室同星期任一已排区间重叠则继续扫描
    /// 3) 第一个无冲突候选即为结果（不做均衡优化）
    ///
    /// # 参数
    /// - `existing`: 目标教室的全部已排时段（含本次运行已落位的）
    /// - `duration`: 本次随机选定的课时时长
    /// - `config`: 排课参数
    ///
    /// # 返回
    /// 搜索结果（chosen 为 None 表示候选耗尽）
    #[instrument(skip(self, existing, config), fields(
        existing_count = existing.len(),
        duration_min = duration.minutes()
    ))]
    pub fn find_first_fit(
        &self,
        existing: &[ScheduleSlot],
        duration: SlotDuration,
        config: &GenerationConfig,
    ) -> SlotSearchResult {
        let mut candidates_examined = 0;

        for day in &config.candidate_days {
            for start_min in config.candidate_start_minutes() {
                let interval = TimeInterval::from_start_and_duration(start_min, duration.minutes());

                // 下课硬上限: 超过 latest_end_min 的候选不参与检查
                if interval.end_min > config.latest_end_min {
                    continue;
                }

                candidates_examined += 1;

                let conflict = existing
                    .iter()
                    .any(|slot| slot.day_of_week == *day && slot.interval().overlaps(&interval));

                if !conflict {
                    return SlotSearchResult {
                        chosen: Some(CandidateSlot {
                            day: *day,
                            interval,
                        }),
                        candidates_examined,
                    };
                }
            }
        }

        // 候选耗尽: 该科目保持未排课，由上层记告警
        SlotSearchResult {
            chosen: None,
            candidates_examined,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for SlotSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
