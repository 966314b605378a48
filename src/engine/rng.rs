// ==========================================
// 高校排课系统 - 随机数生成器
// ==========================================
// 职责: 教室洗牌与随机选取
// 实现: 带种子的 LCG（不引入外部 crate）
// 约束: 相同种子 + 相同输入 => 相同排课结果（可复现运行）
// ==========================================

use std::time::{SystemTime, UNIX_EPOCH};

// ==========================================
// SlotRng - 排课随机源
// ==========================================
pub struct SlotRng {
    state: u64,
}

impl SlotRng {
    /// 从显式种子构造（可复现运行与测试用）
    pub fn from_seed(seed: u64) -> Self {
        // 种子为 0 时 LCG 初期输出质量差，混入固定常数
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// 从系统时钟构造（默认运行）
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5DEE_CE66);
        Self::from_seed(nanos)
    }

    /// 下一个 u32
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) as u32
    }

    /// [0, bound) 内的下一个 usize
    ///
    /// # 参数
    /// - bound: 上界（不含）；bound 为 0 时返回 0
    pub fn next_usize(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next_u32() as usize) % bound
    }

    /// 从切片随机选取一个元素
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_usize(items.len());
        items.get(idx)
    }

    /// Fisher-Yates 洗牌
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        if items.len() < 2 {
            return;
        }
        for i in (1..items.len()).rev() {
            let j = self.next_usize(i + 1);
            items.swap(i, j);
        }
    }
}
