// ==========================================
// 高校排课系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: Engine 不拼 SQL, 所有规则必须输出 reason
// ==========================================

pub mod auditor;
pub mod error;
pub mod generator;
pub mod repositories;
pub mod rng;
pub mod slot_search;

// 重导出核心引擎
pub use auditor::{ConflictAuditReport, ConflictAuditor, RoomDayConflict};
pub use error::{GenerationError, GenerationResult};
pub use generator::{ClassGenerator, GenerationReport, Placement, SubjectOutcome};
pub use repositories::GenerationRepositories;
pub use rng::SlotRng;
pub use slot_search::{SlotSearchEngine, SlotSearchResult};
