// ==========================================
// 高校排课系统 - 运行级事务控制
// ==========================================
// 用途: 排课运行整体包在单个事务内（全有或全无）
// 约束: 各仓储共享同一个连接时才有效
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// 开启运行级事务（立即加写锁，避免批处理中途才发现冲突）
pub fn begin_immediate(conn: &Arc<Mutex<Connection>>) -> RepositoryResult<()> {
    let guard = conn
        .lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))?;
    guard
        .execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))
}

/// 提交运行级事务
pub fn commit(conn: &Arc<Mutex<Connection>>) -> RepositoryResult<()> {
    let guard = conn
        .lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))?;
    guard
        .execute_batch("COMMIT")
        .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))
}

/// 回滚运行级事务
///
/// 说明: 回滚本身失败时仅记录日志（原错误优先向上传播）
pub fn rollback(conn: &Arc<Mutex<Connection>>) {
    let guard = match conn.lock() {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("回滚失败: 连接锁获取失败: {}", e);
            return;
        }
    };
    if let Err(e) = guard.execute_batch("ROLLBACK") {
        tracing::error!("回滚失败: {}", e);
    }
}
