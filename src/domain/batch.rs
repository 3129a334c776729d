// ==========================================
// 厂区温度风险引擎 - 批处理运行记录
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// FailedChunk - 回滚的批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedChunk {
    pub chunk_index: usize, // 批次序号（从 0 开始）
    pub first_id: i64,      // 批次内首个厂区 ID
    pub last_id: i64,       // 批次内末个厂区 ID
    pub size: usize,        // 批次厂区数
    pub error: String,      // 失败原因
}

// ==========================================
// BatchRunSummary - 单次批处理汇总
// ==========================================
// 持久化到 risk_batch_log；对外接口只暴露整体成功/失败
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRunSummary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub facility_count: usize,
    pub chunk_count: usize,
    pub rows_updated: usize,
    pub failed_chunks: Vec<FailedChunk>,
}

impl BatchRunSummary {
    /// 回滚的批次数
    pub fn failed_chunk_count(&self) -> usize {
        self.failed_chunks.len()
    }

    /// 是否所有批次均已提交
    pub fn is_fully_applied(&self) -> bool {
        self.failed_chunks.is_empty()
    }
}
