// ==========================================
// 厂区温度风险引擎 - 批量风险更新编排
// ==========================================
// 职责: 全量厂区风险重算并分批写回
// 流程: 结构守卫 -> 全量加载 -> 分批 -> 逐个分级 -> 单批事务提交
// 失败策略: 单批失败只回滚本批，继续处理下一批；不重试
// 并发: 严格串行，批与批、厂区与厂区之间均不并发
// ==========================================

use crate::config::DEFAULT_BATCH_SIZE;
use crate::domain::{BatchRunSummary, Facility, FailedChunk, RiskUpdate};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::risk::RiskClassifier;
use crate::repository::FacilityStore;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// BatchUpdateOrchestrator - 批量更新编排器
// ==========================================
pub struct BatchUpdateOrchestrator {
    store: Arc<dyn FacilityStore>,
    classifier: RiskClassifier,
    batch_size: usize,
}

impl BatchUpdateOrchestrator {
    /// 构造函数（默认批大小 1000）
    pub fn new(store: Arc<dyn FacilityStore>, classifier: RiskClassifier) -> Self {
        Self {
            store,
            classifier,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// 指定批大小（0 按 1 处理）
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// 当前批大小
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 执行一次全量批处理
    ///
    /// # 返回
    /// - Ok(BatchRunSummary): 整体成功（可能包含已回滚的批次）
    /// - Err(EngineError): 结构守卫或全量加载失败，未做任何写入
    pub async fn run_batch(&self) -> EngineResult<BatchRunSummary> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();

        // 1. 结构守卫
        let added = self.store.ensure_risk_column().map_err(|e| {
            tracing::error!("表结构检查失败，批处理终止: {}", e);
            EngineError::Schema(e)
        })?;
        if added {
            tracing::info!("已补齐 temperature_risk 列");
        }

        // 2. 全量加载
        let facilities = self.store.find_all().map_err(EngineError::Load)?;
        if facilities.is_empty() {
            tracing::info!("未找到厂区，批处理结束");
            return Ok(BatchRunSummary {
                run_id,
                started_at,
                finished_at: Utc::now(),
                facility_count: 0,
                chunk_count: 0,
                rows_updated: 0,
                failed_chunks: Vec::new(),
            });
        }
        tracing::info!("共找到 {} 个厂区 (run_id={})", facilities.len(), run_id);

        // 3~4. 分批处理
        let mut rows_updated = 0;
        let mut failed_chunks = Vec::new();
        let chunks: Vec<&[Facility]> = facilities.chunks(self.batch_size).collect();

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let updates = self.classify_chunk(chunk).await;

            match self.store.update_risk_batch(&updates) {
                Ok(count) => {
                    rows_updated += count;
                    tracing::info!(
                        "批次 {}/{} 更新成功: {} 个厂区",
                        chunk_index + 1,
                        chunks.len(),
                        count
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "批次 {}/{} 更新失败，已回滚: {}",
                        chunk_index + 1,
                        chunks.len(),
                        e
                    );
                    failed_chunks.push(FailedChunk {
                        chunk_index,
                        first_id: chunk.first().map(|f| f.id).unwrap_or_default(),
                        last_id: chunk.last().map(|f| f.id).unwrap_or_default(),
                        size: chunk.len(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let summary = BatchRunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            facility_count: facilities.len(),
            chunk_count: chunks.len(),
            rows_updated,
            failed_chunks,
        };

        // 5. 运行记录（尽力而为，不影响整体结果）
        if let Err(e) = self.store.record_batch_run(&summary) {
            tracing::warn!("批处理运行记录写入失败: {}", e);
        }

        tracing::info!(
            "全部厂区处理完成: 更新 {} 行，失败批次 {}/{}",
            summary.rows_updated,
            summary.failed_chunk_count(),
            summary.chunk_count
        );

        Ok(summary)
    }

    /// 批内逐个分级（只调用投影提供者，不访问存储）
    async fn classify_chunk(&self, chunk: &[Facility]) -> Vec<RiskUpdate> {
        let mut updates = Vec::with_capacity(chunk.len());
        for facility in chunk {
            let risk = self
                .classifier
                .classify(facility.latitude, facility.longitude)
                .await;
            tracing::debug!("厂区 {} -> {}", facility.id, risk);
            updates.push(RiskUpdate {
                id: facility.id,
                risk,
            });
        }
        updates
    }
}
