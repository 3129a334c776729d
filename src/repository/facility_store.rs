// ==========================================
// 厂区温度风险引擎 - 厂区存储 Trait
// ==========================================
// 职责: 定义批处理引擎所需的数据访问接口（不包含业务逻辑）
// 实现者: FacilityRepository（rusqlite）
// ==========================================

use crate::domain::{BatchRunSummary, Facility, RiskUpdate};
use crate::repository::error::RepositoryResult;

// ==========================================
// FacilityStore Trait
// ==========================================
pub trait FacilityStore: Send + Sync {
    /// 确保 temperature_risk 列存在（幂等）
    ///
    /// # 返回
    /// - Ok(true): 本次新增了该列
    /// - Ok(false): 列已存在
    fn ensure_risk_column(&self) -> RepositoryResult<bool>;

    /// 读取全部厂区（按 id 升序）
    fn find_all(&self) -> RepositoryResult<Vec<Facility>>;

    /// 在单个事务内批量写回风险等级
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数
    /// - Err: 任一更新失败；整个事务回滚，不保留部分写入
    fn update_risk_batch(&self, updates: &[RiskUpdate]) -> RepositoryResult<usize>;

    /// 记录一次批处理的汇总
    fn record_batch_run(&self, summary: &BatchRunSummary) -> RepositoryResult<()>;
}
