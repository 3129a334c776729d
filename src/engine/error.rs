// ==========================================
// 厂区温度风险引擎 - 引擎层错误类型
// ==========================================
// 说明: 只有整批致命错误才上抛；单批次写入失败在批处理内部消化
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 表结构迁移失败（整批终止，不做任何处理）
    #[error("表结构检查失败: {0}")]
    Schema(#[source] RepositoryError),

    /// 厂区加载失败（整批终止）
    #[error("厂区加载失败: {0}")]
    Load(#[source] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
