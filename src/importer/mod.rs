// ==========================================
// 厂区温度风险引擎 - 导入层
// ==========================================
// 职责: 外部数据导入（温度投影网格数据集）
// 支持: CSV
// ==========================================

pub mod error;
pub mod projection_grid;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use projection_grid::{GridProjectionProvider, DEFAULT_GRID_TOLERANCE_DEG};
