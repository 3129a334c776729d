// ==========================================
// 厂区温度风险引擎 - 领域层
// ==========================================
// 职责: 实体与值类型定义，不含 I/O
// ==========================================

pub mod batch;
pub mod climate;
pub mod facility;
pub mod types;

// 重导出核心类型
pub use batch::{BatchRunSummary, FailedChunk};
pub use climate::{ClimateDescriptor, RiskAssessment, TemperatureProjections};
pub use facility::{Facility, NewFacility, RiskUpdate};
pub use types::{ClimateZone, RiskCategory, Timeframe};
