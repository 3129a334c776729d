// ==========================================
// 厂区温度风险引擎 - 引擎层
// ==========================================
// 职责: 实现分级规则与批处理编排,不拼 SQL
// 红线: Engine 只通过 FacilityStore / TemperatureProjectionProvider 访问外部
// ==========================================

pub mod batch;
pub mod climate_zone;
pub mod error;
pub mod projection;
pub mod risk;

// 重导出核心引擎
pub use batch::BatchUpdateOrchestrator;
pub use climate_zone::ClimateZoneClassifier;
pub use error::{EngineError, EngineResult};
pub use projection::TemperatureProjectionProvider;
pub use risk::{
    RiskClassifier, AVG_TEMP_HIGH_THRESHOLD, HEAT_PRONE_ZONE_THRESHOLD, TEMP_DELTA_RISK_THRESHOLD,
};
