// ==========================================
// 厂区温度风险引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 按未来温度投影为厂区分级气候风险，并批量写回记录库
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 分级规则与批处理编排
pub mod engine;

// 导入层 - 温度投影数据集
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BatchRunSummary, ClimateDescriptor, ClimateZone, Facility, NewFacility, RiskAssessment,
    RiskCategory, TemperatureProjections, Timeframe,
};

// 引擎
pub use engine::{
    BatchUpdateOrchestrator, ClimateZoneClassifier, RiskClassifier, TemperatureProjectionProvider,
};

// API
pub use api::FacilityApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "厂区温度风险引擎";
