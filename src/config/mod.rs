// ==========================================
// 厂区温度风险引擎 - 配置层
// ==========================================
// 职责: 运行配置加载（环境变量 + 默认值）
// ==========================================

pub mod engine_config;

// 重导出核心配置
pub use engine_config::{
    ensure_db_parent_dir, env_keys, get_default_db_path, EngineConfig, LogFormat,
    DEFAULT_BATCH_SIZE,
};
