// ==========================================
// 厂区温度风险引擎 - 运行配置
// ==========================================
// 职责: 读取数据库路径、投影数据集、批大小、日志格式
// 来源: 环境变量 > 默认值
// ==========================================

use std::path::{Path, PathBuf};

/// 默认批大小（每个事务更新的厂区数量）
pub const DEFAULT_BATCH_SIZE: usize = 1000;

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    /// 数据库文件路径
    pub const DB_PATH: &str = "CLIMADEX_DB_PATH";
    /// 温度投影网格 CSV 路径
    pub const PROJECTION_CSV: &str = "CLIMADEX_PROJECTION_CSV";
    /// 批大小
    pub const BATCH_SIZE: &str = "CLIMADEX_BATCH_SIZE";
    /// 日志格式: text / json
    pub const LOG_FORMAT: &str = "CLIMADEX_LOG_FORMAT";
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// 解析日志格式（大小写不敏感，未知值回退为 Text）
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    /// 从环境变量读取日志格式
    ///
    /// 日志系统须先于其余配置初始化，否则配置告警会丢失
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取日志格式（未设置时为 Text）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(env_keys::LOG_FORMAT)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

// ==========================================
// EngineConfig - 引擎运行配置
// ==========================================
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 数据库文件路径
    pub db_path: String,
    /// 温度投影网格 CSV（None 表示无数据集，所有投影均为 no-data）
    pub projection_csv: Option<PathBuf>,
    /// 批大小（> 0）
    pub batch_size: usize,
    /// 日志格式
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            projection_csv: None,
            batch_size: DEFAULT_BATCH_SIZE,
            log_format: LogFormat::Text,
        }
    }
}

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 说明：
    /// - 未设置的键使用默认值
    /// - CLIMADEX_BATCH_SIZE 非法（非数字或为 0）时回退为默认值并告警
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置（便于测试注入）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = non_empty(env_keys::DB_PATH).unwrap_or_else(get_default_db_path);
        let projection_csv = non_empty(env_keys::PROJECTION_CSV).map(PathBuf::from);

        let batch_size = match non_empty(env_keys::BATCH_SIZE) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        "{} 配置非法({}), 使用默认批大小 {}",
                        env_keys::BATCH_SIZE,
                        raw,
                        DEFAULT_BATCH_SIZE
                    );
                    DEFAULT_BATCH_SIZE
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let log_format = LogFormat::from_lookup(&lookup);

        Self {
            db_path,
            projection_csv,
            batch_size,
            log_format,
        }
    }
}

/// 获取默认数据库路径
///
/// 用户数据目录下的 climadex/db.sqlite3；无数据目录时为当前目录
/// 只计算路径，不读环境变量、不创建目录
pub fn get_default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("climadex").join("db.sqlite3"))
        .unwrap_or_else(|| PathBuf::from("./db.sqlite3"))
        .to_string_lossy()
        .to_string()
}

/// 确保数据库文件所在目录存在
pub fn ensure_db_parent_dir(db_path: &str) -> std::io::Result<()> {
    match Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
