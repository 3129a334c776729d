// ==========================================
// 厂区温度风险引擎 - 命令行入口
// ==========================================
// 用法:
//   climadex-risk [db_path]
//
// 执行一次全量温度风险批处理后退出
// ==========================================

use anyhow::Context;
use climadex_risk::config::{ensure_db_parent_dir, EngineConfig, LogFormat};
use climadex_risk::db::{init_schema, open_sqlite_connection};
use climadex_risk::engine::{BatchUpdateOrchestrator, RiskClassifier, TemperatureProjectionProvider};
use climadex_risk::importer::GridProjectionProvider;
use climadex_risk::logging;
use climadex_risk::repository::{FacilityRepository, FacilityStore};
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统（先于配置加载，配置告警才能输出）
    logging::init(LogFormat::from_env());

    let mut config = EngineConfig::from_env();
    if let Some(db_path) = std::env::args()
        .nth(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        config.db_path = db_path;
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", climadex_risk::APP_NAME, climadex_risk::VERSION);
    tracing::info!("==================================================");
    tracing::info!("使用数据库: {}", config.db_path);

    // 温度投影数据集
    let provider: Arc<dyn TemperatureProjectionProvider> = match &config.projection_csv {
        Some(path) => Arc::new(
            GridProjectionProvider::from_csv_path(path)
                .with_context(|| format!("加载温度投影数据集失败: {}", path.display()))?,
        ),
        None => {
            tracing::warn!("未配置温度投影数据集，所有厂区将被分级为 Unknown");
            Arc::new(GridProjectionProvider::empty())
        }
    };

    ensure_db_parent_dir(&config.db_path)
        .with_context(|| format!("创建数据库目录失败: {}", config.db_path))?;
    let conn = open_sqlite_connection(&config.db_path)
        .with_context(|| format!("打开数据库失败: {}", config.db_path))?;
    init_schema(&conn).context("初始化表结构失败")?;
    let store: Arc<dyn FacilityStore> =
        Arc::new(FacilityRepository::from_connection(Arc::new(Mutex::new(conn))));

    let orchestrator = BatchUpdateOrchestrator::new(store, RiskClassifier::new(provider))
        .with_batch_size(config.batch_size);
    let summary = orchestrator
        .run_batch()
        .await
        .context("温度风险批处理失败")?;

    println!(
        "run_id={} facilities={} chunks={} failed_chunks={} rows_updated={}",
        summary.run_id,
        summary.facility_count,
        summary.chunk_count,
        summary.failed_chunk_count(),
        summary.rows_updated
    );
    Ok(())
}
