// ==========================================
// 厂区温度风险引擎 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少外部写入并发时的偶发 busy 错误
// - 提供 factories / risk_batch_log 基础建表（不含 temperature_risk 列）
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 厂区表名
pub const FACILITY_TABLE: &str = "factories";

/// 温度风险列名（由 Schema Migration Guard 补齐）
pub const RISK_COLUMN: &str = "temperature_risk";

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化基础表结构（幂等）
///
/// 说明：
/// - factories 表按历史库结构创建，不含 temperature_risk 列；
///   该列统一由 `repository::schema_guard::ensure_risk_column` 补齐
/// - risk_batch_log 记录每次批处理的汇总信息
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS factories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            factory_name TEXT NOT NULL,
            address TEXT NOT NULL,
            country TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            yearly_revenue REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS risk_batch_log (
            run_id TEXT PRIMARY KEY,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            facility_count INTEGER NOT NULL,
            chunk_count INTEGER NOT NULL,
            failed_chunk_count INTEGER NOT NULL,
            rows_updated INTEGER NOT NULL,
            failed_chunks TEXT NOT NULL DEFAULT '[]'
        );
        "#,
    )?;
    Ok(())
}
