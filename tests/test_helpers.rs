// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、厂区种子数据、桩投影提供者
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use climadex_risk::db::{init_schema, open_sqlite_connection};
use climadex_risk::domain::Timeframe;
use climadex_risk::engine::TemperatureProjectionProvider;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化基础表（factories 不含 temperature_risk 列）
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 批量插入厂区（单事务），id 从 1 开始连续分配
///
/// 纬度由 `latitude_of(i)` 给出，i 从 0 开始
pub fn seed_facilities<F>(conn: &Connection, count: usize, latitude_of: F) -> Result<(), Box<dyn Error>>
where
    F: Fn(usize) -> f64,
{
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO factories (factory_name, address, country, latitude, longitude, yearly_revenue)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for i in 0..count {
            stmt.execute(params![
                format!("Factory {:04}", i + 1),
                format!("{} Industrial Road", i + 1),
                "France",
                latitude_of(i),
                2.35,
                1_000_000.0,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// 读取全部厂区的 (id, temperature_risk)
pub fn read_risks(conn: &Connection) -> Result<Vec<(i64, Option<String>)>, Box<dyn Error>> {
    let mut stmt = conn.prepare("SELECT id, temperature_risk FROM factories ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// 安装触发器：更新指定 id 的风险列时中止（模拟批次写入失败）
pub fn inject_update_failure(conn: &Connection, facility_id: i64) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(&format!(
        "CREATE TRIGGER inject_failure_{id} BEFORE UPDATE OF temperature_risk ON factories
         WHEN NEW.id = {id}
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
        id = facility_id
    ))?;
    Ok(())
}

// ==========================================
// 桩投影提供者
// ==========================================

/// 对任意坐标返回固定的四个时段投影
pub struct StubProvider {
    values: [Option<f64>; 4],
}

impl StubProvider {
    pub fn new(values: [Option<f64>; 4]) -> Self {
        Self { values }
    }

    /// 所有时段均无数据
    pub fn no_data() -> Self {
        Self::new([None; 4])
    }
}

#[async_trait]
impl TemperatureProjectionProvider for StubProvider {
    async fn project(&self, _latitude: f64, _longitude: f64, timeframe: Timeframe) -> Option<f64> {
        self.values[timeframe.index()]
    }
}

/// 记录调用顺序的提供者（返回固定值）
pub struct RecordingProvider {
    inner: StubProvider,
    pub calls: Mutex<Vec<(f64, f64, Timeframe)>>,
}

impl RecordingProvider {
    pub fn new(values: [Option<f64>; 4]) -> Self {
        Self {
            inner: StubProvider::new(values),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn timeframes(&self) -> Vec<Timeframe> {
        self.calls.lock().unwrap().iter().map(|c| c.2).collect()
    }
}

#[async_trait]
impl TemperatureProjectionProvider for RecordingProvider {
    async fn project(&self, latitude: f64, longitude: f64, timeframe: Timeframe) -> Option<f64> {
        self.calls.lock().unwrap().push((latitude, longitude, timeframe));
        self.inner.project(latitude, longitude, timeframe).await
    }
}
