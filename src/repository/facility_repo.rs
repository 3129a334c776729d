// ==========================================
// 厂区温度风险引擎 - 厂区数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{BatchRunSummary, Facility, FailedChunk, NewFacility, RiskCategory, RiskUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::facility_store::FacilityStore;
use crate::repository::schema_guard;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const FACILITY_COLUMNS: &str = "id, factory_name, address, country, latitude, longitude, yearly_revenue, temperature_risk";

// ==========================================
// FacilityRepository - 厂区仓储
// ==========================================
/// 厂区仓储
/// 职责: 管理 factories 表读写与 risk_batch_log 记录
pub struct FacilityRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FacilityRepository {
    /// 创建新的 FacilityRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 ID 查询厂区
    ///
    /// # 返回
    /// - Ok(Some(Facility)): 找到
    /// - Ok(None): 不存在
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Facility>> {
        let conn = self.get_conn()?;
        let facility = conn
            .query_row(
                &format!("SELECT {} FROM factories WHERE id = ?1", FACILITY_COLUMNS),
                params![id],
                map_facility_row,
            )
            .optional()?;
        Ok(facility)
    }

    /// 按名称子串查询（大小写不敏感）
    pub fn search_by_name(&self, query: &str) -> RepositoryResult<Vec<Facility>> {
        let conn = self.get_conn()?;
        let pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM factories WHERE LOWER(factory_name) LIKE ?1 ORDER BY id ASC",
            FACILITY_COLUMNS
        ))?;

        let facilities = stmt
            .query_map(params![pattern], map_facility_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(facilities)
    }

    /// 插入厂区（风险等级在创建时已计算）
    ///
    /// # 返回
    /// - Ok(i64): 存储层分配的 ID
    pub fn insert(&self, facility: &NewFacility, risk: RiskCategory) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO factories (
                factory_name, address, country, latitude, longitude, yearly_revenue, temperature_risk
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                facility.name,
                facility.address,
                facility.country,
                facility.latitude,
                facility.longitude,
                facility.yearly_revenue,
                risk.as_str(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 最近一次批处理记录
    pub fn latest_batch_run(&self) -> RepositoryResult<Option<BatchRunSummary>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT run_id, started_at, finished_at, facility_count, chunk_count,
                       rows_updated, failed_chunks
                FROM risk_batch_log
                ORDER BY started_at DESC
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, DateTime<Utc>>(1)?,
                        row.get::<_, DateTime<Utc>>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, i64>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((
            run_id,
            started_at,
            finished_at,
            facility_count,
            chunk_count,
            rows_updated,
            failed_json,
        )) = row
        else {
            return Ok(None);
        };

        let failed_chunks: Vec<FailedChunk> =
            serde_json::from_str(&failed_json).map_err(|e| RepositoryError::FieldValueError {
                field: "failed_chunks".to_string(),
                message: e.to_string(),
            })?;

        Ok(Some(BatchRunSummary {
            run_id,
            started_at,
            finished_at,
            facility_count: facility_count as usize,
            chunk_count: chunk_count as usize,
            rows_updated: rows_updated as usize,
            failed_chunks,
        }))
    }
}

impl FacilityStore for FacilityRepository {
    fn ensure_risk_column(&self) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        schema_guard::ensure_risk_column(&conn)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Facility>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM factories ORDER BY id ASC",
            FACILITY_COLUMNS
        ))?;

        let facilities = stmt
            .query_map([], map_facility_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(facilities)
    }

    fn update_risk_batch(&self, updates: &[RiskUpdate]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 提前返回时 tx 被 drop，默认回滚
        let mut count = 0;
        {
            let mut stmt =
                tx.prepare("UPDATE factories SET temperature_risk = ?1 WHERE id = ?2")?;
            for update in updates {
                count += stmt.execute(params![update.risk.as_str(), update.id])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    fn record_batch_run(&self, summary: &BatchRunSummary) -> RepositoryResult<()> {
        let failed_json = serde_json::to_string(&summary.failed_chunks)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO risk_batch_log (
                run_id, started_at, finished_at, facility_count, chunk_count,
                failed_chunk_count, rows_updated, failed_chunks
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                summary.run_id,
                summary.started_at,
                summary.finished_at,
                summary.facility_count as i64,
                summary.chunk_count as i64,
                summary.failed_chunk_count() as i64,
                summary.rows_updated as i64,
                failed_json,
            ],
        )?;
        Ok(())
    }
}

/// factories 行映射
///
/// 未识别的 temperature_risk 字符串按“未计算”处理
fn map_facility_row(row: &Row<'_>) -> rusqlite::Result<Facility> {
    let risk: Option<String> = row.get(7)?;
    Ok(Facility {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        country: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        yearly_revenue: row.get(6)?,
        temperature_risk: risk.as_deref().and_then(RiskCategory::parse),
    })
}
