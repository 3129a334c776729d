// ==========================================
// 厂区温度风险引擎 - 表结构迁移守卫
// ==========================================
// 职责: 确保 factories 表存在 temperature_risk 列
// 约束: 幂等；每次批处理前调用；失败即终止整个批处理
// ==========================================

use crate::db::{FACILITY_TABLE, RISK_COLUMN};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;

/// 读取 factories 表的列名
fn facility_columns(conn: &Connection) -> RepositoryResult<Vec<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", FACILITY_TABLE))
        .map_err(|e| RepositoryError::SchemaMigration(e.to_string()))?;

    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(|e| RepositoryError::SchemaMigration(e.to_string()))?;

    Ok(columns)
}

/// 确保 temperature_risk 列存在
///
/// # 返回
/// - Ok(true): 本次新增了该列
/// - Ok(false): 列已存在，未做任何变更
/// - Err(SchemaMigration): 表不存在或 ALTER 失败
pub fn ensure_risk_column(conn: &Connection) -> RepositoryResult<bool> {
    let columns = facility_columns(conn)?;

    // PRAGMA table_info 对不存在的表返回空结果
    if columns.is_empty() {
        return Err(RepositoryError::SchemaMigration(format!(
            "表 {} 不存在",
            FACILITY_TABLE
        )));
    }

    if columns.iter().any(|c| c == RISK_COLUMN) {
        return Ok(false);
    }

    tracing::info!("补齐缺失列 '{}'...", RISK_COLUMN);
    conn.execute(
        &format!(
            "ALTER TABLE {} ADD COLUMN {} TEXT",
            FACILITY_TABLE, RISK_COLUMN
        ),
        [],
    )
    .map_err(|e| RepositoryError::SchemaMigration(e.to_string()))?;
    tracing::info!("列 '{}' 已添加", RISK_COLUMN);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    #[test]
    fn test_adds_column_once() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        assert!(ensure_risk_column(&conn).unwrap());
        assert!(!ensure_risk_column(&conn).unwrap());

        let columns = facility_columns(&conn).unwrap();
        assert_eq!(columns.iter().filter(|c| *c == RISK_COLUMN).count(), 1);
    }

    #[test]
    fn test_missing_table_is_schema_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = ensure_risk_column(&conn).unwrap_err();
        assert!(matches!(err, RepositoryError::SchemaMigration(_)));
    }
}
