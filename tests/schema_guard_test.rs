// ==========================================
// Schema Migration Guard 集成测试
// ==========================================
// 测试目标: temperature_risk 列幂等补齐
// ==========================================

mod test_helpers;

use climadex_risk::repository::{ensure_risk_column, FacilityRepository, FacilityStore};
use rusqlite::Connection;
use test_helpers::{create_test_db, open_test_connection, read_risks, seed_facilities};

fn risk_column_count(conn: &Connection) -> usize {
    let mut stmt = conn.prepare("PRAGMA table_info(factories)").unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|name| name == "temperature_risk")
        .count()
}

#[test]
fn test_guard_is_idempotent() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    assert_eq!(risk_column_count(&conn), 0);

    assert!(ensure_risk_column(&conn).unwrap());
    assert!(!ensure_risk_column(&conn).unwrap());
    assert_eq!(risk_column_count(&conn), 1);
}

#[test]
fn test_guard_through_store_across_connections() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    let first = FacilityRepository::new(&db_path).unwrap();
    assert!(first.ensure_risk_column().unwrap());
    drop(first);

    // 新连接上再次调用不会重复建列
    let second = FacilityRepository::new(&db_path).unwrap();
    assert!(!second.ensure_risk_column().unwrap());

    let conn = open_test_connection(&db_path).unwrap();
    assert_eq!(risk_column_count(&conn), 1);
}

#[test]
fn test_existing_rows_start_unset() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    seed_facilities(&conn, 5, |_| 45.0).unwrap();

    ensure_risk_column(&conn).unwrap();

    let risks = read_risks(&conn).unwrap();
    assert_eq!(risks.len(), 5);
    assert!(risks.iter().all(|(_, r)| r.is_none()));

    let repo = FacilityRepository::new(&db_path).unwrap();
    assert!(repo.find_all().unwrap().iter().all(|f| f.temperature_risk.is_none()));
}
