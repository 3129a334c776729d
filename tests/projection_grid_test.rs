// ==========================================
// GridProjectionProvider 集成测试
// ==========================================
// 测试目标: CSV 数据集加载 + 与分级器、批处理的端到端联动
// ==========================================

mod test_helpers;

use climadex_risk::domain::{RiskCategory, Timeframe};
use climadex_risk::engine::{BatchUpdateOrchestrator, RiskClassifier};
use climadex_risk::importer::{GridProjectionProvider, ImportError};
use climadex_risk::repository::{FacilityRepository, FacilityStore};
use std::io::Write;
use std::sync::Arc;
use tempfile::Builder;
use test_helpers::{create_test_db, open_test_connection, read_risks, seed_facilities};

const GRID: &str = "\
latitude,longitude,timeframe,temperature
45.0,2.5,2030,20.0
45.0,2.5,2050,21.0
45.0,2.5,2070,21.5
45.0,2.5,2090,21.5
25.0,2.5,2030,31.0
25.0,2.5,2050,33.0
25.0,2.5,2070,34.0
25.0,2.5,2090,36.0
60.0,2.5,2050,18.0
";

fn write_grid(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_load_from_csv_file_and_classify() {
    let grid_file = write_grid(GRID, ".csv");
    let provider = GridProjectionProvider::from_csv_path(grid_file.path()).unwrap();
    assert_eq!(provider.cell_count(), 3);

    let classifier = RiskClassifier::new(Arc::new(provider));

    // 温带，avg 21，delta 1 -> Low
    assert_eq!(classifier.classify(45.2, 2.4).await, RiskCategory::Low);
    // 沙漠，avg 33.5，delta 2.5 -> High
    assert_eq!(classifier.classify(25.1, 2.6).await, RiskCategory::High);
    // 只有 2050 有数据，缺少基准 -> Unknown
    assert_eq!(classifier.classify(60.0, 2.5).await, RiskCategory::Unknown);
    // 网格外 -> Unknown
    assert_eq!(classifier.classify(-33.0, 151.0).await, RiskCategory::Unknown);
}

#[test]
fn test_missing_file_is_reported() {
    let err = GridProjectionProvider::from_csv_path(std::path::Path::new("/nonexistent/grid.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_non_csv_extension_is_rejected() {
    let grid_file = write_grid(GRID, ".xlsx");
    let err = GridProjectionProvider::from_csv_path(grid_file.path()).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}

#[test]
fn test_upper_case_csv_extension_is_accepted() {
    let grid_file = write_grid(GRID, ".CSV");
    let provider = GridProjectionProvider::from_csv_path(grid_file.path()).unwrap();
    assert_eq!(provider.cell_count(), 3);
}

#[tokio::test]
async fn test_series_comes_from_a_single_grid_cell() {
    // 45.0 只有基准时段，45.4 有完整序列（30/31/31/31）
    let grid = "\
latitude,longitude,timeframe,temperature
45.0,2.0,2030,10.0
45.4,2.0,2030,30.0
45.4,2.0,2050,31.0
45.4,2.0,2070,31.0
45.4,2.0,2090,31.0
";
    let provider = GridProjectionProvider::from_reader(grid.as_bytes()).unwrap();
    let classifier = RiskClassifier::new(Arc::new(provider));

    // 最近网格点为 45.0：未来时段不能借用 45.4 的数值
    let near_sparse = classifier.assess(45.1, 2.0).await;
    assert_eq!(near_sparse.projections.baseline(), Some(10.0));
    assert_eq!(near_sparse.projections.present_count(), 1);
    assert_eq!(near_sparse.risk, RiskCategory::Low);

    // 最近网格点为 45.4：avg 30.75，delta 0.75，温带 -> Low
    let near_full = classifier.assess(45.3, 2.0).await;
    assert_eq!(near_full.avg_temp, Some(30.75));
    assert_eq!(near_full.risk, RiskCategory::Low);
}

#[test]
fn test_unparsable_temperature_reports_row() {
    let grid_file = write_grid(
        "latitude,longitude,timeframe,temperature\n45,2,2030,20\n45,2,2050,warm\n",
        ".csv",
    );
    let err = GridProjectionProvider::from_csv_path(grid_file.path()).unwrap_err();
    assert!(matches!(
        err,
        ImportError::TypeConversionError { row: 3, ref field, .. } if field == "temperature"
    ));
}

#[test]
fn test_column_order_is_free() {
    let provider = GridProjectionProvider::from_reader(
        "timeframe,temperature,longitude,latitude\n2030,19.5,2.5,45.0\n".as_bytes(),
    )
    .unwrap();
    assert_eq!(provider.lookup(45.0, 2.5, Timeframe::Y2030), Some(19.5));
}

#[tokio::test]
async fn test_batch_with_grid_dataset() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    // 奇数行在温带网格点，偶数行在沙漠网格点
    seed_facilities(&conn, 6, |i| if i % 2 == 0 { 45.0 } else { 25.0 }).unwrap();

    let grid_file = write_grid(GRID, ".csv");
    let provider = GridProjectionProvider::from_csv_path(grid_file.path()).unwrap();
    let store: Arc<dyn FacilityStore> = Arc::new(FacilityRepository::new(&db_path).unwrap());

    let summary = BatchUpdateOrchestrator::new(store, RiskClassifier::new(Arc::new(provider)))
        .run_batch()
        .await
        .unwrap();
    assert_eq!(summary.rows_updated, 6);

    let risks = read_risks(&conn).unwrap();
    for (id, risk) in risks {
        let expected = if id % 2 == 1 { "Low" } else { "High" };
        assert_eq!(risk.as_deref(), Some(expected), "facility {}", id);
    }
}
