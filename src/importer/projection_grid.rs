// ==========================================
// 厂区温度风险引擎 - 温度投影网格数据集
// ==========================================
// 职责: 从 CSV 加载“最暖季平均气温”投影网格，按最近网格点查询
// 格式: latitude,longitude,timeframe,temperature（表头必需，列序任意）
// 说明: temperature 为空表示该网格点该时段无数据
// ==========================================

use crate::domain::facility::{is_valid_latitude, is_valid_longitude};
use crate::domain::{TemperatureProjections, Timeframe};
use crate::engine::projection::TemperatureProjectionProvider;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 默认网格容差（度）：查询点与最近网格点的经纬度差均不超过该值才算命中
pub const DEFAULT_GRID_TOLERANCE_DEG: f64 = 0.5;

const REQUIRED_COLUMNS: [&str; 4] = ["latitude", "longitude", "timeframe", "temperature"];

// 一个网格点及其四个时段的投影；同一厂区的所有时段都从同一个网格点读取
#[derive(Debug, Clone, Copy)]
struct GridCell {
    latitude: f64,
    longitude: f64,
    projections: TemperatureProjections,
}

impl GridCell {
    /// 与查询点的经纬度差（经度按 ±180° 环绕取短边）
    fn offset(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let d_lat = (self.latitude - latitude).abs();
        let d_lon = (self.longitude - longitude).abs() % 360.0;
        (d_lat, d_lon.min(360.0 - d_lon))
    }
}

// ==========================================
// GridProjectionProvider - 网格投影提供者
// ==========================================
#[derive(Debug, Clone)]
pub struct GridProjectionProvider {
    cells: Vec<GridCell>,
    tolerance_deg: f64,
}

impl GridProjectionProvider {
    /// 空数据集（所有查询均返回 no-data）
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            tolerance_deg: DEFAULT_GRID_TOLERANCE_DEG,
        }
    }

    /// 从 CSV 文件加载
    pub fn from_csv_path(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let provider = Self::from_reader(file)?;
        tracing::info!(
            "温度投影网格加载完成: {} ({} 个网格点)",
            path.display(),
            provider.cell_count()
        );
        Ok(provider)
    }

    /// 从任意 CSV 读取源加载
    ///
    /// 同一网格点同一时段出现多行时，以最后一行为准
    pub fn from_reader<R: Read>(reader: R) -> ImportResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // 表头 -> 列序号
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
        };
        let [lat_idx, lon_idx, tf_idx, temp_idx] = [
            column(REQUIRED_COLUMNS[0])?,
            column(REQUIRED_COLUMNS[1])?,
            column(REQUIRED_COLUMNS[2])?,
            column(REQUIRED_COLUMNS[3])?,
        ];

        let mut cells: Vec<GridCell> = Vec::new();
        // (纬度, 经度) 位模式 -> cells 下标
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // 数据行号（表头为第 1 行）
            let row = row_idx + 2;
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            let latitude = parse_number(cell(&record, lat_idx), row, "latitude")?;
            if !is_valid_latitude(latitude) {
                return Err(ImportError::ValueRangeError {
                    row,
                    field: "latitude".to_string(),
                    value: latitude,
                    min: -90.0,
                    max: 90.0,
                });
            }

            let longitude = parse_number(cell(&record, lon_idx), row, "longitude")?;
            if !is_valid_longitude(longitude) {
                return Err(ImportError::ValueRangeError {
                    row,
                    field: "longitude".to_string(),
                    value: longitude,
                    min: -180.0,
                    max: 180.0,
                });
            }

            let timeframe = Timeframe::from_label(cell(&record, tf_idx)).ok_or_else(|| {
                ImportError::TypeConversionError {
                    row,
                    field: "timeframe".to_string(),
                    message: format!("未知时段 '{}'", cell(&record, tf_idx)),
                }
            })?;

            let raw_temp = cell(&record, temp_idx);
            let temperature = if raw_temp.is_empty() {
                None
            } else {
                Some(parse_number(raw_temp, row, "temperature")?)
            };

            // -0.0 与 0.0 视为同一网格点
            let key = ((latitude + 0.0).to_bits(), (longitude + 0.0).to_bits());
            let slot = *index.entry(key).or_insert_with(|| {
                cells.push(GridCell {
                    latitude,
                    longitude,
                    projections: TemperatureProjections::default(),
                });
                cells.len() - 1
            });
            cells[slot].projections.set(timeframe, temperature);
        }

        Ok(Self {
            cells,
            tolerance_deg: DEFAULT_GRID_TOLERANCE_DEG,
        })
    }

    /// 设置网格容差（度）
    pub fn with_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = tolerance_deg.abs();
        self
    }

    /// 网格点数量
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// 查询点对应的网格点四时段投影
    ///
    /// 在所有网格点中取容差内最近的一个，不区分时段；无命中返回 None
    pub fn projections_at(&self, latitude: f64, longitude: f64) -> Option<TemperatureProjections> {
        self.cells
            .iter()
            .map(|c| (c, c.offset(latitude, longitude)))
            .filter(|(_, (d_lat, d_lon))| {
                *d_lat <= self.tolerance_deg && *d_lon <= self.tolerance_deg
            })
            .min_by(|(_, a), (_, b)| {
                let da = a.0.powi(2) + a.1.powi(2);
                let db = b.0.powi(2) + b.1.powi(2);
                da.total_cmp(&db)
            })
            .map(|(c, _)| c.projections)
    }

    /// 单时段查询
    ///
    /// 超出容差或该网格点该时段无数据时返回 None
    pub fn lookup(&self, latitude: f64, longitude: f64, timeframe: Timeframe) -> Option<f64> {
        self.projections_at(latitude, longitude)?.get(timeframe)
    }
}

#[async_trait]
impl TemperatureProjectionProvider for GridProjectionProvider {
    async fn project(&self, latitude: f64, longitude: f64, timeframe: Timeframe) -> Option<f64> {
        self.lookup(latitude, longitude, timeframe)
    }
}

fn cell(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_number(raw: &str, row: usize, field: &str) -> ImportResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("无法解析数值 '{}'", raw),
        })
}
