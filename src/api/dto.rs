// ==========================================
// 厂区温度风险引擎 - API 数据传输对象
// ==========================================
// 序列化格式: camelCase（与前端约定一致）
// ==========================================

use crate::domain::{Facility, RiskCategory, TemperatureProjections};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 新建厂区请求（字段均可缺失，由 validator 统一校验）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
    pub factory_name: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub yearly_revenue: Option<f64>,
}

/// 厂区视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityView {
    pub id: i64,
    pub factory_name: String,
    pub address: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub yearly_revenue: f64,
    pub temperature_risk: Option<RiskCategory>,
}

impl From<Facility> for FacilityView {
    fn from(facility: Facility) -> Self {
        Self {
            id: facility.id,
            factory_name: facility.name,
            address: facility.address,
            country: facility.country,
            latitude: facility.latitude,
            longitude: facility.longitude,
            yearly_revenue: facility.yearly_revenue,
            temperature_risk: facility.temperature_risk,
        }
    }
}

/// 新建厂区响应：厂区 + 创建时计算的投影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityResponse {
    pub facility: FacilityView,
    pub temperatures: BTreeMap<String, Option<f64>>,
}

/// 按时段标签展开投影（"2030" -> 值）
pub fn temperatures_by_label(projections: &TemperatureProjections) -> BTreeMap<String, Option<f64>> {
    projections
        .by_label()
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect()
}
