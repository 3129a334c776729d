// ==========================================
// 厂区温度风险引擎 - 厂区领域模型
// ==========================================

use crate::domain::types::RiskCategory;
use serde::{Deserialize, Serialize};

// ==========================================
// Facility - 厂区（持久化实体）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,                                // 存储层分配，不可变
    pub name: String,                           // 厂区名称
    pub address: String,                        // 地址
    pub country: String,                        // 国家
    pub latitude: f64,                          // [-90, 90]
    pub longitude: f64,                         // [-180, 180]
    pub yearly_revenue: f64,                    // 年营收 (>= 0)
    pub temperature_risk: Option<RiskCategory>, // None: 尚未计算
}

// ==========================================
// NewFacility - 待创建厂区（已校验输入）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFacility {
    pub name: String,
    pub address: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub yearly_revenue: f64,
}

// ==========================================
// RiskUpdate - 批处理写回单元
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskUpdate {
    pub id: i64,
    pub risk: RiskCategory,
}

/// 纬度是否合法
pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

/// 经度是否合法
pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_ranges() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(90.1));
        assert!(!is_valid_latitude(f64::NAN));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(180.5));
        assert!(!is_valid_longitude(f64::INFINITY));
    }
}
