// ==========================================
// 厂区温度风险引擎 - 气候带近似
// ==========================================
// 职责: 按纬度带近似气候带
// 规则: 纬度带按优先级依次匹配，首个命中即返回；全部不命中归为 Coastal
// ==========================================

use crate::domain::{ClimateDescriptor, ClimateZone};

// ==========================================
// ClimateZoneClassifier - 气候带分类器
// ==========================================
pub struct ClimateZoneClassifier;

impl ClimateZoneClassifier {
    /// 纬度 -> 气候描述
    ///
    /// # 纬度带（严格不等式，按顺序匹配）
    /// 1. |lat| < 10        → Tropical
    /// 2. 15 < lat < 35     → Desert
    /// 3. 35 < lat < 55     → Temperate
    /// 4. lat >= 55         → Cold
    /// 5. 其余（含南半球中高纬） → Coastal
    pub fn classify(latitude: f64) -> ClimateDescriptor {
        if latitude.abs() < 10.0 {
            ClimateDescriptor {
                humidity: 80,
                wind_speed: 2,
                solar_radiation: 700,
                zone: ClimateZone::Tropical,
            }
        } else if latitude > 15.0 && latitude < 35.0 {
            ClimateDescriptor {
                humidity: 20,
                wind_speed: 7,
                solar_radiation: 900,
                zone: ClimateZone::Desert,
            }
        } else if latitude > 35.0 && latitude < 55.0 {
            ClimateDescriptor {
                humidity: 50,
                wind_speed: 5,
                solar_radiation: 500,
                zone: ClimateZone::Temperate,
            }
        } else if latitude >= 55.0 {
            ClimateDescriptor {
                humidity: 60,
                wind_speed: 12,
                solar_radiation: 250,
                zone: ClimateZone::Cold,
            }
        } else {
            ClimateDescriptor {
                humidity: 40,
                wind_speed: 10,
                solar_radiation: 400,
                zone: ClimateZone::Coastal,
            }
        }
    }

    /// 纬度 -> 气候带
    pub fn zone(latitude: f64) -> ClimateZone {
        Self::classify(latitude).zone
    }
}
