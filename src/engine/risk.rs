// ==========================================
// 厂区温度风险引擎 - 温度风险分级
// ==========================================
// 职责: 四个时段投影 + 气候带 -> 风险等级
// 输入: 坐标（已校验的数值）
// 输出: RiskCategory / RiskAssessment
// 说明: 新建厂区与批处理共用本分级器
// ==========================================

use crate::domain::{
    ClimateDescriptor, ClimateZone, RiskAssessment, RiskCategory, TemperatureProjections,
    Timeframe,
};
use crate::engine::climate_zone::ClimateZoneClassifier;
use crate::engine::projection::TemperatureProjectionProvider;
use std::sync::Arc;

/// 平均温度相对基准时段的温升阈值 (°C)
pub const TEMP_DELTA_RISK_THRESHOLD: f64 = 1.8;

/// 平均温度绝对阈值 (°C)
pub const AVG_TEMP_HIGH_THRESHOLD: f64 = 35.0;

/// 高温敏感气候带的平均温度阈值 (°C)
pub const HEAT_PRONE_ZONE_THRESHOLD: f64 = 30.0;

// ==========================================
// RiskClassifier - 温度风险分级器
// ==========================================
#[derive(Clone)]
pub struct RiskClassifier {
    provider: Arc<dyn TemperatureProjectionProvider>,
}

impl RiskClassifier {
    /// 构造函数
    ///
    /// # 参数
    /// - `provider`: 温度投影提供者
    pub fn new(provider: Arc<dyn TemperatureProjectionProvider>) -> Self {
        Self { provider }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 查询四个时段的投影
    ///
    /// 按时段顺序逐个 await，调用之间不重叠
    pub async fn collect_projections(&self, latitude: f64, longitude: f64) -> TemperatureProjections {
        let mut projections = TemperatureProjections::default();
        for timeframe in Timeframe::ALL {
            let value = self.provider.project(latitude, longitude, timeframe).await;
            projections.set(timeframe, value);
        }
        projections
    }

    /// 单厂区风险等级
    pub async fn classify(&self, latitude: f64, longitude: f64) -> RiskCategory {
        self.assess(latitude, longitude).await.risk
    }

    /// 单厂区完整评估（新建厂区使用：投影 + 风险等级）
    pub async fn assess(&self, latitude: f64, longitude: f64) -> RiskAssessment {
        let projections = self.collect_projections(latitude, longitude).await;
        let climate: ClimateDescriptor = ClimateZoneClassifier::classify(latitude);
        let risk = Self::decide(&projections, climate.zone);

        RiskAssessment {
            projections,
            avg_temp: projections.average(),
            climate,
            risk,
        }
    }

    /// 分级规则（纯函数）
    ///
    /// # 规则
    /// - 平均温度或基准时段缺失 → Unknown
    ///   （基准缺失时，即使其他时段可求平均也为 Unknown）
    /// - (avg - baseline) > 1.8 或 avg > 35 → High
    /// - avg > 30 且气候带为 Desert/Tropical → High
    /// - 其余 → Low
    pub fn decide(projections: &TemperatureProjections, zone: ClimateZone) -> RiskCategory {
        let (Some(avg_temp), Some(baseline)) = (projections.average(), projections.baseline())
        else {
            return RiskCategory::Unknown;
        };

        if avg_temp - baseline > TEMP_DELTA_RISK_THRESHOLD || avg_temp > AVG_TEMP_HIGH_THRESHOLD {
            RiskCategory::High
        } else if avg_temp > HEAT_PRONE_ZONE_THRESHOLD && zone.is_heat_prone() {
            RiskCategory::High
        } else {
            RiskCategory::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projections(values: [Option<f64>; 4]) -> TemperatureProjections {
        TemperatureProjections::new(values)
    }

    #[test]
    fn test_delta_above_threshold_is_high() {
        // baseline 10, avg 12
        let p = projections([Some(10.0), Some(12.0), Some(13.0), Some(13.0)]);
        assert_eq!(p.average(), Some(12.0));
        assert_eq!(RiskClassifier::decide(&p, ClimateZone::Temperate), RiskCategory::High);
    }

    #[test]
    fn test_delta_exactly_threshold_is_not_high() {
        // baseline 0, avg 1.8 -> delta 等于阈值，不满足严格大于
        let p = projections([Some(0.0), None, Some(3.6), None]);
        assert_eq!(p.average(), Some(TEMP_DELTA_RISK_THRESHOLD));
        assert_eq!(RiskClassifier::decide(&p, ClimateZone::Temperate), RiskCategory::Low);
    }

    #[test]
    fn test_missing_baseline_is_unknown() {
        let p = projections([None, Some(40.0), Some(41.0), Some(42.0)]);
        assert!(p.average().is_some());
        assert_eq!(RiskClassifier::decide(&p, ClimateZone::Desert), RiskCategory::Unknown);
    }

    #[test]
    fn test_all_missing_is_unknown() {
        let p = TemperatureProjections::default();
        assert_eq!(RiskClassifier::decide(&p, ClimateZone::Tropical), RiskCategory::Unknown);
    }

    #[test]
    fn test_heat_prone_zone_rule() {
        // baseline 30.5, avg 31 -> delta 0.5
        let p = projections([Some(30.5), Some(31.5), None, None]);
        assert_eq!(p.average(), Some(31.0));
        assert_eq!(RiskClassifier::decide(&p, ClimateZone::Tropical), RiskCategory::High);
        assert_eq!(RiskClassifier::decide(&p, ClimateZone::Coastal), RiskCategory::Low);
    }
}
