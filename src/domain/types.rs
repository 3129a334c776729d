// ==========================================
// 厂区温度风险引擎 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 温度风险等级 (Risk Category)
// ==========================================
// 持久化格式: "High" / "Low" / "Unknown"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    High,    // 高风险
    Low,     // 低风险
    Unknown, // 投影数据不足
}

impl RiskCategory {
    /// 数据库/接口使用的字符串形式
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::High => "High",
            RiskCategory::Low => "Low",
            RiskCategory::Unknown => "Unknown",
        }
    }

    /// 从持久化字符串解析（严格匹配，未知值返回 None）
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "High" => Some(RiskCategory::High),
            "Low" => Some(RiskCategory::Low),
            "Unknown" => Some(RiskCategory::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 投影时段 (Timeframe)
// ==========================================
// 封闭枚举，按时间先后排序；Y2030 为基准时段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "2030")]
    Y2030,
    #[serde(rename = "2050")]
    Y2050,
    #[serde(rename = "2070")]
    Y2070,
    #[serde(rename = "2090")]
    Y2090,
}

impl Timeframe {
    /// 全部时段（按时间顺序）
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Y2030,
        Timeframe::Y2050,
        Timeframe::Y2070,
        Timeframe::Y2090,
    ];

    /// 基准时段（最早的时段，用于温升计算）
    pub const BASELINE: Timeframe = Timeframe::Y2030;

    /// 时段标签
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Y2030 => "2030",
            Timeframe::Y2050 => "2050",
            Timeframe::Y2070 => "2070",
            Timeframe::Y2090 => "2090",
        }
    }

    /// 从标签解析
    pub fn from_label(label: &str) -> Option<Self> {
        Timeframe::ALL
            .iter()
            .copied()
            .find(|tf| tf.label() == label.trim())
    }

    /// 在 ALL 中的位置
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 气候带 (Climate Zone)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateZone {
    Tropical,  // 热带
    Desert,    // 沙漠
    Temperate, // 温带
    Cold,      // 寒带
    Coastal,   // 兜底
}

impl ClimateZone {
    /// 热带/沙漠在 30°C 规则下视为高温敏感气候带
    pub fn is_heat_prone(&self) -> bool {
        matches!(self, ClimateZone::Desert | ClimateZone::Tropical)
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClimateZone::Tropical => "Tropical",
            ClimateZone::Desert => "Desert",
            ClimateZone::Temperate => "Temperate",
            ClimateZone::Cold => "Cold",
            ClimateZone::Coastal => "Coastal",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_category_round_trip_strings() {
        for category in [RiskCategory::High, RiskCategory::Low, RiskCategory::Unknown] {
            assert_eq!(RiskCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(RiskCategory::parse("high"), None);
        assert_eq!(RiskCategory::parse(""), None);
    }

    #[test]
    fn test_timeframe_order_and_baseline() {
        assert_eq!(Timeframe::BASELINE, Timeframe::ALL[0]);
        assert!(Timeframe::ALL.windows(2).all(|w| w[0] < w[1]));
        for (i, tf) in Timeframe::ALL.iter().enumerate() {
            assert_eq!(tf.index(), i);
            assert_eq!(Timeframe::from_label(tf.label()), Some(*tf));
        }
        assert_eq!(Timeframe::from_label("2040"), None);
    }

    #[test]
    fn test_timeframe_serializes_as_label() {
        let json = serde_json::to_string(&Timeframe::Y2070).unwrap();
        assert_eq!(json, "\"2070\"");
    }
}
