// ==========================================
// 厂区温度风险引擎 - 气候与温度投影领域模型
// ==========================================
// 说明: 以下结构均为临时计算结果，不持久化
// ==========================================

use crate::domain::types::{ClimateZone, RiskCategory, Timeframe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ClimateDescriptor - 气候近似描述
// ==========================================
// 只有 zone 参与风险判定，其余字段为描述性元数据
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateDescriptor {
    pub humidity: u32,        // 相对湿度 (%)
    pub wind_speed: u32,      // 风速 (m/s)
    pub solar_radiation: u32, // 太阳辐射 (W/m²)
    pub zone: ClimateZone,    // 气候带
}

// ==========================================
// TemperatureProjections - 四个时段的投影结果
// ==========================================
// 每个时段一个值；None 表示该时段无数据
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureProjections {
    values: [Option<f64>; 4],
}

impl TemperatureProjections {
    /// 以时段顺序构造
    pub fn new(values: [Option<f64>; 4]) -> Self {
        Self { values }
    }

    /// 读取某时段的投影
    pub fn get(&self, timeframe: Timeframe) -> Option<f64> {
        self.values[timeframe.index()]
    }

    /// 写入某时段的投影
    pub fn set(&mut self, timeframe: Timeframe, value: Option<f64>) {
        self.values[timeframe.index()] = value;
    }

    /// 基准时段的投影
    pub fn baseline(&self) -> Option<f64> {
        self.get(Timeframe::BASELINE)
    }

    /// 有值的时段数
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// 有值时段的算术平均
    ///
    /// 缺失时段同时从求和与计数中排除；全部缺失时返回 None
    pub fn average(&self) -> Option<f64> {
        let present: Vec<f64> = self.values.iter().flatten().copied().collect();
        if present.is_empty() {
            return None;
        }
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }

    /// 按时段标签展开（用于接口输出）
    pub fn by_label(&self) -> BTreeMap<&'static str, Option<f64>> {
        Timeframe::ALL
            .iter()
            .map(|tf| (tf.label(), self.get(*tf)))
            .collect()
    }
}

// ==========================================
// RiskAssessment - 单厂区风险评估结果
// ==========================================
// 用途: 新建厂区时返回投影 + 风险等级
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub projections: TemperatureProjections,
    pub avg_temp: Option<f64>,
    pub climate: ClimateDescriptor,
    pub risk: RiskCategory,
}
