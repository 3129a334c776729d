// ==========================================
// 厂区温度风险引擎 - 温度投影提供者 Trait
// ==========================================
// 职责: 定义引擎消费的外部投影接口（不包含实现）
// 说明: 引擎只依赖本 trait；网格数据集实现见 importer::projection_grid
// ==========================================

use crate::domain::Timeframe;
use async_trait::async_trait;

// ==========================================
// TemperatureProjectionProvider Trait
// ==========================================
// 用途: 查询指定坐标、指定时段的“最暖季平均气温”投影
// 约束: 任意时段都可能返回 None（无数据）；不同时段之间无单调性假设
#[async_trait]
pub trait TemperatureProjectionProvider: Send + Sync {
    /// 查询投影温度 (°C)
    ///
    /// # 返回
    /// - Some(f64): 投影值
    /// - None: 该坐标该时段无数据
    async fn project(&self, latitude: f64, longitude: f64, timeframe: Timeframe) -> Option<f64>;
}

