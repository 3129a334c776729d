// ==========================================
// 厂区温度风险引擎 - 厂区 API
// ==========================================
// 职责: 请求层调用入口（新建厂区 / 查询 / 触发批处理）
// 说明: HTTP 路由不在本 crate 内；调用方负责把请求体反序列化为 DTO
// ==========================================

use std::sync::Arc;

use crate::api::dto::{temperatures_by_label, CreateFacilityRequest, CreateFacilityResponse, FacilityView};
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_create_request;
use crate::config::DEFAULT_BATCH_SIZE;
use crate::engine::{BatchUpdateOrchestrator, RiskClassifier, TemperatureProjectionProvider};
use crate::repository::{FacilityRepository, FacilityStore};

/// 批处理成功时返回的消息
pub const BATCH_SUCCESS_MESSAGE: &str = "已完成全部厂区温度风险更新";

// ==========================================
// FacilityApi - 厂区 API
// ==========================================
pub struct FacilityApi {
    db_path: String,
    facility_repo: Arc<FacilityRepository>,
    classifier: RiskClassifier,
    batch_size: usize,
}

impl FacilityApi {
    /// 创建新的 FacilityApi 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（批处理每次按此路径重新打开连接）
    /// - provider: 温度投影提供者
    ///
    /// # 说明
    /// 构造时执行一次结构守卫，保证新建厂区可以写入风险列
    pub fn new(db_path: &str, provider: Arc<dyn TemperatureProjectionProvider>) -> ApiResult<Self> {
        let facility_repo = Arc::new(FacilityRepository::new(db_path)?);
        facility_repo.ensure_risk_column()?;

        Ok(Self {
            db_path: db_path.to_string(),
            facility_repo,
            classifier: RiskClassifier::new(provider),
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// 指定批处理批大小
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// 新建厂区
    ///
    /// # 流程
    /// 1. 校验输入（失败直接返回 InvalidInput，不调用分级器）
    /// 2. 计算四个时段投影与风险等级
    /// 3. 携带风险等级写入
    pub async fn create_facility(
        &self,
        request: CreateFacilityRequest,
    ) -> ApiResult<CreateFacilityResponse> {
        let new_facility = validate_create_request(&request)?;

        let assessment = self
            .classifier
            .assess(new_facility.latitude, new_facility.longitude)
            .await;

        let id = self.facility_repo.insert(&new_facility, assessment.risk)?;
        tracing::info!(
            "新建厂区 id={} name={} risk={}",
            id,
            new_facility.name,
            assessment.risk
        );

        let facility = self
            .facility_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::InternalError(format!("新建厂区 {} 读取失败", id)))?;

        Ok(CreateFacilityResponse {
            facility: facility.into(),
            temperatures: temperatures_by_label(&assessment.projections),
        })
    }

    /// 按 ID 查询厂区
    pub fn get_facility(&self, id: i64) -> ApiResult<FacilityView> {
        self.facility_repo
            .find_by_id(id)?
            .map(FacilityView::from)
            .ok_or_else(|| ApiError::NotFound(format!("Facility(id={})不存在", id)))
    }

    /// 查询已存厂区的四个时段投影
    pub async fn get_facility_temperatures(
        &self,
        id: i64,
    ) -> ApiResult<std::collections::BTreeMap<String, Option<f64>>> {
        let facility = self.get_facility(id)?;
        let projections = self
            .classifier
            .collect_projections(facility.latitude, facility.longitude)
            .await;
        Ok(temperatures_by_label(&projections))
    }

    /// 触发全量温度风险批处理
    ///
    /// # 返回
    /// - Ok(消息): 整体成功（个别批次可能已回滚，仅记录在日志与 risk_batch_log）
    /// - Err(BatchFailed): 结构守卫或加载失败
    ///
    /// # 说明
    /// 每次运行单独打开数据库连接，运行结束即释放
    pub async fn trigger_risk_batch(&self) -> ApiResult<String> {
        let store: Arc<dyn FacilityStore> = Arc::new(FacilityRepository::new(&self.db_path)?);
        let orchestrator = BatchUpdateOrchestrator::new(store, self.classifier.clone())
            .with_batch_size(self.batch_size);

        let result = orchestrator.run_batch().await;
        drop(orchestrator);
        tracing::debug!("批处理数据库连接已释放");

        match result {
            Ok(_) => Ok(BATCH_SUCCESS_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!("温度风险批处理失败: {}", e);
                Err(e.into())
            }
        }
    }
}
