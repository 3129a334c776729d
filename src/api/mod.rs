// ==========================================
// 厂区温度风险引擎 - API 层
// ==========================================
// 职责: 提供请求层调用的业务接口
// ==========================================

pub mod dto;
pub mod error;
pub mod facility_api;
pub mod validator;

// 重导出核心类型
pub use dto::{CreateFacilityRequest, CreateFacilityResponse, FacilityView};
pub use error::{ApiError, ApiResult};
pub use facility_api::{FacilityApi, BATCH_SUCCESS_MESSAGE};
pub use validator::validate_create_request;
