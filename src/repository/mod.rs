// ==========================================
// 厂区温度风险引擎 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod facility_repo;
pub mod facility_store;
pub mod schema_guard;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use facility_repo::FacilityRepository;
pub use facility_store::FacilityStore;
pub use schema_guard::ensure_risk_column;
