// ==========================================
// 教学工作量分配系统 - 数据仓储层
// ==========================================
// 职责: 持久化网关 + 五张表的行级原语
// 红线: Repository 不含业务逻辑
// ==========================================
// 组合约定: 行级原语以 &Connection 为参数，
//           多语句用例在 Database::run_in_transaction 内传 &tx 组合
// ==========================================

pub mod activity_repo;
pub mod allocation_repo;
pub mod cost_repo;
pub mod course_instance_repo;
pub mod error;
pub mod gateway;

// 重导出核心类型
pub use activity_repo::ActivityRepository;
pub use allocation_repo::AllocationRepository;
pub use cost_repo::CostRepository;
pub use course_instance_repo::CourseInstanceRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use gateway::Database;
