// ==========================================
// 教学工作量分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与用例结果 DTO
// 红线: 不含数据访问逻辑,不含业务规则逻辑
// ==========================================

pub mod allocation;
pub mod course;
pub mod cost;

// 重导出核心类型
pub use allocation::{Allocation, PlannedActivity, TeachingActivity};
pub use course::{CourseInstance, InstancePeriod};
pub use cost::{CourseInstanceCost, ExerciseAllocationInfo};
