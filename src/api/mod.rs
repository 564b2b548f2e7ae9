// ==========================================
// 教学工作量分配系统 - API 层
// ==========================================
// 职责: 对外暴露五个用例，承载唯一的业务规则（学段配额）
// ==========================================

pub mod allocation_api;
pub mod course_api;
pub mod error;

// 重导出核心类型
pub use allocation_api::{
    AllocateTeachingRequest, AllocationApi, EXERCISE_ACTIVITY_NAME, MAX_INSTANCES_PER_PERIOD,
};
pub use course_api::{current_study_year, CourseApi};
pub use error::{ApiError, ApiResult};
