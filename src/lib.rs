// ==========================================
// 教学工作量分配系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 课程实例教学工作量的事务性分配核心
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与 DTO
pub mod domain;

// 数据仓储层 - 持久化网关与行级原语
pub mod repository;

// API 层 - 五个用例
pub mod api;

// 应用层 - 启动装配与命令行外壳
pub mod app;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 运行配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Allocation, CourseInstance, CourseInstanceCost, ExerciseAllocationInfo, InstancePeriod,
    PlannedActivity, TeachingActivity,
};

// 仓储
pub use repository::{Database, RepositoryError, RepositoryResult};

// API
pub use api::{
    current_study_year, AllocateTeachingRequest, AllocationApi, ApiError, ApiResult, CourseApi,
    EXERCISE_ACTIVITY_NAME, MAX_INSTANCES_PER_PERIOD,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "教学工作量分配系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_period_cap_constant() {
        assert_eq!(MAX_INSTANCES_PER_PERIOD, 4);
    }
}
