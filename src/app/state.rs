// ==========================================
// 教学工作量分配系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::{AllocationApi, CourseApi};
use crate::config::AppConfig;
use crate::repository::{Database, RepositoryResult};

/// 应用状态
///
/// 包含所有API实例和共享的持久化网关
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 持久化网关
    pub db: Database,

    /// 分配规则API
    pub allocation_api: Arc<AllocationApi>,

    /// 课程API
    pub course_api: Arc<CourseApi>,
}

impl AppState {
    /// 按配置初始化应用状态
    ///
    /// # 返回
    /// - Ok(AppState): 初始化完成（含连接自检）
    /// - Err: 数据库连接错误
    pub fn new(config: &AppConfig) -> RepositoryResult<Self> {
        let db = Database::open(&config.db_path, config.busy_timeout_ms)?;
        db.test_connection()?;

        let allocation_api = Arc::new(AllocationApi::new(db.clone()));
        let course_api = Arc::new(CourseApi::new(db.clone()));

        Ok(Self {
            db_path: config.db_path.clone(),
            db,
            allocation_api,
            course_api,
        })
    }
}
