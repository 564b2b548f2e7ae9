// ==========================================
// 教学工作量分配系统 - 分配规则 API
// ==========================================
// 职责: 教师分配/撤销分配/Exercise 分配三个用例
// 核心规则: 同一 (学年, 学段) 内一名教师至多分配 4 个不同课程实例
// ==========================================
// 并发说明:
// - 配额检查与写入在同一 BEGIN IMMEDIATE 事务内执行。
//   两个并发分配方同时观察到 count=3 并同时写入的竞态不可能发生：
//   后进入者在事务入口处等待写锁，取得锁后读到的是已提交的计数。
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::ExerciseAllocationInfo;
use crate::repository::{
    ActivityRepository, AllocationRepository, CourseInstanceRepository, Database,
};

/// 学段配额: 同一 (学年, 学段) 内一名教师可分配的最大去重实例数
pub const MAX_INSTANCES_PER_PERIOD: i64 = 4;

/// Exercise 用例的固定活动名
pub const EXERCISE_ACTIVITY_NAME: &str = "Exercise";

// ==========================================
// AllocationApi - 分配规则 API
// ==========================================

/// 分配规则API
///
/// 职责：
/// 1. 教师分配 (allocate_teaching) —— 唯一带配额检查的用例
/// 2. 撤销分配 (deallocate_teaching) —— 无约束
/// 3. Exercise 分配 (add_exercise) —— 无配额检查（规则豁免）
pub struct AllocationApi {
    db: Database,
}

/// allocate_teaching 的请求参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocateTeachingRequest {
    pub instance_id: String,   // 课程实例ID
    pub employment_id: String, // 教师聘用ID
    pub activity_name: String, // 活动名称
    pub hours: f64,            // 课时（同时写入计划课时与分配课时）
}

impl AllocationApi {
    /// 创建新的AllocationApi实例
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 教师分配用例
    ///
    /// 单事务内执行：
    /// 1. 按名称解析活动ID（未知活动 -> NotFound）
    /// 2. 解析实例 (学年, 学段)（实例不存在 -> NotFound）
    /// 3. 教师在该实例上已有任意分配 -> 跳过配额检查
    /// 4. 否则统计该教师在同 (学年, 学段) 的去重实例数，
    ///    达到配额 -> TeacherOverloaded，零写入，事务回滚
    /// 5. 通过检查 -> 覆盖式 upsert 计划课时行与分配行
    ///
    /// # 参数
    /// - request: 分配请求
    ///
    /// # 返回
    /// - Ok(()): 分配已提交
    /// - Err(ApiError::TeacherOverloaded): 配额违反（业务结果，非存储故障）
    /// - Err(ApiError::NotFound): 活动或实例不存在
    /// - Err: 数据库错误
    pub fn allocate_teaching(&self, request: &AllocateTeachingRequest) -> ApiResult<()> {
        // 参数验证
        if request.hours < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "课时不能为负数: {}",
                request.hours
            )));
        }

        self.db.run_in_transaction(|tx| {
            // 1. 解析活动ID
            let activity_id = ActivityRepository::find_id_by_name(tx, &request.activity_name)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("教学活动不存在: {}", request.activity_name))
                })?;

            // 2. 解析实例 (学年, 学段)
            let period = CourseInstanceRepository::find_period(tx, &request.instance_id)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("课程实例不存在: {}", request.instance_id))
                })?;

            // 3. 教师已在该实例上 -> 追加/更新课时不会增加去重实例数，跳过配额检查
            let already_on_instance = AllocationRepository::teacher_on_instance(
                tx,
                &request.instance_id,
                &request.employment_id,
            )?;

            // 4. 新实例分配 -> 配额检查
            if !already_on_instance {
                let current_count = AllocationRepository::count_instances_in_period(
                    tx,
                    &request.employment_id,
                    period.study_year,
                    &period.study_period,
                )?;

                if current_count >= MAX_INSTANCES_PER_PERIOD {
                    tracing::info!(
                        employment_id = %request.employment_id,
                        current_count,
                        study_year = period.study_year,
                        study_period = %period.study_period,
                        "配额检查未通过，拒绝分配"
                    );
                    return Err(ApiError::TeacherOverloaded {
                        employment_id: request.employment_id.clone(),
                        current_count,
                        study_year: period.study_year,
                        study_period: period.study_period.clone(),
                    });
                }
            }

            // 5. 覆盖式 upsert 计划课时行与分配行
            AllocationRepository::upsert_planned_activity(
                tx,
                &request.instance_id,
                activity_id,
                request.hours,
            )?;
            AllocationRepository::upsert_allocation(
                tx,
                &request.instance_id,
                activity_id,
                &request.employment_id,
                request.hours,
            )?;

            tracing::debug!(
                instance_id = %request.instance_id,
                employment_id = %request.employment_id,
                activity_id,
                hours = request.hours,
                "教师分配已写入"
            );
            Ok(())
        })
    }

    /// 撤销分配用例
    ///
    /// 无配额约束；删除不存在的分配行是 no-op，不报错。
    /// 计划课时行不受影响（可能被其他教师共享）。
    ///
    /// # 返回
    /// - Ok(()): 删除完成（含 no-op）
    /// - Err(ApiError::NotFound): 活动名称未知
    pub fn deallocate_teaching(
        &self,
        instance_id: &str,
        employment_id: &str,
        activity_name: &str,
    ) -> ApiResult<()> {
        self.db.run_in_transaction(|tx| {
            let activity_id = ActivityRepository::find_id_by_name(tx, activity_name)?
                .ok_or_else(|| ApiError::NotFound(format!("教学活动不存在: {}", activity_name)))?;

            let deleted =
                AllocationRepository::delete_allocation(tx, instance_id, activity_id, employment_id)?;

            tracing::debug!(
                instance_id = %instance_id,
                employment_id = %employment_id,
                activity_name = %activity_name,
                deleted,
                "撤销分配完成"
            );
            Ok(())
        })
    }

    /// Exercise 分配用例
    ///
    /// 查找或创建固定的 "Exercise" 活动行，之后与 allocate_teaching
    /// 步骤 5 相同的覆盖式 upsert；**不做配额检查**（规则豁免）。
    ///
    /// # 返回
    /// - Ok(ExerciseAllocationInfo): 分配摘要行
    /// - Err(ApiError::NotFound): 课程实例不存在
    pub fn add_exercise(
        &self,
        instance_id: &str,
        employment_id: &str,
        planned_hours: f64,
    ) -> ApiResult<ExerciseAllocationInfo> {
        if planned_hours < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "课时不能为负数: {}",
                planned_hours
            )));
        }

        self.db.run_in_transaction(|tx| {
            let instance = CourseInstanceRepository::find_by_id(tx, instance_id)?
                .ok_or_else(|| ApiError::NotFound(format!("课程实例不存在: {}", instance_id)))?;

            // Exercise 活动允许懒创建
            let activity_id = ActivityRepository::find_or_create(tx, EXERCISE_ACTIVITY_NAME)?;

            AllocationRepository::upsert_planned_activity(tx, instance_id, activity_id, planned_hours)?;
            AllocationRepository::upsert_allocation(
                tx,
                instance_id,
                activity_id,
                employment_id,
                planned_hours,
            )?;

            // 摘要行: 教师姓名缺失时回退为聘用ID
            let teacher_name = AllocationRepository::find_teacher_name(tx, employment_id)?
                .unwrap_or_else(|| employment_id.to_string());

            Ok(ExerciseAllocationInfo {
                course_code: instance.course_code,
                instance_id: instance.instance_id,
                period: instance.study_period,
                activity_name: EXERCISE_ACTIVITY_NAME.to_string(),
                teacher_name,
            })
        })
    }
}
