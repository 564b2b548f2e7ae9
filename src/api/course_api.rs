// ==========================================
// 教学工作量分配系统 - 课程 API
// ==========================================
// 职责: 成本计算与学生数调整两个用例
// ==========================================

use chrono::Datelike;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::CourseInstanceCost;
use crate::repository::{CostRepository, CourseInstanceRepository, Database};

// ==========================================
// CourseApi - 课程 API
// ==========================================

/// 课程API
///
/// 职责：
/// 1. 课程实例成本计算 (compute_course_cost) —— 只读，但仍在事务内执行，
///    保证两条聚合查询读到同一快照
/// 2. 学生数调整 (increase_students) —— 锁内读-改-写
pub struct CourseApi {
    db: Database,
}

impl CourseApi {
    /// 创建新的CourseApi实例
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 计算课程实例在当前学年的教学成本
    ///
    /// 当前学年取本地日历年，见 [`current_study_year`]
    pub fn compute_course_cost(&self, instance_id: &str) -> ApiResult<CourseInstanceCost> {
        self.compute_course_cost_for_year(instance_id, current_study_year())
    }

    /// 计算课程实例在指定学年的教学成本
    ///
    /// - 计划成本 = 该学年总计划课时 × 全体教师当前平均时薪 / 1000 (kSEK)
    /// - 实际成本 = Σ(已分配课时 × 该教师当前时薪) / 1000；无分配时为 0.0
    ///
    /// # 返回
    /// - Ok(CourseInstanceCost): 成本结果
    /// - Err(ApiError::NotFound): 实例不存在，或该学年无计划课时数据
    /// - Err(ApiError::AggregationError): 无任何当前薪资行，平均时薪无定义
    pub fn compute_course_cost_for_year(
        &self,
        instance_id: &str,
        study_year: i32,
    ) -> ApiResult<CourseInstanceCost> {
        self.db.run_in_transaction(|tx| {
            let instance = CourseInstanceRepository::find_by_id(tx, instance_id)?
                .ok_or_else(|| ApiError::NotFound(format!("课程实例不存在: {}", instance_id)))?;

            let planned_hours = CostRepository::total_planned_hours(tx, instance_id, study_year)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!(
                        "课程实例 {} 在 {} 学年无计划课时数据",
                        instance_id, study_year
                    ))
                })?;

            let average_salary = CostRepository::average_current_salary(tx)?.ok_or_else(|| {
                ApiError::AggregationError("无当前薪资数据，平均时薪无定义".to_string())
            })?;

            let actual_cost = CostRepository::actual_cost_total(tx, instance_id, study_year)?;

            Ok(CourseInstanceCost {
                course_code: instance.course_code,
                instance_id: instance.instance_id,
                period: instance.study_period,
                planned_cost_ksek: planned_hours * average_salary / 1000.0,
                actual_cost_ksek: actual_cost / 1000.0,
            })
        })
    }

    /// 学生数调整用例
    ///
    /// IMMEDIATE 事务入口取写锁，读-改-写全程持锁，防止丢失更新。
    /// delta 可为负；结果允许为负（不做零下限钳制，保持既有行为）。
    ///
    /// # 返回
    /// - Ok(i32): 调整后的学生数
    /// - Err(ApiError::NotFound): 实例不存在
    pub fn increase_students(&self, instance_id: &str, delta: i32) -> ApiResult<i32> {
        self.db.run_in_transaction(|tx| {
            let current = CourseInstanceRepository::read_num_students(tx, instance_id)?
                .ok_or_else(|| ApiError::NotFound(format!("课程实例不存在: {}", instance_id)))?;

            let new_count = current + delta;
            CourseInstanceRepository::write_num_students(tx, instance_id, new_count)?;

            tracing::debug!(
                instance_id = %instance_id,
                delta,
                new_count,
                "学生数已调整"
            );
            Ok(new_count)
        })
    }
}

/// 当前学年（本地日历年）
pub fn current_study_year() -> i32 {
    chrono::Local::now().year()
}
