// ==========================================
// 教学工作量分配系统 - 用例结果 DTO
// ==========================================
// 职责: 成本计算与 Exercise 分配用例的返回结构
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CourseInstanceCost - 课程实例成本
// ==========================================
// 成本以 kSEK (千克朗) 表示: 基础货币单位 / 1000
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInstanceCost {
    pub course_code: String,     // 课程代码
    pub instance_id: String,     // 实例ID
    pub period: String,          // 学段代码
    pub planned_cost_ksek: f64,  // 计划成本 = 总计划课时 × 平均时薪 / 1000
    pub actual_cost_ksek: f64,   // 实际成本 = Σ(已分配课时 × 该教师时薪) / 1000
}

// ==========================================
// ExerciseAllocationInfo - Exercise 分配摘要
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAllocationInfo {
    pub course_code: String,   // 课程代码
    pub instance_id: String,   // 实例ID
    pub period: String,        // 学段代码
    pub activity_name: String, // 活动名称 (固定 "Exercise")
    pub teacher_name: String,  // 教师姓名 (employee 表缺失时回退为聘用ID)
}
