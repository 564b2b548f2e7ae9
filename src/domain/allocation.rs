// ==========================================
// 教学工作量分配系统 - 分配领域模型
// ==========================================
// 依据: teaching_activity / planned_activity / allocation 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// TeachingActivity - 教学活动类别
// ==========================================
// 固定字典表 (Lecture / Exercise / Tutorial ...)，
// Exercise 分配用例允许按名称懒创建
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingActivity {
    pub id: i64,               // 代理主键
    pub activity_name: String, // 活动名称 (唯一)
}

// ==========================================
// PlannedActivity - 计划课时
// ==========================================
// 每个 (实例, 活动) 一行，表示预算的总课时，与执行教师无关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedActivity {
    pub instance_id: String,       // 课程实例ID
    pub teaching_activity_id: i64, // 教学活动ID
    pub planned_hours: f64,        // 计划课时 (>= 0)
}

// ==========================================
// Allocation - 教师分配
// ==========================================
// 一名教师在一个实例的一个活动上的承诺课时
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub instance_id: String,       // 课程实例ID
    pub teaching_activity_id: i64, // 教学活动ID
    pub employment_id: String,     // 教师聘用ID
    pub allocated_hours: f64,      // 已分配课时 (>= 0)
}
