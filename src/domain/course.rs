// ==========================================
// 教学工作量分配系统 - 课程实例领域模型
// ==========================================
// 依据: course_instance 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CourseInstance - 课程实例
// ==========================================
// 课程在某一学年/学段的一次开课
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInstance {
    pub instance_id: String,  // 实例ID (如 "2025-50273")
    pub course_code: String,  // 课程代码
    pub study_year: i32,      // 学年
    pub study_period: String, // 学段代码 (如 "P1")
    pub num_students: i32,    // 注册学生数
}

// ==========================================
// InstancePeriod - 实例所属学段
// ==========================================
// 分配规则引擎解析实例时只需要 (学年, 学段) 二元组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePeriod {
    pub study_year: i32,      // 学年
    pub study_period: String, // 学段代码
}
