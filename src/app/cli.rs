// ==========================================
// 教学工作量分配系统 - 命令行解释器
// ==========================================
// 职责: 行式命令 -> 五个用例的薄外壳
// 红线: 不含业务逻辑，只做解析与打印
// ==========================================

use std::io::{BufRead, Write};

use crate::api::{AllocateTeachingRequest, ApiError};
use crate::app::state::AppState;

/// 命令帮助文本
const HELP_TEXT: &str = "\
可用命令:
  cost <instance_id>                                    计算实例成本 (当前学年)
  students <instance_id> <delta>                        调整学生数 (delta 可为负)
  allocate <instance_id> <teacher_id> <activity> <hours> 教师分配 (配额: 每学段至多4实例)
  deallocate <instance_id> <teacher_id> <activity>      撤销分配
  exercise <instance_id> <teacher_id> <hours>           Exercise 分配 (配额豁免)
  help                                                  显示帮助
  quit                                                  退出";

/// 命令行解释器
pub struct CommandLineInterpreter<'a> {
    state: &'a AppState,
}

impl<'a> CommandLineInterpreter<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// 主循环: 逐行读命令直到 quit/EOF
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> std::io::Result<()> {
        writeln!(output, "{}", HELP_TEXT)?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("quit") {
                break;
            }

            match self.dispatch(trimmed) {
                Ok(rendered) => writeln!(output, "{}", rendered)?,
                Err(e) => writeln!(output, "{}", render_error(&e))?,
            }
        }

        Ok(())
    }

    /// 解析并执行一条命令
    fn dispatch(&self, line: &str) -> Result<String, ApiError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["help"] => Ok(HELP_TEXT.to_string()),

            ["cost", instance_id] => {
                let cost = self.state.course_api.compute_course_cost(instance_id)?;
                serde_json::to_string_pretty(&cost)
                    .map_err(|e| ApiError::InternalError(e.to_string()))
            }

            ["students", instance_id, delta] => {
                let delta: i32 = delta
                    .parse()
                    .map_err(|_| ApiError::InvalidInput(format!("delta 不是整数: {}", delta)))?;
                let new_count = self.state.course_api.increase_students(instance_id, delta)?;
                Ok(format!("实例 {} 学生数更新为 {}", instance_id, new_count))
            }

            ["allocate", instance_id, teacher_id, activity, hours] => {
                let hours: f64 = hours
                    .parse()
                    .map_err(|_| ApiError::InvalidInput(format!("hours 不是数字: {}", hours)))?;
                self.state.allocation_api.allocate_teaching(&AllocateTeachingRequest {
                    instance_id: instance_id.to_string(),
                    employment_id: teacher_id.to_string(),
                    activity_name: activity.to_string(),
                    hours,
                })?;
                Ok(format!(
                    "已分配: 实例 {} / 教师 {} / 活动 {} / {} 课时",
                    instance_id, teacher_id, activity, hours
                ))
            }

            ["deallocate", instance_id, teacher_id, activity] => {
                self.state
                    .allocation_api
                    .deallocate_teaching(instance_id, teacher_id, activity)?;
                Ok(format!(
                    "已撤销: 实例 {} / 教师 {} / 活动 {}",
                    instance_id, teacher_id, activity
                ))
            }

            ["exercise", instance_id, teacher_id, hours] => {
                let hours: f64 = hours
                    .parse()
                    .map_err(|_| ApiError::InvalidInput(format!("hours 不是数字: {}", hours)))?;
                let info = self
                    .state
                    .allocation_api
                    .add_exercise(instance_id, teacher_id, hours)?;
                serde_json::to_string_pretty(&info)
                    .map_err(|e| ApiError::InternalError(e.to_string()))
            }

            _ => Err(ApiError::InvalidInput(format!(
                "无法识别的命令: {} (输入 help 查看用法)",
                line
            ))),
        }
    }
}

/// 业务错误与存储错误分开渲染
fn render_error(e: &ApiError) -> String {
    match e {
        ApiError::TeacherOverloaded { .. }
        | ApiError::NotFound(_)
        | ApiError::AggregationError(_)
        | ApiError::InvalidInput(_) => format!("[业务] {}", e),
        other => format!("[存储] {}", other),
    }
}
