// ==========================================
// 教学工作量分配系统 - 课程实例仓储
// ==========================================
// 职责: course_instance 表的行级原语
// 红线: Repository 不含业务逻辑
// ==========================================

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{CourseInstance, InstancePeriod};
use crate::repository::error::RepositoryResult;

/// 课程实例仓储
pub struct CourseInstanceRepository;

impl CourseInstanceRepository {
    /// 按ID查询课程实例
    ///
    /// # 返回
    /// - Ok(Some(CourseInstance)): 找到实例
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(conn: &Connection, instance_id: &str) -> RepositoryResult<Option<CourseInstance>> {
        let instance = conn
            .query_row(
                r#"
                SELECT instance_id, course_code, study_year, study_period, num_students
                FROM course_instance
                WHERE instance_id = ?1
                "#,
                params![instance_id],
                |row| {
                    Ok(CourseInstance {
                        instance_id: row.get(0)?,
                        course_code: row.get(1)?,
                        study_year: row.get(2)?,
                        study_period: row.get(3)?,
                        num_students: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(instance)
    }

    /// 查询实例所属 (学年, 学段)
    pub fn find_period(conn: &Connection, instance_id: &str) -> RepositoryResult<Option<InstancePeriod>> {
        let period = conn
            .query_row(
                "SELECT study_year, study_period FROM course_instance WHERE instance_id = ?1",
                params![instance_id],
                |row| {
                    Ok(InstancePeriod {
                        study_year: row.get(0)?,
                        study_period: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(period)
    }

    /// 读取实例当前学生数
    ///
    /// 调用方须处于 IMMEDIATE 事务内，读-改-写期间持有写锁
    pub fn read_num_students(conn: &Connection, instance_id: &str) -> RepositoryResult<Option<i32>> {
        let n = conn
            .query_row(
                "SELECT num_students FROM course_instance WHERE instance_id = ?1",
                params![instance_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(n)
    }

    /// 写回实例学生数
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数
    pub fn write_num_students(
        conn: &Connection,
        instance_id: &str,
        num_students: i32,
    ) -> RepositoryResult<usize> {
        let affected = conn.execute(
            "UPDATE course_instance SET num_students = ?2 WHERE instance_id = ?1",
            params![instance_id, num_students],
        )?;
        Ok(affected)
    }
}
