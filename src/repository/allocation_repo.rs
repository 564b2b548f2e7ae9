// ==========================================
// 教学工作量分配系统 - 教师分配仓储
// ==========================================
// 职责: planned_activity / allocation 表的行级原语
//       以及配额检查所需的计数查询
// 红线: Repository 不含业务逻辑 (配额阈值判断在 API 层)
// ==========================================

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Allocation, PlannedActivity};
use crate::repository::error::RepositoryResult;

/// 教师分配仓储
pub struct AllocationRepository;

impl AllocationRepository {
    /// 检查教师在该实例上是否已有任意活动的分配
    pub fn teacher_on_instance(
        conn: &Connection,
        instance_id: &str,
        employment_id: &str,
    ) -> RepositoryResult<bool> {
        let exists: bool = conn
            .query_row(
                r#"
                SELECT 1
                FROM allocation
                WHERE instance_id = ?1 AND employment_id = ?2
                LIMIT 1
                "#,
                params![instance_id, employment_id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    /// 统计教师在 (学年, 学段) 内已有分配的**去重**实例数
    ///
    /// 配额检查的读取端；调用方须处于 IMMEDIATE 事务内，
    /// 保证计数与后续写入之间不会插入并发分配
    pub fn count_instances_in_period(
        conn: &Connection,
        employment_id: &str,
        study_year: i32,
        study_period: &str,
    ) -> RepositoryResult<i64> {
        let count: i64 = conn.query_row(
            r#"
            SELECT COUNT(DISTINCT a.instance_id)
            FROM allocation a
            JOIN course_instance ci ON ci.instance_id = a.instance_id
            WHERE a.employment_id = ?1
              AND ci.study_year = ?2
              AND ci.study_period = ?3
            "#,
            params![employment_id, study_year, study_period],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// 插入或覆盖计划课时行
    pub fn upsert_planned_activity(
        conn: &Connection,
        instance_id: &str,
        teaching_activity_id: i64,
        planned_hours: f64,
    ) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO planned_activity (instance_id, teaching_activity_id, planned_hours)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (instance_id, teaching_activity_id)
            DO UPDATE SET planned_hours = excluded.planned_hours
            "#,
            params![instance_id, teaching_activity_id, planned_hours],
        )?;
        Ok(())
    }

    /// 插入或覆盖教师分配行
    pub fn upsert_allocation(
        conn: &Connection,
        instance_id: &str,
        teaching_activity_id: i64,
        employment_id: &str,
        allocated_hours: f64,
    ) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO allocation (instance_id, teaching_activity_id, employment_id, allocated_hours)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (instance_id, teaching_activity_id, employment_id)
            DO UPDATE SET allocated_hours = excluded.allocated_hours
            "#,
            params![instance_id, teaching_activity_id, employment_id, allocated_hours],
        )?;
        Ok(())
    }

    /// 删除教师分配行
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（删除不存在的行为 0，不报错）
    pub fn delete_allocation(
        conn: &Connection,
        instance_id: &str,
        teaching_activity_id: i64,
        employment_id: &str,
    ) -> RepositoryResult<usize> {
        let affected = conn.execute(
            r#"
            DELETE FROM allocation
            WHERE instance_id = ?1 AND teaching_activity_id = ?2 AND employment_id = ?3
            "#,
            params![instance_id, teaching_activity_id, employment_id],
        )?;
        Ok(affected)
    }

    /// 查询单条分配行
    pub fn find_allocation(
        conn: &Connection,
        instance_id: &str,
        teaching_activity_id: i64,
        employment_id: &str,
    ) -> RepositoryResult<Option<Allocation>> {
        let allocation = conn
            .query_row(
                r#"
                SELECT instance_id, teaching_activity_id, employment_id, allocated_hours
                FROM allocation
                WHERE instance_id = ?1 AND teaching_activity_id = ?2 AND employment_id = ?3
                "#,
                params![instance_id, teaching_activity_id, employment_id],
                |row| {
                    Ok(Allocation {
                        instance_id: row.get(0)?,
                        teaching_activity_id: row.get(1)?,
                        employment_id: row.get(2)?,
                        allocated_hours: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(allocation)
    }

    /// 查询单条计划课时行
    pub fn find_planned_activity(
        conn: &Connection,
        instance_id: &str,
        teaching_activity_id: i64,
    ) -> RepositoryResult<Option<PlannedActivity>> {
        let planned = conn
            .query_row(
                r#"
                SELECT instance_id, teaching_activity_id, planned_hours
                FROM planned_activity
                WHERE instance_id = ?1 AND teaching_activity_id = ?2
                "#,
                params![instance_id, teaching_activity_id],
                |row| {
                    Ok(PlannedActivity {
                        instance_id: row.get(0)?,
                        teaching_activity_id: row.get(1)?,
                        planned_hours: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(planned)
    }

    /// 查询教师姓名（Exercise 分配摘要用）
    pub fn find_teacher_name(
        conn: &Connection,
        employment_id: &str,
    ) -> RepositoryResult<Option<String>> {
        let name = conn
            .query_row(
                "SELECT name FROM employee WHERE employment_id = ?1",
                params![employment_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }
}
