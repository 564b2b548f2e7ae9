// ==========================================
// 教学工作量分配系统 - 成本聚合仓储
// ==========================================
// 职责: 成本计算所需的聚合查询
// 红线: Repository 不含业务逻辑 (kSEK 换算与缺数据语义在 API 层)
// ==========================================
// 说明: 两条聚合查询必须在同一事务内执行，
//       由持久化网关保证快照一致性
// ==========================================

use rusqlite::{params, Connection};

use crate::repository::error::RepositoryResult;

/// 成本聚合仓储
pub struct CostRepository;

impl CostRepository {
    /// 统计实例在指定学年的总计划课时
    ///
    /// # 返回
    /// - Ok(Some(f64)): 总计划课时
    /// - Ok(None): 该实例在该学年无任何计划课时行
    pub fn total_planned_hours(
        conn: &Connection,
        instance_id: &str,
        study_year: i32,
    ) -> RepositoryResult<Option<f64>> {
        // SUM 在无行时返回 NULL，映射为 None
        let total: Option<f64> = conn.query_row(
            r#"
            SELECT SUM(pa.planned_hours)
            FROM planned_activity pa
            JOIN course_instance ci ON ci.instance_id = pa.instance_id
            WHERE pa.instance_id = ?1
              AND ci.study_year = ?2
            "#,
            params![instance_id, study_year],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// 统计全体教师的当前平均时薪
    ///
    /// # 返回
    /// - Ok(Some(f64)): 平均时薪
    /// - Ok(None): 无任何当前薪资行（平均值无定义）
    pub fn average_current_salary(conn: &Connection) -> RepositoryResult<Option<f64>> {
        let avg: Option<f64> = conn.query_row(
            "SELECT AVG(hourly_salary) FROM salary WHERE is_current = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// 统计实例在指定学年的实际成本（基础货币单位）
    ///
    /// 实际成本 = Σ (已分配课时 × 该教师当前时薪)；
    /// 无分配行或无匹配薪资行时为 0，不是错误
    pub fn actual_cost_total(
        conn: &Connection,
        instance_id: &str,
        study_year: i32,
    ) -> RepositoryResult<f64> {
        let total: f64 = conn.query_row(
            r#"
            SELECT COALESCE(SUM(a.allocated_hours * s.hourly_salary), 0.0)
            FROM allocation a
            JOIN course_instance ci ON ci.instance_id = a.instance_id
            JOIN salary s ON s.employment_id = a.employment_id AND s.is_current = 1
            WHERE a.instance_id = ?1
              AND ci.study_year = ?2
            "#,
            params![instance_id, study_year],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}
