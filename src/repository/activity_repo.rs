// ==========================================
// 教学工作量分配系统 - 教学活动仓储
// ==========================================
// 职责: teaching_activity 表的行级原语
// 红线: Repository 不含业务逻辑
// ==========================================
// 说明: 原语以 &Connection 为参数（事务内传 &tx 即可），
//       由持久化网关负责事务边界
// ==========================================

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::TeachingActivity;
use crate::repository::error::RepositoryResult;

/// 教学活动仓储
pub struct ActivityRepository;

impl ActivityRepository {
    /// 按名称查询活动ID
    ///
    /// # 返回
    /// - Ok(Some(id)): 找到活动
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_id_by_name(conn: &Connection, activity_name: &str) -> RepositoryResult<Option<i64>> {
        let id = conn
            .query_row(
                "SELECT id FROM teaching_activity WHERE activity_name = ?1",
                params![activity_name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// 按名称查询完整活动行
    pub fn find_by_name(
        conn: &Connection,
        activity_name: &str,
    ) -> RepositoryResult<Option<TeachingActivity>> {
        let activity = conn
            .query_row(
                "SELECT id, activity_name FROM teaching_activity WHERE activity_name = ?1",
                params![activity_name],
                |row| {
                    Ok(TeachingActivity {
                        id: row.get(0)?,
                        activity_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(activity)
    }

    /// 按名称查询活动ID，不存在则创建
    ///
    /// Exercise 用例允许懒创建活动行；其余活动视为固定字典表
    pub fn find_or_create(conn: &Connection, activity_name: &str) -> RepositoryResult<i64> {
        if let Some(id) = Self::find_id_by_name(conn, activity_name)? {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO teaching_activity (activity_name) VALUES (?1)",
            params![activity_name],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
