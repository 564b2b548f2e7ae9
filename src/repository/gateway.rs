// ==========================================
// 教学工作量分配系统 - 持久化网关
// ==========================================
// 职责: 持有唯一数据库会话，提供统一的事务包装
// 红线: 所有多语句用例必须经由 run_in_transaction 组合，
//       不允许在事务外部分写入
// ==========================================

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::sync::{Arc, Mutex};

use crate::db;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// Database - 持久化网关
// ==========================================

/// 持久化网关
///
/// 职责：
/// 1. 持有共享数据库连接 (Arc<Mutex<Connection>>)
/// 2. 事务包装: 成功提交，任何错误回滚
/// 3. 连接自检
///
/// 并发说明：
/// - 事务以 BEGIN IMMEDIATE 开启，入口即持有写锁。
///   配额检查 (count) 与后续写入因此对并发分配方原子，
///   等价于规范要求的"锁定读"。
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// 打开数据库并创建网关实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - busy_timeout_ms: busy_timeout（毫秒）
    ///
    /// # 返回
    /// - Ok(Database): 网关实例
    /// - Err: 数据库连接错误
    pub fn open(db_path: &str, busy_timeout_ms: u64) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path, busy_timeout_ms)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        // schema 版本提示（不做自动迁移）
        match db::read_schema_version(&conn) {
            Ok(Some(v)) if v != db::CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    found = v,
                    expected = db::CURRENT_SCHEMA_VERSION,
                    "schema_version 与当前代码不一致"
                );
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!("数据库缺少 schema_version 表，可能尚未初始化");
            }
            Err(e) => {
                tracing::warn!("读取 schema_version 失败: {}", e);
            }
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建网关实例（测试/组合用）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 连接自检（SELECT 1）
    pub fn test_connection(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let one: i64 = conn
            .query_row("SELECT 1", [], |row| row.get(0))
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        if one != 1 {
            return Err(RepositoryError::DatabaseConnectionError(
                "连接自检返回异常值".to_string(),
            ));
        }
        tracing::debug!("数据库连接自检通过");
        Ok(())
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在单个事务中执行 action
    ///
    /// 语义：
    /// - BEGIN IMMEDIATE 开启事务（入口即取写锁，阻塞到 busy_timeout）
    /// - action 返回 Ok -> COMMIT
    /// - action 返回 Err（含业务性拒绝，如教师超载）-> ROLLBACK 后原样传播
    ///
    /// # 参数
    /// - action: 在事务内执行的行操作组合，接收 &Transaction
    ///
    /// # 返回
    /// - Ok(T): action 的结果（已提交）
    /// - Err(E): action 的错误或事务本身的错误（已回滚）
    pub fn run_in_transaction<T, E, F>(&self, action: F) -> Result<T, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    {
        let mut conn = self.get_conn().map_err(E::from)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| E::from(RepositoryError::DatabaseTransactionError(e.to_string())))?;

        match action(&tx) {
            Ok(value) => {
                tx.commit().map_err(|e| {
                    E::from(RepositoryError::DatabaseTransactionError(e.to_string()))
                })?;
                Ok(value)
            }
            Err(e) => {
                // 显式回滚；回滚本身失败只记日志，保留原始错误
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!("事务回滚失败: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
