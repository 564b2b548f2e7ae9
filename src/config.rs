// ==========================================
// 教学工作量分配系统 - 运行配置
// ==========================================
// 职责: 解析数据库路径与连接参数
// 来源: 环境变量优先，其次用户数据目录默认值
// ==========================================

use std::path::PathBuf;

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;

/// 运行配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// 连接 busy_timeout（毫秒）
    pub busy_timeout_ms: u64,
}

impl AppConfig {
    /// 从环境变量解析配置
    ///
    /// # 环境变量
    /// - COURSE_ALLOC_DB_PATH: 数据库文件路径（默认: 用户数据目录下 course_alloc.db）
    /// - COURSE_ALLOC_BUSY_TIMEOUT_MS: busy_timeout 毫秒数（默认: 5000）
    pub fn from_env() -> Self {
        let busy_timeout_ms = std::env::var("COURSE_ALLOC_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);

        Self {
            db_path: get_default_db_path(),
            busy_timeout_ms,
        }
    }
}

/// 获取默认数据库路径
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("COURSE_ALLOC_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 使用用户数据目录，先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./course_alloc.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("course-alloc");
        // 确保目录存在
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("course_alloc.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_from_env_defaults() {
        let config = AppConfig::from_env();
        assert!(config.busy_timeout_ms > 0);
    }
}
