// ==========================================
// 教学工作量分配系统 - 应用层
// ==========================================
// 职责: 启动装配与命令行外壳
// ==========================================

pub mod cli;
pub mod state;

// 重导出
pub use cli::CommandLineInterpreter;
pub use state::AppState;
