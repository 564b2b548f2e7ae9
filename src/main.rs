// ==========================================
// 教学工作量分配系统 - 命令行主入口
// ==========================================
// 技术栈: Rust + SQLite
// ==========================================

use std::io::{self, BufReader};

use anyhow::Context;

use course_alloc::app::{AppState, CommandLineInterpreter};
use course_alloc::config::AppConfig;
use course_alloc::logging;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("教学工作量分配系统");
    tracing::info!("系统版本: {}", course_alloc::VERSION);
    tracing::info!("==================================================");

    // 解析配置
    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    // 初始化应用状态（含连接自检）
    let state = AppState::new(&config).context("无法初始化应用状态")?;
    tracing::info!("应用状态初始化成功");

    // 启动命令行解释器
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let interpreter = CommandLineInterpreter::new(&state);
    interpreter
        .run(BufReader::new(stdin.lock()), &mut stdout)
        .context("命令行解释器异常退出")?;

    tracing::info!("再见");
    Ok(())
}
