// ==========================================
// 命令行解释器测试
// ==========================================
// 职责: 验证命令解析、结果渲染与业务/存储错误的区分展示
// ==========================================


#[cfg(test)]
mod cli_interpreter_test {
    use std::io::Cursor;

    use course_alloc::app::{AppState, CommandLineInterpreter};
    use course_alloc::config::AppConfig;
    use tempfile::NamedTempFile;

    use crate::test_helpers::{create_test_db, seed_activity, seed_instance};

    fn setup_test_env() -> (NamedTempFile, String, AppState) {
        let (temp_file, db_path) = create_test_db().unwrap();
        let config = AppConfig {
            db_path: db_path.clone(),
            busy_timeout_ms: 1_000,
        };
        let state = AppState::new(&config).unwrap();
        (temp_file, db_path, state)
    }

    fn run_commands(state: &AppState, script: &str) -> String {
        let interpreter = CommandLineInterpreter::new(state);
        let mut output = Vec::new();
        interpreter
            .run(Cursor::new(script.to_string()), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_students_command_round_trip() {
        let (_temp_file, db_path, state) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);

        let output = run_commands(&state, "students 2025-50273 12\nstudents 2025-50273 -12\nquit\n");
        assert!(output.contains("学生数更新为 42"), "输出: {}", output);
        assert!(output.contains("学生数更新为 30"), "输出: {}", output);
    }

    #[test]
    fn test_allocate_and_exercise_commands() {
        let (_temp_file, db_path, state) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);
        seed_activity(&db_path, "Lecture");

        let output = run_commands(
            &state,
            "allocate 2025-50273 T1 Lecture 20\nexercise 2025-50273 T1 6\nquit\n",
        );
        assert!(output.contains("已分配"), "输出: {}", output);
        assert!(output.contains("\"activity_name\": \"Exercise\""), "输出: {}", output);
    }

    /// 业务错误带 [业务] 前缀渲染，而不是当作存储故障
    #[test]
    fn test_business_errors_rendered_distinctly() {
        let (_temp_file, db_path, state) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);

        let output = run_commands(&state, "allocate 2025-50273 T1 Seminar 10\nquit\n");
        assert!(output.contains("[业务]"), "输出: {}", output);
        assert!(output.contains("教学活动不存在"), "输出: {}", output);
    }

    #[test]
    fn test_unknown_command_shows_hint() {
        let (_temp_file, _db_path, state) = setup_test_env();
        let output = run_commands(&state, "frobnicate\nquit\n");
        assert!(output.contains("无法识别的命令"), "输出: {}", output);
    }
}
