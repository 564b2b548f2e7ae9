// ==========================================
// 课程 API 测试
// ==========================================
// 职责: 验证成本计算公式、缺数据语义与学生数读-改-写
// ==========================================


#[cfg(test)]
mod course_api_test {
    use course_alloc::api::{AllocateTeachingRequest, ApiError};
    use course_alloc::db::DEFAULT_BUSY_TIMEOUT_MS;
    use course_alloc::repository::Database;
    use course_alloc::{AllocationApi, CourseApi};
    use tempfile::NamedTempFile;

    use crate::test_helpers::{create_test_db, seed_activity, seed_instance, seed_salary};

    // ==========================================
    // 测试辅助函数
    // ==========================================

    /// 创建测试环境: 临时库 + 两个API
    fn setup_test_env() -> (NamedTempFile, String, CourseApi, AllocationApi) {
        let (temp_file, db_path) = create_test_db().unwrap();
        let db = Database::open(&db_path, DEFAULT_BUSY_TIMEOUT_MS).unwrap();
        let course_api = CourseApi::new(db.clone());
        let allocation_api = AllocationApi::new(db);
        (temp_file, db_path, course_api, allocation_api)
    }

    // ==========================================
    // 测试1: 成本计算
    // ==========================================

    /// 规范算例: 40 课时 × 平均时薪 500 -> 计划成本 20.0 kSEK，无分配 -> 实际成本 0.0
    #[test]
    fn test_planned_cost_worked_example() {
        let (_temp_file, db_path, course_api, allocation_api) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);
        seed_activity(&db_path, "Lecture");
        seed_salary(&db_path, "T1", 400.0);
        seed_salary(&db_path, "T2", 600.0);

        // 计划 40 课时（由 T9 挂上计划后立即撤销分配，只留计划行）
        allocation_api
            .allocate_teaching(&AllocateTeachingRequest {
                instance_id: "2025-50273".to_string(),
                employment_id: "T9".to_string(),
                activity_name: "Lecture".to_string(),
                hours: 40.0,
            })
            .unwrap();
        allocation_api
            .deallocate_teaching("2025-50273", "T9", "Lecture")
            .unwrap();

        let cost = course_api
            .compute_course_cost_for_year("2025-50273", 2025)
            .unwrap();
        assert_eq!(cost.course_code, "IV1351");
        assert_eq!(cost.instance_id, "2025-50273");
        assert_eq!(cost.period, "P1");
        // 40 × (400+600)/2 / 1000 = 20.0
        assert!((cost.planned_cost_ksek - 20.0).abs() < 1e-9);
        assert!((cost.actual_cost_ksek - 0.0).abs() < 1e-9);
    }

    /// 实际成本按每位教师自己的时薪加权
    #[test]
    fn test_actual_cost_uses_per_teacher_salary() {
        let (_temp_file, db_path, course_api, allocation_api) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);
        seed_activity(&db_path, "Lecture");
        seed_activity(&db_path, "Tutorial");
        seed_salary(&db_path, "T1", 400.0);
        seed_salary(&db_path, "T2", 600.0);

        // T1: 10 课时 × 400，T2: 5 课时 × 600
        allocation_api
            .allocate_teaching(&AllocateTeachingRequest {
                instance_id: "2025-50273".to_string(),
                employment_id: "T1".to_string(),
                activity_name: "Lecture".to_string(),
                hours: 10.0,
            })
            .unwrap();
        allocation_api
            .allocate_teaching(&AllocateTeachingRequest {
                instance_id: "2025-50273".to_string(),
                employment_id: "T2".to_string(),
                activity_name: "Tutorial".to_string(),
                hours: 5.0,
            })
            .unwrap();

        let cost = course_api
            .compute_course_cost_for_year("2025-50273", 2025)
            .unwrap();
        // (10×400 + 5×600) / 1000 = 7.0
        assert!((cost.actual_cost_ksek - 7.0).abs() < 1e-9);
    }

    /// 该学年无计划课时数据 -> NotFound
    #[test]
    fn test_cost_without_planned_data_is_not_found() {
        let (_temp_file, db_path, course_api, _allocation_api) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);
        seed_salary(&db_path, "T1", 500.0);

        let err = course_api
            .compute_course_cost_for_year("2025-50273", 2025)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "实际: {:?}", err);
    }

    /// 完全没有当前薪资行 -> AggregationError
    #[test]
    fn test_cost_without_salary_data_is_aggregation_error() {
        let (_temp_file, db_path, course_api, allocation_api) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);
        seed_activity(&db_path, "Lecture");
        allocation_api
            .allocate_teaching(&AllocateTeachingRequest {
                instance_id: "2025-50273".to_string(),
                employment_id: "T1".to_string(),
                activity_name: "Lecture".to_string(),
                hours: 40.0,
            })
            .unwrap();

        let err = course_api
            .compute_course_cost_for_year("2025-50273", 2025)
            .unwrap_err();
        assert!(matches!(err, ApiError::AggregationError(_)), "实际: {:?}", err);
    }

    /// 计划数据属于其他学年 -> 当年视为无数据
    #[test]
    fn test_cost_restricted_to_requested_year() {
        let (_temp_file, db_path, course_api, allocation_api) = setup_test_env();
        seed_instance(&db_path, "2024-50273", "IV1351", 2024, "P1", 30);
        seed_activity(&db_path, "Lecture");
        seed_salary(&db_path, "T1", 500.0);
        allocation_api
            .allocate_teaching(&AllocateTeachingRequest {
                instance_id: "2024-50273".to_string(),
                employment_id: "T1".to_string(),
                activity_name: "Lecture".to_string(),
                hours: 40.0,
            })
            .unwrap();

        let err = course_api
            .compute_course_cost_for_year("2024-50273", 2025)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "实际: {:?}", err);
    }

    #[test]
    fn test_cost_unknown_instance_is_not_found() {
        let (_temp_file, _db_path, course_api, _allocation_api) = setup_test_env();
        let err = course_api
            .compute_course_cost_for_year("2025-00000", 2025)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "实际: {:?}", err);
    }

    // ==========================================
    // 测试2: 学生数调整
    // ==========================================

    /// +delta 后 -delta 恢复原值（往返）
    #[test]
    fn test_increase_students_round_trip() {
        let (_temp_file, db_path, course_api, _allocation_api) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 30);

        let up = course_api.increase_students("2025-50273", 12).unwrap();
        assert_eq!(up, 42);

        let down = course_api.increase_students("2025-50273", -12).unwrap();
        assert_eq!(down, 30);
    }

    /// 允许负的结果学生数（既有行为，不做零下限钳制）
    #[test]
    fn test_increase_students_allows_negative_result() {
        let (_temp_file, db_path, course_api, _allocation_api) = setup_test_env();
        seed_instance(&db_path, "2025-50273", "IV1351", 2025, "P1", 5);

        let n = course_api.increase_students("2025-50273", -8).unwrap();
        assert_eq!(n, -3);
    }

    #[test]
    fn test_increase_students_unknown_instance_is_not_found() {
        let (_temp_file, _db_path, course_api, _allocation_api) = setup_test_env();
        let err = course_api.increase_students("2025-00000", 1).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "实际: {:?}", err);
    }
}
