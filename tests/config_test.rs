// ==========================================
// 配置层集成测试
// ==========================================
// 测试目标: 缺省值 / 覆盖 / 非法值报错
// ==========================================

mod test_helpers;

use course_scheduling_aps::config::{ConfigManager, GenerationConfig};
use course_scheduling_aps::domain::types::{SlotDuration, Weekday};

#[test]
fn test_defaults_when_config_kv_empty() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    let config = manager.load_generation_config().unwrap();
    let defaults = GenerationConfig::default();

    assert_eq!(config.candidate_days, defaults.candidate_days);
    assert_eq!(config.earliest_start_hour, 8);
    assert_eq!(config.latest_start_hour, 16);
    assert_eq!(config.latest_end_min, 1080);
    assert_eq!(
        config.duration_options,
        vec![SlotDuration::Sixty, SlotDuration::Ninety]
    );
    assert_eq!(config.section_label, "A");
}

#[test]
fn test_stored_overrides_are_applied() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::set_global_config(&conn, "candidate_days", "MONDAY,WEDNESDAY,FRIDAY").unwrap();
    test_helpers::set_global_config(&conn, "duration_options", "90").unwrap();
    test_helpers::set_global_config(&conn, "latest_start_hour", "14").unwrap();
    test_helpers::set_global_config(&conn, "section_label", "B").unwrap();
    drop(conn);

    let manager = ConfigManager::new(&db_path).unwrap();
    let config = manager.load_generation_config().unwrap();

    assert_eq!(
        config.candidate_days,
        vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
    );
    assert_eq!(config.duration_options, vec![SlotDuration::Ninety]);
    assert_eq!(config.latest_start_hour, 14);
    assert_eq!(config.section_label, "B");

    // 候选整点随 latest_start_hour 收缩
    assert_eq!(config.candidate_start_minutes().last(), Some(&(14 * 60)));
}

#[test]
fn test_invalid_stored_day_is_an_error() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::set_global_config(&conn, "candidate_days", "MONDAY,SUNDAY").unwrap();
    drop(conn);

    let manager = ConfigManager::new(&db_path).unwrap();
    // SUNDAY 不在候选集合内: 不静默回退, 直接报错
    assert!(manager.load_generation_config().is_err());
}

#[test]
fn test_invalid_duration_is_an_error() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::set_global_config(&conn, "duration_options", "60,45").unwrap();
    drop(conn);

    let manager = ConfigManager::new(&db_path).unwrap();
    assert!(manager.load_generation_config().is_err());
}

#[test]
fn test_inverted_hour_range_is_an_error() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::set_global_config(&conn, "earliest_start_hour", "17").unwrap();
    test_helpers::set_global_config(&conn, "latest_start_hour", "9").unwrap();
    drop(conn);

    let manager = ConfigManager::new(&db_path).unwrap();
    assert!(manager.load_generation_config().is_err());
}
