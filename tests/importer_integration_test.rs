// ==========================================
// 导入层集成测试
// ==========================================
// 测试目标: 验证 CSV → 字段映射 → 落库 全流程
// ==========================================

mod test_helpers;

use course_scheduling_aps::domain::types::Semester;
use course_scheduling_aps::importer::CatalogImporter;
use course_scheduling_aps::repository::{RoomRepository, SubjectRepository};
use std::io::Write;
use std::sync::Arc;
use tempfile::Builder;

fn create_csv(content: &str) -> tempfile::NamedTempFile {
    let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

fn create_importer(db_path: &str) -> (CatalogImporter, Arc<SubjectRepository>, Arc<RoomRepository>) {
    let subject_repo = Arc::new(SubjectRepository::new(db_path).unwrap());
    let room_repo = Arc::new(RoomRepository::new(db_path).unwrap());
    let importer = CatalogImporter::new(subject_repo.clone(), room_repo.clone());
    (importer, subject_repo, room_repo)
}

#[test]
fn test_import_subjects_full_flow() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let (importer, subject_repo, _room_repo) = create_importer(&db_path);

    let csv = create_csv(
        "subject_code,descriptive_title,course_code,semester,year_level,units\n\
         IT101,Introduction to Computing,BSIT,FIRST,1,3\n\
         IT102,Computer Programming 1,BSIT,FIRST,1,3\n\
         ,missing code row,BSIT,FIRST,1,3\n\
         IT999,Bad Semester,BSIT,THIRD,1,3\n\
         IT888,Bad Year,BSIT,FIRST,9,3\n",
    );

    let summary = importer.import_subjects_from_csv(csv.path()).unwrap();

    assert_eq!(summary.total_rows, 5);
    assert_eq!(summary.success, 2);
    assert_eq!(summary.skipped.len(), 3);

    // 只有合法行落库
    let subjects = subject_repo
        .find_by_course_and_semester("BSIT", Semester::First)
        .unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].subject_code, "IT101");
    assert_eq!(subjects[0].descriptive_title, "Introduction to Computing");
}

#[test]
fn test_import_subjects_is_upsert() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let (importer, subject_repo, _room_repo) = create_importer(&db_path);

    let first = create_csv(
        "subject_code,descriptive_title,course_code,semester,year_level,units\n\
         IT101,Old Title,BSIT,FIRST,1,3\n",
    );
    importer.import_subjects_from_csv(first.path()).unwrap();

    let second = create_csv(
        "subject_code,descriptive_title,course_code,semester,year_level,units\n\
         IT101,New Title,BSIT,FIRST,1,3\n",
    );
    importer.import_subjects_from_csv(second.path()).unwrap();

    let subjects = subject_repo
        .find_by_course_and_semester("BSIT", Semester::First)
        .unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].descriptive_title, "New Title");
}

#[test]
fn test_import_rooms_with_optional_capacity() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let (importer, _subject_repo, room_repo) = create_importer(&db_path);

    let csv = create_csv(
        "room_id,name,capacity\n\
         RM-101,Main 101,45\n\
         RM-102,Main 102,\n\
         ,Nameless,30\n",
    );

    let summary = importer.import_rooms_from_csv(csv.path()).unwrap();

    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.success, 2);
    assert_eq!(summary.skipped.len(), 1);

    let rooms = room_repo.find_all().unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].capacity, Some(45));
    assert_eq!(rooms[1].capacity, None);
}

#[test]
fn test_import_missing_file_is_error() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let (importer, _subject_repo, _room_repo) = create_importer(&db_path);

    let result = importer.import_subjects_from_csv("definitely_not_here.csv");
    assert!(result.is_err());
}
