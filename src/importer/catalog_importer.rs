// ==========================================
// 高校排课系统 - 教学目录导入器
// ==========================================
// 职责: 科目/教室 CSV 导入（字段映射 + 数据质量检查 + 落库）
// 策略: 问题行跳过并记录原因，合法行批量落库（单事务）
// ==========================================

use crate::domain::catalog::{Room, Subject};
use crate::domain::types::Semester;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, FileParser};
use crate::repository::{RoomRepository, SubjectRepository};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 年级合法范围
const YEAR_LEVEL_MIN: i32 = 1;
const YEAR_LEVEL_MAX: i32 = 6;

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub total_rows: usize,                // 文件内数据行总数
    pub success: usize,                   // 成功落库行数
    pub skipped: Vec<(usize, String)>,    // (行号, 跳过原因)
}

// ==========================================
// CatalogImporter - 目录导入器
// ==========================================
pub struct CatalogImporter {
    subject_repo: Arc<SubjectRepository>,
    room_repo: Arc<RoomRepository>,
    parser: CsvParser,
}

impl CatalogImporter {
    /// 创建新的目录导入器
    pub fn new(subject_repo: Arc<SubjectRepository>, room_repo: Arc<RoomRepository>) -> Self {
        Self {
            subject_repo,
            room_repo,
            parser: CsvParser,
        }
    }

    // ==========================================
    // 科目导入
    // ==========================================

    /// 从 CSV 导入科目
    ///
    /// 表头: subject_code, descriptive_title, course_code, semester, year_level, units
    ///
    /// # 返回
    /// 导入汇总（问题行记入 skipped，不中断整个文件）
    pub fn import_subjects_from_csv<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportSummary> {
        let records = self
            .parser
            .parse_to_raw_records(path.as_ref())
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?;

        let total_rows = records.len();
        let mut subjects = Vec::new();
        let mut skipped = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let row_no = idx + 2; // 表头占第 1 行
            match map_subject_record(row_no, record) {
                Ok(subject) => subjects.push(subject),
                Err(e) => {
                    warn!(row = row_no, reason = %e, "科目行被跳过");
                    skipped.push((row_no, e.to_string()));
                }
            }
        }

        let success = self.subject_repo.upsert_batch(&subjects)?;

        info!(
            total_rows = total_rows,
            success = success,
            skipped = skipped.len(),
            "科目导入完成"
        );

        Ok(ImportSummary {
            total_rows,
            success,
            skipped,
        })
    }

    // ==========================================
    // 教室导入
    // ==========================================

    /// 从 CSV 导入教室
    ///
    /// 表头: room_id, name, capacity（capacity 可为空）
    pub fn import_rooms_from_csv<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportSummary> {
        let records = self
            .parser
            .parse_to_raw_records(path.as_ref())
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?;

        let total_rows = records.len();
        let mut rooms = Vec::new();
        let mut skipped = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let row_no = idx + 2;
            match map_room_record(row_no, record) {
                Ok(room) => rooms.push(room),
                Err(e) => {
                    warn!(row = row_no, reason = %e, "教室行被跳过");
                    skipped.push((row_no, e.to_string()));
                }
            }
        }

        let success = self.room_repo.upsert_batch(&rooms)?;

        info!(
            total_rows = total_rows,
            success = success,
            skipped = skipped.len(),
            "教室导入完成"
        );

        Ok(ImportSummary {
            total_rows,
            success,
            skipped,
        })
    }
}

// ==========================================
// 字段映射
// ==========================================

/// 读取必填字段
fn required_field<'a>(
    row_no: usize,
    record: &'a HashMap<String, String>,
    field: &str,
) -> ImportResult<&'a str> {
    match record.get(field).map(|s| s.trim()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ImportError::FieldMappingError {
            row: row_no,
            message: format!("缺少必填字段 {}", field),
        }),
    }
}

/// 科目行映射
fn map_subject_record(row_no: usize, record: &HashMap<String, String>) -> ImportResult<Subject> {
    // 主键列存在但值为空与列缺失分开报告
    let subject_code = match record.get("subject_code").map(|s| s.trim()) {
        Some(v) if !v.is_empty() => v,
        Some(_) => return Err(ImportError::PrimaryKeyMissing(row_no)),
        None => {
            return Err(ImportError::FieldMappingError {
                row: row_no,
                message: "缺少必填字段 subject_code".to_string(),
            })
        }
    };

    let descriptive_title = required_field(row_no, record, "descriptive_title")?;
    let course_code = required_field(row_no, record, "course_code")?;

    let semester_raw = required_field(row_no, record, "semester")?;
    let semester = Semester::parse(semester_raw).ok_or_else(|| ImportError::TypeConversionError {
        row: row_no,
        field: "semester".to_string(),
        message: format!("非法学期值: {}", semester_raw),
    })?;

    let year_level: i32 = required_field(row_no, record, "year_level")?
        .parse()
        .map_err(|e| ImportError::TypeConversionError {
            row: row_no,
            field: "year_level".to_string(),
            message: format!("{}", e),
        })?;
    if !(YEAR_LEVEL_MIN..=YEAR_LEVEL_MAX).contains(&year_level) {
        return Err(ImportError::ValueRangeError {
            row: row_no,
            field: "year_level".to_string(),
            value: year_level as f64,
            min: YEAR_LEVEL_MIN as f64,
            max: YEAR_LEVEL_MAX as f64,
        });
    }

    let units: f64 = required_field(row_no, record, "units")?
        .parse()
        .map_err(|e| ImportError::TypeConversionError {
            row: row_no,
            field: "units".to_string(),
            message: format!("{}", e),
        })?;

    Ok(Subject {
        subject_code: subject_code.to_string(),
        descriptive_title: descriptive_title.to_string(),
        course_code: course_code.to_string(),
        semester,
        year_level,
        units,
    })
}

/// 教室行映射
fn map_room_record(row_no: usize, record: &HashMap<String, String>) -> ImportResult<Room> {
    let room_id = required_field(row_no, record, "room_id")?;
    let name = required_field(row_no, record, "name")?;

    // capacity 可缺省
    let capacity = match record.get("capacity").map(|s| s.trim()) {
        Some(v) if !v.is_empty() => {
            let parsed: i32 = v.parse().map_err(|e| ImportError::TypeConversionError {
                row: row_no,
                field: "capacity".to_string(),
                message: format!("{}", e),
            })?;
            Some(parsed)
        }
        _ => None,
    };

    Ok(Room {
        room_id: room_id.to_string(),
        name: name.to_string(),
        capacity,
    })
}
