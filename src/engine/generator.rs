// ==========================================
// 高校排课系统 - 排课生成引擎
// ==========================================
// 用途: 协调排课主流程的执行顺序
// 流程: 教务设置 -> 科目筛选 -> 教室池 -> 时段搜索 -> 落库
// 红线: 整个运行包在单个事务内（全有或全无）
// ==========================================

use crate::config::GenerationConfig;
use crate::domain::catalog::{Room, Subject};
use crate::domain::schedule::{ClassSection, ScheduleSlot, TimeInterval};
use crate::domain::settings::PortalSettings;
use crate::domain::types::{ScheduleOutcome, Semester, SlotDuration, Weekday};
use crate::engine::error::{GenerationError, GenerationResult};
use crate::engine::repositories::GenerationRepositories;
use crate::engine::rng::SlotRng;
use crate::engine::slot_search::SlotSearchEngine;
use crate::repository::{tx, RepositoryError};
use chrono::Local;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// Placement - 落位明细
// ==========================================
#[derive(Debug, Clone)]
pub struct Placement {
    pub room_id: String,        // 教室ID
    pub room_name: String,      // 教室名称
    pub day: Weekday,           // 上课星期
    pub interval: TimeInterval, // 上课区间
}

// ==========================================
// SubjectOutcome - 单科目排课结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SubjectOutcome {
    pub subject_code: String,          // 科目代码
    pub descriptive_title: String,     // 科目名称
    pub section: String,               // 班级段标签
    pub outcome: ScheduleOutcome,      // 落位结果
    pub placement: Option<Placement>,  // 落位明细（未排课时为 None）
    pub candidates_examined: usize,    // 检查过的候选数（可解释性）
}

// ==========================================
// GenerationReport - 排课运行报告
// ==========================================
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub course_code: String,           // 本次排课课程
    pub school_year: String,           // 学年
    pub semester: Semester,            // 学期
    pub outcomes: Vec<SubjectOutcome>, // 逐科目结果
}

impl GenerationReport {
    /// 成功落位的科目数
    pub fn scheduled_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == ScheduleOutcome::Scheduled)
            .count()
    }

    /// 未排课的科目数
    pub fn unscheduled_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == ScheduleOutcome::Unscheduled)
            .count()
    }
}

// ==========================================
// ClassGenerator - 排课生成引擎
// ==========================================

pub struct ClassGenerator {
    repos: GenerationRepositories,
    config: GenerationConfig,
    search: SlotSearchEngine,
}

impl ClassGenerator {
    /// 创建新的排课生成引擎
    ///
    /// # 参数
    /// - repos: 仓储集合（共享同一连接）
    /// - config: 排课参数
    pub fn new(repos: GenerationRepositories, config: GenerationConfig) -> Self {
        Self {
            repos,
            config,
            search: SlotSearchEngine::new(),
        }
    }

    /// 执行完整排课流程（单课程单学期）
    ///
    /// # 参数
    /// - course_code: 课程（专业）代码
    /// - rng: 随机源（教室/时长选取；相同种子可复现）
    ///
    /// # 返回
    /// 排课运行报告
    #[instrument(skip(self, rng), fields(course_code = %course_code))]
    pub fn generate(
        &self,
        course_code: &str,
        rng: &mut SlotRng,
    ) -> GenerationResult<GenerationReport> {
        // ==========================================
        // 步骤1: 教务设置解析
        // ==========================================
        debug!("步骤1: 读取教务设置");

        let settings = self.repos.settings_repo.load().map_err(|e| match e {
            RepositoryError::NotFound { .. } => GenerationError::SettingsMissing,
            other => GenerationError::Repository(other),
        })?;

        info!(
            school_year = %settings.school_year,
            semester = %settings.semester,
            "开始执行排课流程"
        );

        // ==========================================
        // 步骤2: 科目筛选
        // ==========================================
        debug!("步骤2: 按课程与学期筛选科目");

        let subjects = self
            .repos
            .subject_repo
            .find_by_course_and_semester(course_code, settings.semester)?;

        if subjects.is_empty() {
            warn!(course_code = %course_code, "本学期没有待排科目，运行结束");
            return Ok(GenerationReport {
                course_code: course_code.to_string(),
                school_year: settings.school_year,
                semester: settings.semester,
                outcomes: Vec::new(),
            });
        }

        info!(subjects_count = subjects.len(), "科目筛选完成");

        // ==========================================
        // 步骤3: 教室池加载与洗牌
        // ==========================================
        debug!("步骤3: 加载教室池");

        let mut rooms = self.repos.room_repo.find_all()?;

        if rooms.is_empty() {
            // 空教室池在任何写入发生前中止整个运行
            warn!("教室列表为空，排课中止");
            return Err(GenerationError::NoRoomsAvailable);
        }

        rng.shuffle(&mut rooms);

        info!(rooms_count = rooms.len(), "教室池加载完成");

        // ==========================================
        // 步骤4: 逐科目搜索并落库（单事务）
        // ==========================================
        debug!("步骤4: 逐科目时段搜索与落库");

        tx::begin_immediate(self.repos.conn())?;

        let outcomes = match self.schedule_subjects(course_code, &settings, &subjects, &rooms, rng)
        {
            Ok(outcomes) => outcomes,
            Err(e) => {
                tx::rollback(self.repos.conn());
                return Err(e);
            }
        };

        tx::commit(self.repos.conn())?;

        let report = GenerationReport {
            course_code: course_code.to_string(),
            school_year: settings.school_year,
            semester: settings.semester,
            outcomes,
        };

        info!(
            scheduled_count = report.scheduled_count(),
            unscheduled_count = report.unscheduled_count(),
            "排课流程完成"
        );

        Ok(report)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 逐科目执行随机选取 + 首次适配搜索 + 落库
    ///
    /// 随机消耗顺序固定（先教室后时长），保证相同种子可复现。
    fn schedule_subjects(
        &self,
        course_code: &str,
        settings: &PortalSettings,
        subjects: &[Subject],
        rooms: &[Room],
        rng: &mut SlotRng,
    ) -> GenerationResult<Vec<SubjectOutcome>> {
        let mut outcomes = Vec::with_capacity(subjects.len());

        for subject in subjects {
            // 随机选取教室与课时时长
            let room = &rooms[rng.next_usize(rooms.len())];
            let duration = self.pick_duration(rng);

            // 该教室全部已排时段（含本次运行已落位的，事务内可见）
            let existing = self.repos.schedule_repo.find_by_room(&room.room_id)?;

            let search_result = self.search.find_first_fit(&existing, duration, &self.config);

            // 每门科目每次运行生成一条班级记录（未落位也保留，便于人工补排）
            let section = self.create_class_section(subject, settings, course_code)?;

            match search_result.chosen {
                Some(candidate) => {
                    let slot = ScheduleSlot {
                        schedule_id: Uuid::new_v4().to_string(),
                        class_id: section.class_id.clone(),
                        room_id: room.room_id.clone(),
                        day_of_week: candidate.day,
                        start_min: candidate.interval.start_min,
                        end_min: candidate.interval.end_min,
                        created_at: Local::now().naive_local(),
                    };
                    self.repos.schedule_repo.insert(&slot)?;

                    info!(
                        subject_code = %subject.subject_code,
                        section = %section.section,
                        day = %candidate.day,
                        interval = %candidate.interval,
                        room_id = %room.room_id,
                        "科目落位成功"
                    );

                    outcomes.push(SubjectOutcome {
                        subject_code: subject.subject_code.clone(),
                        descriptive_title: subject.descriptive_title.clone(),
                        section: section.section.clone(),
                        outcome: ScheduleOutcome::Scheduled,
                        placement: Some(Placement {
                            room_id: room.room_id.clone(),
                            room_name: room.name.clone(),
                            day: candidate.day,
                            interval: candidate.interval,
                        }),
                        candidates_examined: search_result.candidates_examined,
                    });
                }
                None => {
                    // 候选耗尽: 告警并继续下一门科目，不视为致命
                    warn!(
                        subject_code = %subject.subject_code,
                        room_id = %room.room_id,
                        candidates_examined = search_result.candidates_examined,
                        "未找到无冲突时段，科目保持未排课"
                    );

                    outcomes.push(SubjectOutcome {
                        subject_code: subject.subject_code.clone(),
                        descriptive_title: subject.descriptive_title.clone(),
                        section: section.section.clone(),
                        outcome: ScheduleOutcome::Unscheduled,
                        placement: None,
                        candidates_examined: search_result.candidates_examined,
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// 随机选取课时时长
    fn pick_duration(&self, rng: &mut SlotRng) -> SlotDuration {
        let options = &self.config.duration_options;
        options[rng.next_usize(options.len())]
    }

    /// 创建并落库开课班级记录
    fn create_class_section(
        &self,
        subject: &Subject,
        settings: &PortalSettings,
        course_code: &str,
    ) -> GenerationResult<ClassSection> {
        let section = ClassSection {
            class_id: Uuid::new_v4().to_string(),
            subject_code: subject.subject_code.clone(),
            course_code: course_code.to_string(),
            year_level: subject.year_level,
            semester: settings.semester,
            school_year: settings.school_year.clone(),
            section: format!("{}{}", subject.year_level, self.config.section_label),
            created_at: Local::now().naive_local(),
        };

        self.repos.class_repo.insert(&section)?;

        Ok(section)
    }
}
