//! Shared fixtures: a two-discipline physics curriculum defaulting to
//! class-10 and transfer records in the 2026-2027 lective year.

use chrono::NaiveDate;

use crate::workflows::catalog::{
    AcademicLevelId, AreaId, ClassId, CourseId, DisciplineId, LectiveYearId, StudentId,
};
use crate::workflows::enrollment::domain::{
    ClassSection, Curriculum, CurriculumDiscipline, CurriculumId, EnrollmentTarget, SectionId,
    TransferDiscipline, TransferId, TransferKind, TransferRecord,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn today() -> NaiveDate {
    date(2026, 9, 1)
}

pub fn student(id: &str) -> StudentId {
    StudentId(id.to_string())
}

pub fn target(class: &str) -> EnrollmentTarget {
    EnrollmentTarget {
        lective_year: LectiveYearId("2026-2027".to_string()),
        academic_level: AcademicLevelId("secondary".to_string()),
        area: AreaId("science".to_string()),
        course: CourseId("physics".to_string()),
        class: ClassId(class.to_string()),
    }
}

pub fn requirement(discipline: &str, mandatory: bool, min_average: f32) -> CurriculumDiscipline {
    CurriculumDiscipline {
        discipline: DisciplineId(discipline.to_string()),
        mandatory,
        min_average,
    }
}

pub fn history(discipline: &str, class: &str, average: f32) -> TransferDiscipline {
    TransferDiscipline {
        discipline: DisciplineId(discipline.to_string()),
        class: ClassId(class.to_string()),
        average,
    }
}

pub fn curriculum(disciplines: Vec<CurriculumDiscipline>) -> Curriculum {
    Curriculum {
        id: CurriculumId("curr-1".to_string()),
        area: AreaId("science".to_string()),
        course: CourseId("physics".to_string()),
        default_class: ClassId("class-10".to_string()),
        disciplines,
    }
}

pub fn transfer(
    id: &str,
    student_id: &str,
    class: &str,
    disciplines: Vec<TransferDiscipline>,
) -> TransferRecord {
    TransferRecord {
        id: TransferId(id.to_string()),
        student: student(student_id),
        kind: TransferKind::External,
        target: target(class),
        disciplines,
    }
}

pub fn section(id: &str, class: &str, capacity: u32, open: bool) -> ClassSection {
    ClassSection {
        id: SectionId(id.to_string()),
        curriculum: CurriculumId("curr-1".to_string()),
        lective_year: LectiveYearId("2026-2027".to_string()),
        class: ClassId(class.to_string()),
        capacity,
        open,
    }
}
