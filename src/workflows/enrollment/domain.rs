use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::catalog::{
    AcademicLevelId, AreaId, ClassId, CourseId, DisciplineId, LectiveYearId, StudentId,
};

/// Identifier wrapper for transfer cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(pub String);

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for curricula (class plans).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurriculumId(pub String);

impl fmt::Display for CurriculumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for scheduled class sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the student moves within the institution or arrives from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    Internal,
    External,
}

/// Where the transferring student is heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentTarget {
    pub lective_year: LectiveYearId,
    pub academic_level: AcademicLevelId,
    pub area: AreaId,
    pub course: CourseId,
    pub class: ClassId,
}

/// Snapshot of one prior discipline result, frozen at transfer-record
/// creation time. Unique per (transfer, discipline, class).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferDiscipline {
    pub discipline: DisciplineId,
    pub class: ClassId,
    pub average: f32,
}

/// A transferring student's case: target slot plus the frozen discipline
/// history the equivalence resolver reads. Unique per (lective year,
/// academic level, course, class, student).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: TransferId,
    pub student: StudentId,
    pub kind: TransferKind,
    pub target: EnrollmentTarget,
    pub disciplines: Vec<TransferDiscipline>,
}

/// Membership of a discipline in a curriculum's class plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumDiscipline {
    pub discipline: DisciplineId,
    pub mandatory: bool,
    /// Minimum passing average; a recorded average strictly below this means
    /// the discipline must be retaken.
    pub min_average: f32,
}

/// A course's class plan for one (area, course), with the class level new
/// placements default to when no prior match pins one down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    pub id: CurriculumId,
    pub area: AreaId,
    pub course: CourseId,
    pub default_class: ClassId,
    pub disciplines: Vec<CurriculumDiscipline>,
}

/// A scheduled offering of a curriculum for one lective year and class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSection {
    pub id: SectionId,
    pub curriculum: CurriculumId,
    pub lective_year: LectiveYearId,
    pub class: ClassId,
    pub capacity: u32,
    pub open: bool,
}

/// Enrollment lifecycle states. Only `Enrolled` is written today; the enum
/// leaves room for suspension and completion states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    Enrolled,
}

/// How the student reached the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentKind {
    Candidate,
    Transferred,
}

impl EnrollmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            EnrollmentKind::Candidate => "candidate",
            EnrollmentKind::Transferred => "transferred",
        }
    }
}

/// A student's placement in a class section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEnrollment {
    pub section: SectionId,
    pub student: StudentId,
    pub state: EnrollmentState,
    pub kind: EnrollmentKind,
    pub enrolled_on: NaiveDate,
}

/// A student's enrollment in one discipline within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineEnrollment {
    pub section: SectionId,
    pub student: StudentId,
    pub discipline: DisciplineId,
    pub state: EnrollmentState,
}
