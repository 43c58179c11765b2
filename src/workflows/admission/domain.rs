use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::catalog::{
    AcademicLevelId, AreaId, ClassId, CourseId, LectiveYearId, PersonId,
};

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for admission criteria records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriteriaId(pub String);

impl fmt::Display for CriteriaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for admission phases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub String);

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bounded admission window within a lective year. `ordinal` orders phases
/// so "criteria phase covers application phase" is a typed comparison instead
/// of a row lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    pub ordinal: u8,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Phase {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Criteria defined in this phase govern applications submitted in
    /// `applied_in` when their phase does not precede the application's.
    pub fn covers(&self, applied_in: &Phase) -> bool {
        self.ordinal >= applied_in.ordinal
    }
}

/// A scored individual competing for seats. The certificate average carries
/// one decimal on a 10..=20 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub person: PersonId,
    pub birth_date: NaiveDate,
    pub average: f32,
    pub academic_level: AcademicLevelId,
    pub area: AreaId,
    pub course: CourseId,
    pub institution: String,
}

impl Candidate {
    /// Whole years of age on the given date. Derived at evaluation time,
    /// never stored.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birth_date).unwrap_or(0)
    }
}

/// The tuple an application and a criteria record are matched on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdmissionScope {
    pub lective_year: LectiveYearId,
    pub academic_level: AcademicLevelId,
    pub area: AreaId,
    pub course: CourseId,
}

impl fmt::Display for AdmissionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.lective_year, self.academic_level, self.area, self.course
        )
    }
}

/// A candidate's request for a seat in one (phase, scope, class) slot.
/// Unique per (candidate, course, phase, lective year); `evaluated` flips
/// only when an admission is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate: CandidateId,
    pub scope: AdmissionScope,
    pub class: ClassId,
    pub phase: PhaseId,
    #[serde(default)]
    pub evaluated: bool,
}

/// Eligibility thresholds and the seat limit for one admission scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionCriteria {
    pub id: CriteriaId,
    pub name: String,
    pub scope: AdmissionScope,
    pub class: ClassId,
    pub phase: PhaseId,
    pub max_age: u32,
    pub min_average: f32,
    pub student_limit: u32,
}

impl AdmissionCriteria {
    /// Intake invariants: a positive seat limit and an average threshold on
    /// the 10..=20 certificate scale.
    pub fn validate(&self) -> Result<(), InvalidCriteria> {
        if self.student_limit == 0 {
            return Err(InvalidCriteria::ZeroSeatLimit {
                criteria: self.id.clone(),
            });
        }
        if !(10.0..=20.0).contains(&self.min_average) {
            return Err(InvalidCriteria::AverageOutOfScale {
                criteria: self.id.clone(),
                min_average: self.min_average,
            });
        }
        Ok(())
    }
}

/// Rejected criteria definitions never reach the evaluator.
#[derive(Debug, thiserror::Error)]
pub enum InvalidCriteria {
    #[error("criteria {criteria} must allow at least one seat")]
    ZeroSeatLimit { criteria: CriteriaId },
    #[error("criteria {criteria} minimum average {min_average} is outside the 10..=20 scale")]
    AverageOutOfScale { criteria: CriteriaId, min_average: f32 },
}

/// Outcome of matching one application against one criteria record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionOutcome {
    Admitted,
    NotAdmitted,
}

impl AdmissionOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            AdmissionOutcome::Admitted => "admitted",
            AdmissionOutcome::NotAdmitted => "not_admitted",
        }
    }
}

/// Write-once record of evaluating one application against one criteria.
/// Unique per (application, criteria).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResult {
    pub application: ApplicationId,
    pub criteria: CriteriaId,
    pub outcome: AdmissionOutcome,
    pub phase: PhaseId,
    pub lective_year: LectiveYearId,
}
