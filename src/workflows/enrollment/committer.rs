//! Seat-capacity-checked class placement plus per-discipline enrollment.
//! The seat check re-reads the committed enrollment count, the same pattern
//! the admission capacity ledger uses for criteria.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{
    ClassEnrollment, ClassSection, CurriculumDiscipline, DisciplineEnrollment, EnrollmentKind,
    EnrollmentState, SectionId, TransferId,
};
use super::repository::EnrollmentRepository;
use crate::repository::{Clock, RepositoryError};
use crate::workflows::catalog::{AreaId, ClassId, CourseId, DisciplineId, LectiveYearId, StudentId};

/// Errors raised on the enrollment path. All abort the current operation.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    #[error("class section {section} is closed")]
    ClassClosed { section: SectionId },
    #[error("student {student} is already enrolled in section {section}")]
    AlreadyEnrolled {
        student: StudentId,
        section: SectionId,
    },
    #[error("section {section} has no seat remaining (capacity {capacity})")]
    SeatLimitExceeded { section: SectionId, capacity: u32 },
    #[error("no outstanding disciplines to enroll")]
    NoOutstandingDisciplines,
    #[error("no curriculum covers area {area} and course {course}")]
    MissingCurriculum { area: AreaId, course: CourseId },
    #[error("no class section scheduled for {lective_year} class {class}")]
    NoSection {
        lective_year: LectiveYearId,
        class: ClassId,
    },
    #[error("transfer record {transfer} not found")]
    UnknownTransfer { transfer: TransferId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What one successful placement actually wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentReceipt {
    pub enrollment: ClassEnrollment,
    pub disciplines_enrolled: Vec<DisciplineId>,
    /// Disciplines already enrolled before this run; skipped, not duplicated.
    pub disciplines_skipped: Vec<DisciplineId>,
}

pub struct EnrollmentCommitter<'a, R: ?Sized, C: ?Sized> {
    repository: &'a R,
    clock: &'a C,
}

impl<'a, R, C> EnrollmentCommitter<'a, R, C>
where
    R: EnrollmentRepository + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(repository: &'a R, clock: &'a C) -> Self {
        Self { repository, clock }
    }

    /// Place the student in the section and enroll every outstanding
    /// discipline. Each per-discipline enrollment is independently
    /// idempotent; everything else is fatal.
    pub fn commit(
        &self,
        student: &StudentId,
        section: &ClassSection,
        outstanding: &[CurriculumDiscipline],
        kind: EnrollmentKind,
    ) -> Result<EnrollmentReceipt, EnrollmentError> {
        if outstanding.is_empty() {
            // Caller-side logic error: this path always has work to do.
            return Err(EnrollmentError::NoOutstandingDisciplines);
        }

        if !section.open {
            return Err(EnrollmentError::ClassClosed {
                section: section.id.clone(),
            });
        }

        if self
            .repository
            .class_enrollment(student, &section.id)?
            .is_some()
        {
            return Err(EnrollmentError::AlreadyEnrolled {
                student: student.clone(),
                section: section.id.clone(),
            });
        }

        let enrolled = self.repository.enrollment_count(&section.id)?;
        if enrolled >= section.capacity {
            return Err(EnrollmentError::SeatLimitExceeded {
                section: section.id.clone(),
                capacity: section.capacity,
            });
        }

        let enrollment = self.repository.insert_class_enrollment(ClassEnrollment {
            section: section.id.clone(),
            student: student.clone(),
            state: EnrollmentState::Enrolled,
            kind,
            enrolled_on: self.clock.today(),
        })?;

        let mut disciplines_enrolled = Vec::new();
        let mut disciplines_skipped = Vec::new();
        for requirement in outstanding {
            if self
                .repository
                .discipline_enrollment(student, &section.id, &requirement.discipline)?
                .is_some()
            {
                disciplines_skipped.push(requirement.discipline.clone());
                continue;
            }

            self.repository
                .insert_discipline_enrollment(DisciplineEnrollment {
                    section: section.id.clone(),
                    student: student.clone(),
                    discipline: requirement.discipline.clone(),
                    state: EnrollmentState::Enrolled,
                })?;
            disciplines_enrolled.push(requirement.discipline.clone());
        }

        info!(
            student = %student,
            section = %section.id,
            kind = kind.label(),
            enrolled = disciplines_enrolled.len(),
            skipped = disciplines_skipped.len(),
            "student placed in class section"
        );

        Ok(EnrollmentReceipt {
            enrollment,
            disciplines_enrolled,
            disciplines_skipped,
        })
    }
}
