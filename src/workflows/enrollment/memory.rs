//! In-memory enrollment store with the schema's uniqueness constraints.

use std::sync::Mutex;

use super::domain::{
    ClassEnrollment, ClassSection, Curriculum, CurriculumId, DisciplineEnrollment, SectionId,
    TransferId, TransferRecord,
};
use super::repository::EnrollmentRepository;
use crate::repository::RepositoryError;
use crate::workflows::catalog::{AreaId, ClassId, CourseId, DisciplineId, LectiveYearId, StudentId};

#[derive(Default)]
struct Inner {
    transfers: Vec<TransferRecord>,
    curricula: Vec<Curriculum>,
    sections: Vec<ClassSection>,
    class_enrollments: Vec<ClassEnrollment>,
    discipline_enrollments: Vec<DisciplineEnrollment>,
}

#[derive(Default)]
pub struct MemoryEnrollmentStore {
    inner: Mutex<Inner>,
}

impl MemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }

    /// Unique per (lective year, academic level, course, class, student).
    pub fn insert_transfer(&self, transfer: TransferRecord) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner.transfers.iter().any(|existing| {
            existing.student == transfer.student
                && existing.target.lective_year == transfer.target.lective_year
                && existing.target.academic_level == transfer.target.academic_level
                && existing.target.course == transfer.target.course
                && existing.target.class == transfer.target.class
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.transfers.push(transfer);
        Ok(())
    }

    pub fn insert_curriculum(&self, curriculum: Curriculum) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner
            .curricula
            .iter()
            .any(|existing| existing.id == curriculum.id)
        {
            return Err(RepositoryError::Conflict);
        }
        inner.curricula.push(curriculum);
        Ok(())
    }

    pub fn insert_section(&self, section: ClassSection) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner
            .sections
            .iter()
            .any(|existing| existing.id == section.id)
        {
            return Err(RepositoryError::Conflict);
        }
        inner.sections.push(section);
        Ok(())
    }

    pub fn class_enrollments(&self) -> Result<Vec<ClassEnrollment>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.class_enrollments.clone())
    }

    pub fn discipline_enrollments(&self) -> Result<Vec<DisciplineEnrollment>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.discipline_enrollments.clone())
    }
}

impl EnrollmentRepository for MemoryEnrollmentStore {
    fn transfer(&self, id: &TransferId) -> Result<Option<TransferRecord>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .transfers
            .iter()
            .find(|transfer| &transfer.id == id)
            .cloned())
    }

    fn curriculum_for(
        &self,
        area: &AreaId,
        course: &CourseId,
    ) -> Result<Option<Curriculum>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .curricula
            .iter()
            .find(|curriculum| &curriculum.area == area && &curriculum.course == course)
            .cloned())
    }

    fn section_for(
        &self,
        lective_year: &LectiveYearId,
        class: &ClassId,
        curriculum: &CurriculumId,
    ) -> Result<Option<ClassSection>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .sections
            .iter()
            .find(|section| {
                &section.lective_year == lective_year
                    && &section.class == class
                    && &section.curriculum == curriculum
            })
            .cloned())
    }

    fn enrollment_count(&self, section: &SectionId) -> Result<u32, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .class_enrollments
            .iter()
            .filter(|enrollment| &enrollment.section == section)
            .count() as u32)
    }

    fn class_enrollment(
        &self,
        student: &StudentId,
        section: &SectionId,
    ) -> Result<Option<ClassEnrollment>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .class_enrollments
            .iter()
            .find(|enrollment| &enrollment.student == student && &enrollment.section == section)
            .cloned())
    }

    fn discipline_enrollment(
        &self,
        student: &StudentId,
        section: &SectionId,
        discipline: &DisciplineId,
    ) -> Result<Option<DisciplineEnrollment>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .discipline_enrollments
            .iter()
            .find(|enrollment| {
                &enrollment.student == student
                    && &enrollment.section == section
                    && &enrollment.discipline == discipline
            })
            .cloned())
    }

    fn insert_class_enrollment(
        &self,
        enrollment: ClassEnrollment,
    ) -> Result<ClassEnrollment, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.class_enrollments.iter().any(|existing| {
            existing.student == enrollment.student && existing.section == enrollment.section
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.class_enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    fn insert_discipline_enrollment(
        &self,
        enrollment: DisciplineEnrollment,
    ) -> Result<DisciplineEnrollment, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.discipline_enrollments.iter().any(|existing| {
            existing.student == enrollment.student
                && existing.section == enrollment.section
                && existing.discipline == enrollment.discipline
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.discipline_enrollments.push(enrollment.clone());
        Ok(enrollment)
    }
}
