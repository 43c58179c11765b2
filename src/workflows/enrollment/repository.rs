use super::domain::{
    ClassEnrollment, ClassSection, Curriculum, CurriculumId, DisciplineEnrollment, SectionId,
    TransferId, TransferRecord,
};
use crate::repository::RepositoryError;
use crate::workflows::catalog::{AreaId, ClassId, CourseId, DisciplineId, LectiveYearId, StudentId};

/// Storage abstraction for the transfer/enrollment pipeline.
pub trait EnrollmentRepository: Send + Sync {
    fn transfer(&self, id: &TransferId) -> Result<Option<TransferRecord>, RepositoryError>;

    fn curriculum_for(
        &self,
        area: &AreaId,
        course: &CourseId,
    ) -> Result<Option<Curriculum>, RepositoryError>;

    fn section_for(
        &self,
        lective_year: &LectiveYearId,
        class: &ClassId,
        curriculum: &CurriculumId,
    ) -> Result<Option<ClassSection>, RepositoryError>;

    /// Committed placements in a section. Re-queried on every seat decision,
    /// same discipline as the admission capacity ledger.
    fn enrollment_count(&self, section: &SectionId) -> Result<u32, RepositoryError>;

    fn class_enrollment(
        &self,
        student: &StudentId,
        section: &SectionId,
    ) -> Result<Option<ClassEnrollment>, RepositoryError>;

    fn discipline_enrollment(
        &self,
        student: &StudentId,
        section: &SectionId,
        discipline: &DisciplineId,
    ) -> Result<Option<DisciplineEnrollment>, RepositoryError>;

    fn insert_class_enrollment(
        &self,
        enrollment: ClassEnrollment,
    ) -> Result<ClassEnrollment, RepositoryError>;

    fn insert_discipline_enrollment(
        &self,
        enrollment: DisciplineEnrollment,
    ) -> Result<DisciplineEnrollment, RepositoryError>;
}
