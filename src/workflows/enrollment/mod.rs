//! Transfer equivalence & enrollment: prior discipline history resolved
//! against a target curriculum, then capacity-checked class placement.

pub mod committer;
pub mod domain;
pub mod equivalence;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use committer::{EnrollmentCommitter, EnrollmentError, EnrollmentReceipt};
pub use domain::{
    ClassEnrollment, ClassSection, Curriculum, CurriculumDiscipline, CurriculumId,
    DisciplineEnrollment, EnrollmentKind, EnrollmentState, EnrollmentTarget, SectionId,
    TransferDiscipline, TransferId, TransferKind, TransferRecord,
};
pub use equivalence::{resolve, EquivalenceMatch, EquivalencePlan};
pub use memory::MemoryEnrollmentStore;
pub use repository::EnrollmentRepository;
pub use router::enrollment_router;
pub use service::{TransferOutcome, TransferService};
