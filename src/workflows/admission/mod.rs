//! Admission evaluation & seat allocation: ranked batches of scored
//! applications matched against criteria under a hard seat cap.

pub mod domain;
pub mod eligibility;
pub mod evaluator;
pub mod ledger;
pub mod memory;
pub mod ranking;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    AdmissionCriteria, AdmissionOutcome, AdmissionScope, Application, ApplicationId,
    ApplicationResult, Candidate, CandidateId, CriteriaId, InvalidCriteria, Phase, PhaseId,
};
pub use evaluator::{
    AdmissionError, AdmissionEvaluator, AdmissionPolicy, BatchDecision, BatchOutcome,
    CapacityPolicy, Disposition, SkipReason,
};
pub use ledger::{CapacityError, CapacityLedger};
pub use memory::MemoryAdmissionStore;
pub use ranking::{RankedApplication, RankingBatchBuilder};
pub use repository::AdmissionRepository;
pub use router::admission_router;
