use super::domain::{
    AdmissionCriteria, AdmissionScope, Application, ApplicationId, ApplicationResult, Candidate,
    CandidateId, CriteriaId, Phase, PhaseId,
};
use crate::repository::RepositoryError;

/// Storage abstraction for the admission pipeline. All lookups the evaluator
/// needs go through here; the core never embeds query syntax.
pub trait AdmissionRepository: Send + Sync {
    fn criteria(&self, id: &CriteriaId) -> Result<Option<AdmissionCriteria>, RepositoryError>;

    /// Every criteria record matching the four-part scope, regardless of phase.
    fn criteria_for_scope(
        &self,
        scope: &AdmissionScope,
    ) -> Result<Vec<AdmissionCriteria>, RepositoryError>;

    fn phase(&self, id: &PhaseId) -> Result<Option<Phase>, RepositoryError>;

    fn candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;

    /// Applications competing in one (scope, phase) slot, in arrival order.
    fn applications_for_scope(
        &self,
        scope: &AdmissionScope,
        phase: &PhaseId,
    ) -> Result<Vec<Application>, RepositoryError>;

    fn results_for_application(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<ApplicationResult>, RepositoryError>;

    fn result_for(
        &self,
        application: &ApplicationId,
        criteria: &CriteriaId,
    ) -> Result<Option<ApplicationResult>, RepositoryError>;

    /// Committed `Admitted` results for a criteria. Re-queried on every seat
    /// decision; earlier admissions in a batch consume seats for later ones.
    fn admitted_count(&self, criteria: &CriteriaId) -> Result<u32, RepositoryError>;

    fn insert_result(
        &self,
        result: ApplicationResult,
    ) -> Result<ApplicationResult, RepositoryError>;

    fn update_application(&self, application: Application) -> Result<(), RepositoryError>;
}
