//! In-memory admission store. Backs the demo binary and the test suites;
//! uniqueness constraints mirror the authoritative schema.

use std::sync::Mutex;

use super::domain::{
    AdmissionCriteria, AdmissionOutcome, AdmissionScope, Application, ApplicationId,
    ApplicationResult, Candidate, CandidateId, CriteriaId, Phase, PhaseId,
};
use super::repository::AdmissionRepository;
use crate::repository::RepositoryError;

#[derive(Default)]
struct Inner {
    phases: Vec<Phase>,
    candidates: Vec<Candidate>,
    applications: Vec<Application>,
    criteria: Vec<AdmissionCriteria>,
    results: Vec<ApplicationResult>,
}

#[derive(Default)]
pub struct MemoryAdmissionStore {
    inner: Mutex<Inner>,
}

impl MemoryAdmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }

    pub fn insert_phase(&self, phase: Phase) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner.phases.iter().any(|existing| existing.id == phase.id) {
            return Err(RepositoryError::Conflict);
        }
        inner.phases.push(phase);
        Ok(())
    }

    /// At most one candidate per (person, academic level).
    pub fn insert_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner.candidates.iter().any(|existing| {
            existing.person == candidate.person
                && existing.academic_level == candidate.academic_level
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.candidates.push(candidate);
        Ok(())
    }

    /// Unique per (candidate, course, phase, lective year).
    pub fn insert_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner.applications.iter().any(|existing| {
            existing.candidate == application.candidate
                && existing.scope.course == application.scope.course
                && existing.phase == application.phase
                && existing.scope.lective_year == application.scope.lective_year
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.applications.push(application);
        Ok(())
    }

    /// Unique per (name, course, lective year, phase).
    pub fn insert_criteria(&self, criteria: AdmissionCriteria) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if inner.criteria.iter().any(|existing| {
            existing.name == criteria.name
                && existing.scope.course == criteria.scope.course
                && existing.scope.lective_year == criteria.scope.lective_year
                && existing.phase == criteria.phase
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.criteria.push(criteria);
        Ok(())
    }

    pub fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .applications
            .iter()
            .find(|application| &application.id == id)
            .cloned())
    }

    pub fn results(&self) -> Result<Vec<ApplicationResult>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.results.clone())
    }
}

impl AdmissionRepository for MemoryAdmissionStore {
    fn criteria(&self, id: &CriteriaId) -> Result<Option<AdmissionCriteria>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .criteria
            .iter()
            .find(|criteria| &criteria.id == id)
            .cloned())
    }

    fn criteria_for_scope(
        &self,
        scope: &AdmissionScope,
    ) -> Result<Vec<AdmissionCriteria>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .criteria
            .iter()
            .filter(|criteria| &criteria.scope == scope)
            .cloned()
            .collect())
    }

    fn phase(&self, id: &PhaseId) -> Result<Option<Phase>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.phases.iter().find(|phase| &phase.id == id).cloned())
    }

    fn candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .candidates
            .iter()
            .find(|candidate| &candidate.id == id)
            .cloned())
    }

    fn applications_for_scope(
        &self,
        scope: &AdmissionScope,
        phase: &PhaseId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .applications
            .iter()
            .filter(|application| &application.scope == scope && &application.phase == phase)
            .cloned()
            .collect())
    }

    fn results_for_application(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<ApplicationResult>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .results
            .iter()
            .filter(|result| &result.application == application)
            .cloned()
            .collect())
    }

    fn result_for(
        &self,
        application: &ApplicationId,
        criteria: &CriteriaId,
    ) -> Result<Option<ApplicationResult>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .results
            .iter()
            .find(|result| &result.application == application && &result.criteria == criteria)
            .cloned())
    }

    fn admitted_count(&self, criteria: &CriteriaId) -> Result<u32, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .results
            .iter()
            .filter(|result| {
                &result.criteria == criteria && result.outcome == AdmissionOutcome::Admitted
            })
            .count() as u32)
    }

    fn insert_result(
        &self,
        result: ApplicationResult,
    ) -> Result<ApplicationResult, RepositoryError> {
        let mut inner = self.lock()?;
        // Evaluation is write-once per (application, criteria).
        if inner.results.iter().any(|existing| {
            existing.application == result.application && existing.criteria == result.criteria
        }) {
            return Err(RepositoryError::Conflict);
        }
        inner.results.push(result.clone());
        Ok(result)
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        let slot = inner
            .applications
            .iter_mut()
            .find(|existing| existing.id == application.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = application;
        Ok(())
    }
}
