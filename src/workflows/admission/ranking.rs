//! Builds the ranked batch for one criteria scope: window check, scope
//! selection, then a stable sort by ascending age and ascending certificate
//! average. Ties beyond those two keys keep arrival order.

use chrono::NaiveDate;

use super::domain::{AdmissionScope, Application, Candidate, Phase};
use super::evaluator::AdmissionError;
use super::repository::AdmissionRepository;
use crate::repository::RepositoryError;

/// One application joined with the figures the matcher and sort need.
#[derive(Debug, Clone)]
pub struct RankedApplication {
    pub application: Application,
    pub candidate: Candidate,
    pub age: u32,
}

impl RankedApplication {
    pub fn average(&self) -> f32 {
        self.candidate.average
    }
}

pub struct RankingBatchBuilder<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R: AdmissionRepository + ?Sized> RankingBatchBuilder<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn build(
        &self,
        scope: &AdmissionScope,
        phase: &Phase,
        today: NaiveDate,
    ) -> Result<Vec<RankedApplication>, AdmissionError> {
        if !phase.contains(today) {
            return Err(AdmissionError::OutOfWindow {
                phase: phase.name.clone(),
                today,
                start: phase.start,
                end: phase.end,
            });
        }

        if self.repository.criteria_for_scope(scope)?.is_empty() {
            return Err(AdmissionError::NoCriteria {
                scope: scope.clone(),
            });
        }

        let applications = self.repository.applications_for_scope(scope, &phase.id)?;
        let mut batch = Vec::with_capacity(applications.len());
        for application in applications {
            let candidate = self
                .repository
                .candidate(&application.candidate)?
                .ok_or(RepositoryError::NotFound)?;
            let age = candidate.age_on(today);
            batch.push(RankedApplication {
                application,
                candidate,
                age,
            });
        }

        // Stable, so equal (age, average) pairs stay in arrival order.
        batch.sort_by(|a, b| {
            a.age
                .cmp(&b.age)
                .then_with(|| a.average().total_cmp(&b.average()))
        });

        Ok(batch)
    }
}
