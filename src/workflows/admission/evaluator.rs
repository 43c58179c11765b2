//! Batch orchestration for one admission criteria scope: ranked consumption,
//! idempotency guards, seat accounting, and result persistence.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    AdmissionCriteria, AdmissionOutcome, AdmissionScope, Application, ApplicationId,
    ApplicationResult, CriteriaId, PhaseId,
};
use super::eligibility;
use super::ledger::{CapacityError, CapacityLedger};
use super::ranking::{RankedApplication, RankingBatchBuilder};
use super::repository::AdmissionRepository;
use crate::repository::{Clock, RepositoryError};

/// What happens to the rest of a ranked batch once the seat limit is hit.
/// `AbortBatch` fails the whole run and keeps earlier commits; `SkipRemaining`
/// records a skip for everyone left and completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapacityPolicy {
    #[default]
    AbortBatch,
    SkipRemaining,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    pub on_capacity_exhausted: CapacityPolicy,
}

/// Errors raised while evaluating a batch. All abort the current operation;
/// results committed earlier in the same batch stay committed.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("phase {phase} window {start}..={end} does not cover {today}")]
    OutOfWindow {
        phase: String,
        today: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("no admission criteria defined for scope {scope}")]
    NoCriteria { scope: AdmissionScope },
    #[error("application {application} already carries an evaluation")]
    AlreadyEvaluated { application: ApplicationId },
    #[error("seat limit {limit} reached for criteria {criteria}; remaining batch aborted")]
    SeatLimitExceeded { criteria: CriteriaId, limit: u32 },
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Per-application disposition inside a completed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum Disposition {
    Admitted,
    NotAdmitted,
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A result for (application, criteria) already exists; evaluation is
    /// write-once and re-runs are no-ops.
    AlreadyEvaluated,
    /// Seats ran out under the `SkipRemaining` policy.
    NoSeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDecision {
    pub application: ApplicationId,
    #[serde(flatten)]
    pub disposition: Disposition,
}

/// Observable outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub criteria: CriteriaId,
    pub phase: PhaseId,
    pub decisions: Vec<BatchDecision>,
}

impl BatchOutcome {
    pub fn admitted(&self) -> usize {
        self.decisions
            .iter()
            .filter(|decision| decision.disposition == Disposition::Admitted)
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.decisions
            .iter()
            .filter(|decision| decision.disposition == Disposition::NotAdmitted)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.decisions.len() - self.admitted() - self.rejected()
    }
}

/// Service evaluating ranked application batches against one criteria scope.
pub struct AdmissionEvaluator<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
    policy: AdmissionPolicy,
}

impl<R, C> AdmissionEvaluator<R, C>
where
    R: AdmissionRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<C>, policy: AdmissionPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Evaluate every application in the criteria's scope, ranked by (age,
    /// average). Runs to completion or fails as a unit; nothing persisted by
    /// a failed step is rolled back here, the store is append-only per
    /// (application, criteria).
    pub fn evaluate_batch(&self, criteria_id: &CriteriaId) -> Result<BatchOutcome, AdmissionError> {
        let criteria = self
            .repository
            .criteria(criteria_id)?
            .ok_or(RepositoryError::NotFound)?;
        let phase = self
            .repository
            .phase(&criteria.phase)?
            .ok_or(RepositoryError::NotFound)?;

        let today = self.clock.today();
        let batch =
            RankingBatchBuilder::new(self.repository.as_ref()).build(&criteria.scope, &phase, today)?;

        info!(
            criteria = %criteria.id,
            phase = %phase.name,
            applications = batch.len(),
            "evaluating admission batch"
        );

        let ledger = CapacityLedger::new(self.repository.as_ref());
        let mut decisions = Vec::with_capacity(batch.len());
        let mut seats_exhausted = false;

        for ranked in batch {
            let application_id = ranked.application.id.clone();

            if seats_exhausted {
                decisions.push(BatchDecision {
                    application: application_id,
                    disposition: Disposition::Skipped {
                        reason: SkipReason::NoSeat,
                    },
                });
                continue;
            }

            // Precondition: some criteria must govern this application's
            // scope, or the batch would silently admit nobody against nothing.
            self.applicable_criteria(&ranked.application)?;

            let existing = self
                .repository
                .results_for_application(&application_id)?;
            if existing.len() > 1 {
                return Err(AdmissionError::AlreadyEvaluated {
                    application: application_id,
                });
            }

            if self
                .repository
                .result_for(&application_id, &criteria.id)?
                .is_some()
            {
                decisions.push(BatchDecision {
                    application: application_id,
                    disposition: Disposition::Skipped {
                        reason: SkipReason::AlreadyEvaluated,
                    },
                });
                continue;
            }

            if !ledger.has_seat(&criteria)? {
                match self.policy.on_capacity_exhausted {
                    CapacityPolicy::AbortBatch => {
                        return Err(AdmissionError::SeatLimitExceeded {
                            criteria: criteria.id.clone(),
                            limit: criteria.student_limit,
                        });
                    }
                    CapacityPolicy::SkipRemaining => {
                        warn!(
                            criteria = %criteria.id,
                            limit = criteria.student_limit,
                            "seat limit reached; skipping remaining candidates"
                        );
                        seats_exhausted = true;
                        decisions.push(BatchDecision {
                            application: application_id,
                            disposition: Disposition::Skipped {
                                reason: SkipReason::NoSeat,
                            },
                        });
                        continue;
                    }
                }
            }

            let disposition = self.evaluate_one(&ranked, &criteria, &ledger)?;
            decisions.push(BatchDecision {
                application: application_id,
                disposition,
            });
        }

        let outcome = BatchOutcome {
            criteria: criteria.id.clone(),
            phase: phase.id,
            decisions,
        };
        info!(
            criteria = %criteria.id,
            admitted = outcome.admitted(),
            rejected = outcome.rejected(),
            skipped = outcome.skipped(),
            "admission batch complete"
        );
        Ok(outcome)
    }

    fn evaluate_one(
        &self,
        ranked: &RankedApplication,
        criteria: &AdmissionCriteria,
        ledger: &CapacityLedger<'_, R>,
    ) -> Result<Disposition, AdmissionError> {
        let outcome = eligibility::decide(ranked.average(), ranked.age, criteria);

        if outcome == AdmissionOutcome::Admitted {
            ledger.reserve(criteria)?;
        }

        self.repository.insert_result(ApplicationResult {
            application: ranked.application.id.clone(),
            criteria: criteria.id.clone(),
            outcome,
            phase: criteria.phase.clone(),
            lective_year: criteria.scope.lective_year.clone(),
        })?;

        if outcome == AdmissionOutcome::Admitted {
            let mut application = ranked.application.clone();
            application.evaluated = true;
            self.repository.update_application(application)?;
        }

        info!(
            application = %ranked.application.id,
            age = ranked.age,
            average = ranked.average(),
            outcome = outcome.label(),
            "application evaluated"
        );

        Ok(match outcome {
            AdmissionOutcome::Admitted => Disposition::Admitted,
            AdmissionOutcome::NotAdmitted => Disposition::NotAdmitted,
        })
    }

    /// Criteria governing an application: same scope, criteria phase at or
    /// after the application's phase. Batch selection pins applications to
    /// the governing criteria's phase, so the empty arm trips only when a
    /// store hands back a wider selection.
    fn applicable_criteria(
        &self,
        application: &Application,
    ) -> Result<Vec<AdmissionCriteria>, AdmissionError> {
        let application_phase = self
            .repository
            .phase(&application.phase)?
            .ok_or(RepositoryError::NotFound)?;

        let mut applicable = Vec::new();
        for candidate in self.repository.criteria_for_scope(&application.scope)? {
            let phase = self
                .repository
                .phase(&candidate.phase)?
                .ok_or(RepositoryError::NotFound)?;
            if phase.covers(&application_phase) {
                applicable.push(candidate);
            }
        }

        if applicable.is_empty() {
            return Err(AdmissionError::NoCriteria {
                scope: application.scope.clone(),
            });
        }
        Ok(applicable)
    }
}
