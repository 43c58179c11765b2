//! Transfer and candidate placement orchestration: equivalence resolution
//! followed by the committed enrollment, or an early return when prior
//! history already covers the whole plan.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::committer::{EnrollmentCommitter, EnrollmentError, EnrollmentReceipt};
use super::domain::{EnrollmentKind, EnrollmentTarget, TransferId};
use super::equivalence;
use super::repository::EnrollmentRepository;
use crate::repository::Clock;
use crate::workflows::catalog::StudentId;

/// Outcome of processing one transfer case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// Every required discipline is already satisfied; nothing was persisted.
    FullEquivalence { satisfied: usize },
    /// The student was placed and enrolled in the outstanding disciplines.
    Enrolled(EnrollmentReceipt),
}

/// Service composing the equivalence resolver and the enrollment committer.
pub struct TransferService<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TransferService<R, C>
where
    R: EnrollmentRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Resolve a transfer case end to end: equivalences first, then the
    /// capacity-checked placement for whatever must be retaken.
    pub fn enroll_transfer(
        &self,
        transfer_id: &TransferId,
    ) -> Result<TransferOutcome, EnrollmentError> {
        let transfer = self
            .repository
            .transfer(transfer_id)?
            .ok_or_else(|| EnrollmentError::UnknownTransfer {
                transfer: transfer_id.clone(),
            })?;

        let curriculum = self
            .repository
            .curriculum_for(&transfer.target.area, &transfer.target.course)?
            .ok_or_else(|| EnrollmentError::MissingCurriculum {
                area: transfer.target.area.clone(),
                course: transfer.target.course.clone(),
            })?;

        let plan = equivalence::resolve(&transfer, &curriculum);
        info!(
            transfer = %transfer.id,
            student = %transfer.student,
            satisfied = plan.satisfied.len(),
            outstanding = plan.outstanding.len(),
            required = plan.required,
            "equivalence resolved"
        );

        if plan.is_complete() {
            return Ok(TransferOutcome::FullEquivalence {
                satisfied: plan.satisfied.len(),
            });
        }

        let class = plan.target_class(&curriculum).clone();
        let section = self
            .repository
            .section_for(&transfer.target.lective_year, &class, &curriculum.id)?
            .ok_or_else(|| EnrollmentError::NoSection {
                lective_year: transfer.target.lective_year.clone(),
                class: class.clone(),
            })?;

        let committer = EnrollmentCommitter::new(self.repository.as_ref(), self.clock.as_ref());
        let receipt = committer.commit(
            &transfer.student,
            &section,
            &plan.outstanding,
            EnrollmentKind::Transferred,
        )?;

        Ok(TransferOutcome::Enrolled(receipt))
    }

    /// Place an admitted candidate into the target slot, enrolling the whole
    /// curriculum. Per-discipline idempotency still applies.
    pub fn enroll_candidate(
        &self,
        student: &StudentId,
        target: &EnrollmentTarget,
    ) -> Result<EnrollmentReceipt, EnrollmentError> {
        let curriculum = self
            .repository
            .curriculum_for(&target.area, &target.course)?
            .ok_or_else(|| EnrollmentError::MissingCurriculum {
                area: target.area.clone(),
                course: target.course.clone(),
            })?;

        let section = self
            .repository
            .section_for(&target.lective_year, &target.class, &curriculum.id)?
            .ok_or_else(|| EnrollmentError::NoSection {
                lective_year: target.lective_year.clone(),
                class: target.class.clone(),
            })?;

        let committer = EnrollmentCommitter::new(self.repository.as_ref(), self.clock.as_ref());
        committer.commit(
            student,
            &section,
            &curriculum.disciplines,
            EnrollmentKind::Candidate,
        )
    }
}
