//! Seat accounting for admission criteria. Counts are always derived from
//! committed results, never cached across candidates: an admission earlier in
//! a ranked batch must consume a seat for everyone after it.

use super::domain::{AdmissionCriteria, CriteriaId};
use super::repository::AdmissionRepository;
use crate::repository::RepositoryError;

/// Thin view over the repository enforcing the hard seat cap.
pub struct CapacityLedger<'a, R: ?Sized> {
    repository: &'a R,
}

#[derive(Debug, thiserror::Error)]
pub enum CapacityError {
    #[error("no seat remaining for criteria {criteria} (limit {limit})")]
    CapacityExceeded { criteria: CriteriaId, limit: u32 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl<'a, R: AdmissionRepository + ?Sized> CapacityLedger<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// True while the committed `Admitted` count is below the seat limit.
    pub fn has_seat(&self, criteria: &AdmissionCriteria) -> Result<bool, RepositoryError> {
        let admitted = self.repository.admitted_count(&criteria.id)?;
        Ok(admitted < criteria.student_limit)
    }

    /// Final guard before an `Admitted` result is written. Re-reads the count
    /// so an allocation with no seat remaining fails rather than overshooting
    /// the limit.
    pub fn reserve(&self, criteria: &AdmissionCriteria) -> Result<(), CapacityError> {
        if self.has_seat(criteria)? {
            Ok(())
        } else {
            Err(CapacityError::CapacityExceeded {
                criteria: criteria.id.clone(),
                limit: criteria.student_limit,
            })
        }
    }
}
