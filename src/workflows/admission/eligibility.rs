//! Pure eligibility matcher: one application's derived figures against one
//! criteria record. No ordering dependence, no side effects.

use super::domain::{AdmissionCriteria, AdmissionOutcome};

/// `Admitted` iff the certificate average meets the floor and the derived age
/// does not exceed the cap. Scope matching happens before this is called.
pub fn decide(average: f32, age: u32, criteria: &AdmissionCriteria) -> AdmissionOutcome {
    if average >= criteria.min_average && age <= criteria.max_age {
        AdmissionOutcome::Admitted
    } else {
        AdmissionOutcome::NotAdmitted
    }
}
