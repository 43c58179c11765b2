//! Equivalence resolution: compares a transferring student's frozen
//! discipline history against a target curriculum and partitions the plan
//! into satisfied and outstanding disciplines. Pure, no persistence.

use serde::{Deserialize, Serialize};

use super::domain::{Curriculum, CurriculumDiscipline, TransferDiscipline, TransferRecord};
use crate::workflows::catalog::ClassId;

/// A curriculum requirement covered by prior history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceMatch {
    pub requirement: CurriculumDiscipline,
    pub history: TransferDiscipline,
}

/// The resolver's verdict for one (transfer, curriculum) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalencePlan {
    pub satisfied: Vec<EquivalenceMatch>,
    pub outstanding: Vec<CurriculumDiscipline>,
    /// Count of mandatory disciplines in the curriculum; satisfaction is
    /// tracked against this.
    pub required: usize,
}

impl EquivalencePlan {
    /// Full equivalence: every mandatory discipline is covered by history.
    /// Optional disciplines never block completion.
    pub fn is_complete(&self) -> bool {
        let covered = self
            .satisfied
            .iter()
            .filter(|found| found.requirement.mandatory)
            .count();
        self.required == covered
    }

    /// Class the placement should land in: the first positive match pins the
    /// class, otherwise the curriculum default.
    pub fn target_class<'a>(&'a self, curriculum: &'a Curriculum) -> &'a ClassId {
        self.satisfied
            .first()
            .map(|found| &found.history.class)
            .unwrap_or(&curriculum.default_class)
    }
}

/// Partition every curriculum discipline: satisfied when history for the
/// exact discipline exists and its recorded average meets the curriculum
/// minimum; outstanding when history is missing or the minimum exceeds it.
pub fn resolve(transfer: &TransferRecord, curriculum: &Curriculum) -> EquivalencePlan {
    let mut satisfied = Vec::new();
    let mut outstanding = Vec::new();
    let mut required = 0;

    for requirement in &curriculum.disciplines {
        if requirement.mandatory {
            required += 1;
        }

        let history = transfer
            .disciplines
            .iter()
            .find(|held| held.discipline == requirement.discipline);

        match history {
            Some(held) if requirement.min_average > held.average => {
                outstanding.push(requirement.clone());
            }
            Some(held) => {
                satisfied.push(EquivalenceMatch {
                    requirement: requirement.clone(),
                    history: held.clone(),
                });
            }
            None => outstanding.push(requirement.clone()),
        }
    }

    EquivalencePlan {
        satisfied,
        outstanding,
        required,
    }
}
