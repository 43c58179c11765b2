use std::sync::Arc;

use super::common;
use crate::repository::FixedClock;
use crate::workflows::admission::domain::{
    AdmissionOutcome, ApplicationId, ApplicationResult, CriteriaId, Phase, PhaseId,
};
use crate::workflows::admission::evaluator::{
    AdmissionError, AdmissionEvaluator, AdmissionPolicy, CapacityPolicy, Disposition, SkipReason,
};
use crate::workflows::admission::memory::MemoryAdmissionStore;
use crate::workflows::admission::repository::AdmissionRepository;
use crate::workflows::catalog::LectiveYearId;

fn evaluator(
    store: Arc<MemoryAdmissionStore>,
    policy: AdmissionPolicy,
) -> AdmissionEvaluator<MemoryAdmissionStore, FixedClock> {
    AdmissionEvaluator::new(store, Arc::new(FixedClock(common::today())), policy)
}

fn crit_1() -> CriteriaId {
    CriteriaId("crit-1".to_string())
}

fn app(id: &str) -> ApplicationId {
    ApplicationId(id.to_string())
}

#[test]
fn admits_every_eligible_candidate_in_ranked_order() {
    let store = Arc::new(common::seeded_store(10));
    let outcome = evaluator(store.clone(), AdmissionPolicy::default())
        .evaluate_batch(&crit_1())
        .expect("batch evaluates");

    assert_eq!(outcome.admitted(), 3);
    let order: Vec<&str> = outcome
        .decisions
        .iter()
        .map(|decision| decision.application.0.as_str())
        .collect();
    assert_eq!(order, vec!["app-c", "app-a", "app-b"]);
    assert!(outcome
        .decisions
        .iter()
        .all(|decision| decision.disposition == Disposition::Admitted));

    assert_eq!(store.results().expect("store readable").len(), 3);
    let application = store
        .application(&app("app-a"))
        .expect("store readable")
        .expect("application present");
    assert!(application.evaluated);
}

#[test]
fn records_not_admitted_without_consuming_a_seat() {
    let store = Arc::new(common::seeded_store(10));
    store
        .insert_candidate(common::candidate("cand-d", common::date(2010, 1, 1), 11.0))
        .expect("candidate seeds");
    store
        .insert_application(common::application("app-d", "cand-d"))
        .expect("application seeds");

    let outcome = evaluator(store.clone(), AdmissionPolicy::default())
        .evaluate_batch(&crit_1())
        .expect("batch evaluates");

    assert_eq!(outcome.admitted(), 3);
    assert_eq!(outcome.rejected(), 1);

    let result = store
        .result_for(&app("app-d"), &crit_1())
        .expect("store readable")
        .expect("rejection recorded");
    assert_eq!(result.outcome, AdmissionOutcome::NotAdmitted);

    let application = store
        .application(&app("app-d"))
        .expect("store readable")
        .expect("application present");
    assert!(!application.evaluated);
    assert_eq!(store.admitted_count(&crit_1()).expect("store readable"), 3);
}

#[test]
fn aborts_the_batch_when_seats_run_out() {
    let store = Arc::new(common::seeded_store(2));
    let err = evaluator(store.clone(), AdmissionPolicy::default())
        .evaluate_batch(&crit_1())
        .expect_err("third admission exceeds the limit");
    assert!(matches!(
        err,
        AdmissionError::SeatLimitExceeded { limit: 2, .. }
    ));

    // The two admissions committed before the abort stay committed; the
    // highest-average candidate ranked last gets nothing.
    assert_eq!(store.admitted_count(&crit_1()).expect("store readable"), 2);
    assert!(store
        .results_for_application(&app("app-b"))
        .expect("store readable")
        .is_empty());
}

#[test]
fn skip_remaining_policy_completes_the_batch() {
    let store = Arc::new(common::seeded_store(2));
    let policy = AdmissionPolicy {
        on_capacity_exhausted: CapacityPolicy::SkipRemaining,
    };
    let outcome = evaluator(store.clone(), policy)
        .evaluate_batch(&crit_1())
        .expect("batch completes under skip policy");

    assert_eq!(outcome.admitted(), 2);
    assert_eq!(outcome.skipped(), 1);
    assert_eq!(
        outcome.decisions[2].disposition,
        Disposition::Skipped {
            reason: SkipReason::NoSeat
        }
    );
    assert!(store
        .results_for_application(&app("app-b"))
        .expect("store readable")
        .is_empty());
}

#[test]
fn rerun_skips_applications_already_decided() {
    let store = Arc::new(common::seeded_store(10));
    let evaluator = evaluator(store.clone(), AdmissionPolicy::default());

    let first = evaluator.evaluate_batch(&crit_1()).expect("first run");
    assert_eq!(first.admitted(), 3);

    let second = evaluator.evaluate_batch(&crit_1()).expect("second run");
    assert_eq!(second.admitted(), 0);
    assert!(second.decisions.iter().all(|decision| {
        decision.disposition
            == Disposition::Skipped {
                reason: SkipReason::AlreadyEvaluated,
            }
    }));

    assert_eq!(store.results().expect("store readable").len(), 3);
}

#[test]
fn an_application_with_two_results_fails_the_batch() {
    let store = Arc::new(common::seeded_store(10));
    store
        .insert_criteria(common::criteria("crit-2", 10))
        .expect("criteria seeds");

    for criteria in ["crit-1", "crit-2"] {
        store
            .insert_result(ApplicationResult {
                application: app("app-c"),
                criteria: CriteriaId(criteria.to_string()),
                outcome: AdmissionOutcome::NotAdmitted,
                phase: PhaseId("phase-1".to_string()),
                lective_year: LectiveYearId("2026-2027".to_string()),
            })
            .expect("result seeds");
    }

    let err = evaluator(store, AdmissionPolicy::default())
        .evaluate_batch(&crit_1())
        .expect_err("double evaluation rejected");
    assert!(matches!(err, AdmissionError::AlreadyEvaluated { .. }));
}

#[test]
fn out_of_window_run_persists_nothing() {
    let store = Arc::new(common::seeded_store(10));
    let evaluator = AdmissionEvaluator::new(
        store.clone(),
        Arc::new(FixedClock(common::date(2026, 9, 15))),
        AdmissionPolicy::default(),
    );

    let err = evaluator
        .evaluate_batch(&crit_1())
        .expect_err("window closed");
    assert!(matches!(err, AdmissionError::OutOfWindow { .. }));
    assert!(store.results().expect("store readable").is_empty());
}

#[test]
fn phase_coverage_follows_the_ordinal() {
    let first = common::first_phase();
    let second = Phase {
        id: PhaseId("phase-2".to_string()),
        name: "Second phase".to_string(),
        ordinal: 2,
        start: common::date(2026, 9, 1),
        end: common::date(2026, 9, 30),
    };

    assert!(first.covers(&first));
    assert!(second.covers(&first));
    assert!(!first.covers(&second));
}

#[test]
fn later_phase_criteria_do_not_disturb_an_earlier_batch() {
    let store = Arc::new(common::seeded_store(10));
    store
        .insert_phase(Phase {
            id: PhaseId("phase-2".to_string()),
            name: "Second phase".to_string(),
            ordinal: 2,
            start: common::date(2026, 9, 1),
            end: common::date(2026, 9, 30),
        })
        .expect("phase seeds");
    let mut second_intake = common::criteria("crit-2", 10);
    second_intake.phase = PhaseId("phase-2".to_string());
    store.insert_criteria(second_intake).expect("criteria seeds");

    let outcome = evaluator(store, AdmissionPolicy::default())
        .evaluate_batch(&crit_1())
        .expect("first-phase batch evaluates");
    assert_eq!(outcome.admitted(), 3);
}

#[test]
fn unknown_criteria_is_a_repository_error() {
    let store = Arc::new(common::seeded_store(10));
    let err = evaluator(store, AdmissionPolicy::default())
        .evaluate_batch(&CriteriaId("crit-missing".to_string()))
        .expect_err("unknown criteria rejected");
    assert!(matches!(err, AdmissionError::Repository(_)));
}
