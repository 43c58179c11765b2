//! Shared fixtures: one secondary-science scope with a first-phase window
//! and three scored applicants whose ranked order is app-c, app-a, app-b.

use chrono::NaiveDate;

use crate::workflows::admission::domain::{
    AdmissionCriteria, AdmissionScope, Application, ApplicationId, Candidate, CandidateId,
    CriteriaId, Phase, PhaseId,
};
use crate::workflows::admission::memory::MemoryAdmissionStore;
use crate::workflows::catalog::{
    AcademicLevelId, AreaId, ClassId, CourseId, LectiveYearId, PersonId,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn today() -> NaiveDate {
    date(2026, 8, 15)
}

pub fn scope() -> AdmissionScope {
    AdmissionScope {
        lective_year: LectiveYearId("2026-2027".to_string()),
        academic_level: AcademicLevelId("secondary".to_string()),
        area: AreaId("science".to_string()),
        course: CourseId("physics".to_string()),
    }
}

pub fn first_phase() -> Phase {
    Phase {
        id: PhaseId("phase-1".to_string()),
        name: "First phase".to_string(),
        ordinal: 1,
        start: date(2026, 7, 1),
        end: date(2026, 8, 31),
    }
}

pub fn candidate(id: &str, birth_date: NaiveDate, average: f32) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        person: PersonId(format!("person-{id}")),
        birth_date,
        average,
        academic_level: AcademicLevelId("secondary".to_string()),
        area: AreaId("science".to_string()),
        course: CourseId("physics".to_string()),
        institution: "Escola Nova".to_string(),
    }
}

pub fn application(id: &str, candidate: &str) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        candidate: CandidateId(candidate.to_string()),
        scope: scope(),
        class: ClassId("class-10".to_string()),
        phase: PhaseId("phase-1".to_string()),
        evaluated: false,
    }
}

pub fn criteria(id: &str, student_limit: u32) -> AdmissionCriteria {
    AdmissionCriteria {
        id: CriteriaId(id.to_string()),
        name: format!("criteria {id}"),
        scope: scope(),
        class: ClassId("class-10".to_string()),
        phase: PhaseId("phase-1".to_string()),
        max_age: 18,
        min_average: 12.0,
        student_limit,
    }
}

/// On 2026-08-15: cand-a is 16 with average 15.0, cand-b is 17 with 18.0,
/// cand-c is 16 with 14.0. Ascending (age, average) ranks c before a before b.
pub fn seeded_store(student_limit: u32) -> MemoryAdmissionStore {
    let store = MemoryAdmissionStore::new();
    store.insert_phase(first_phase()).expect("phase seeds");

    store
        .insert_candidate(candidate("cand-a", date(2010, 5, 1), 15.0))
        .expect("candidate seeds");
    store
        .insert_candidate(candidate("cand-b", date(2009, 3, 1), 18.0))
        .expect("candidate seeds");
    store
        .insert_candidate(candidate("cand-c", date(2010, 6, 1), 14.0))
        .expect("candidate seeds");

    store
        .insert_application(application("app-a", "cand-a"))
        .expect("application seeds");
    store
        .insert_application(application("app-b", "cand-b"))
        .expect("application seeds");
    store
        .insert_application(application("app-c", "cand-c"))
        .expect("application seeds");

    store
        .insert_criteria(criteria("crit-1", student_limit))
        .expect("criteria seeds");

    store
}
