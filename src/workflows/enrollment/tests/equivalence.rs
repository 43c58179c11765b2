use super::common;
use crate::workflows::catalog::ClassId;
use crate::workflows::enrollment::equivalence::resolve;

#[test]
fn empty_history_leaves_everything_outstanding() {
    let curriculum = common::curriculum(vec![
        common::requirement("math", true, 12.0),
        common::requirement("physics", true, 10.0),
    ]);
    let transfer = common::transfer("tr-1", "student-1", "class-10", vec![]);

    let plan = resolve(&transfer, &curriculum);

    assert!(plan.satisfied.is_empty());
    assert_eq!(plan.outstanding.len(), 2);
    assert_eq!(plan.required, 2);
    assert!(!plan.is_complete());
    assert_eq!(
        plan.target_class(&curriculum),
        &ClassId("class-10".to_string())
    );
}

#[test]
fn below_minimum_average_means_retake() {
    let curriculum = common::curriculum(vec![
        common::requirement("math", true, 14.0),
        common::requirement("physics", true, 10.0),
        common::requirement("chemistry", true, 15.0),
    ]);
    let transfer = common::transfer(
        "tr-1",
        "student-1",
        "class-10",
        vec![
            common::history("math", "class-11", 16.0),
            common::history("chemistry", "class-11", 12.0),
        ],
    );

    let plan = resolve(&transfer, &curriculum);

    assert_eq!(plan.satisfied.len(), 1);
    assert_eq!(plan.satisfied[0].requirement.discipline.0, "math");
    let outstanding: Vec<&str> = plan
        .outstanding
        .iter()
        .map(|requirement| requirement.discipline.0.as_str())
        .collect();
    assert_eq!(outstanding, vec!["physics", "chemistry"]);

    // The first positive match pins the placement class.
    assert_eq!(
        plan.target_class(&curriculum),
        &ClassId("class-11".to_string())
    );
}

#[test]
fn recorded_average_equal_to_minimum_satisfies() {
    let curriculum = common::curriculum(vec![common::requirement("math", true, 14.0)]);
    let transfer = common::transfer(
        "tr-1",
        "student-1",
        "class-10",
        vec![common::history("math", "class-11", 14.0)],
    );

    let plan = resolve(&transfer, &curriculum);

    assert_eq!(plan.satisfied.len(), 1);
    assert!(plan.outstanding.is_empty());
    assert!(plan.is_complete());
}

#[test]
fn optional_disciplines_never_block_completion() {
    let curriculum = common::curriculum(vec![
        common::requirement("math", true, 12.0),
        common::requirement("music", false, 10.0),
    ]);
    let transfer = common::transfer(
        "tr-1",
        "student-1",
        "class-10",
        vec![common::history("math", "class-11", 15.0)],
    );

    let plan = resolve(&transfer, &curriculum);

    assert_eq!(plan.required, 1);
    assert_eq!(plan.outstanding.len(), 1);
    assert!(plan.is_complete());
}

#[test]
fn satisfied_optional_history_still_counts_completion_by_mandatory() {
    let curriculum = common::curriculum(vec![
        common::requirement("math", true, 12.0),
        common::requirement("music", false, 10.0),
    ]);
    let transfer = common::transfer(
        "tr-1",
        "student-1",
        "class-10",
        vec![
            common::history("math", "class-11", 15.0),
            common::history("music", "class-11", 18.0),
        ],
    );

    let plan = resolve(&transfer, &curriculum);

    assert_eq!(plan.satisfied.len(), 2);
    assert!(plan.is_complete());
}
