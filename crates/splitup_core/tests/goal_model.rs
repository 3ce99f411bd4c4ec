use splitup_core::{Goal, GoalValidationError};
use uuid::Uuid;

#[test]
fn new_goal_starts_with_full_remaining() {
    let goal = Goal::new("read books", 12);
    assert!(!goal.id.is_nil());
    assert_eq!(goal.remaining, 12);
    assert!(!goal.completed);
    assert_eq!(goal.progress(), "0/12");
}

#[test]
fn applying_remaining_completes_goal() {
    let mut goal = Goal::new("walk", 7);
    assert!(goal.apply(2));
    assert_eq!(goal.progress(), "2/7");
    assert!(goal.apply(5));
    assert!(goal.completed);
    assert_eq!(goal.remaining, 0);
    assert!(!goal.apply(1));
}

#[test]
fn goal_serialization_uses_expected_wire_fields() {
    let goal_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut goal = Goal::new("cycle", 30);
    goal.id = goal_id;
    goal.apply(10);

    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["id"], goal_id.to_string());
    assert_eq!(json["text"], "cycle");
    assert_eq!(json["total"], 30);
    assert_eq!(json["remaining"], 20);
    assert_eq!(json["completed"], false);

    let decoded: Goal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, goal);
}

#[test]
fn deserialize_rejects_remaining_above_total() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "bad",
        "total": 3,
        "remaining": 4,
        "completed": false
    });

    let err = serde_json::from_value::<Goal>(value).unwrap_err();
    assert!(
        err.to_string().contains("remaining (4) must be <= total (3)"),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_rejects_nil_id() {
    let mut goal = Goal::new("nil", 1);
    goal.id = Uuid::nil();
    assert_eq!(goal.validate().unwrap_err(), GoalValidationError::NilId);
}
