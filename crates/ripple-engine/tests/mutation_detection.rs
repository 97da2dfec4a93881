//! Integration test: the mutation guard catches writes that bypass the
//! action pipeline, and only when enabled.

use ripple_action::Action;
use ripple_core::Value;
use ripple_engine::{DispatchError, Manager, ManagerConfig, PathOnlyHandler, WarnHandler};
use ripple_test_utils::fixtures;
use serde_json::json;

fn poke(manager: &mut Manager) {
    let (name, _) = manager.state().resolve("name.first").unwrap();
    manager
        .state_mut()
        .node_mut(name)
        .unwrap()
        .set("first", Value::from("Sneaky"));
}

#[test]
fn direct_write_is_reported_when_checking() {
    let mut manager = fixtures::checked_manager(fixtures::person());
    let root = manager.state().root();
    poke(&mut manager);

    let err = manager
        .dispatch(vec![Action::update_property(root, "age", 41i64)])
        .unwrap_err();
    let violation = match err {
        DispatchError::Mutation(v) => v,
        other => panic!("expected a mutation violation, got {other:?}"),
    };
    assert_eq!(violation.path, "name.first");
    assert_eq!(violation.before, json!("Matthew"));
    assert_eq!(violation.after, json!("Sneaky"));
    assert!(violation.diff.is_some());

    // Nothing was performed.
    assert_eq!(manager.state().to_json()["age"], json!(40));
    assert!(!manager.can_undo());
}

#[test]
fn direct_write_is_ignored_when_not_checking() {
    let mut manager = Manager::from_state(fixtures::person());
    let root = manager.state().root();
    poke(&mut manager);
    manager
        .dispatch(vec![Action::update_property(root, "age", 41i64)])
        .unwrap();
    assert_eq!(manager.state().to_json()["name"]["first"], json!("Sneaky"));
}

#[test]
fn actions_keep_the_snapshot_current() {
    let mut manager = fixtures::checked_manager(fixtures::person());
    let root = manager.state().root();
    for age in 41..45i64 {
        manager
            .dispatch(vec![Action::update_property(root, "age", age)])
            .unwrap();
    }
    manager.undo(2).unwrap();
    manager.redo(1).unwrap();
    assert!(manager.is_checking_mutations());
    assert_eq!(manager.state().to_json()["age"], json!(43));
}

#[test]
fn enabling_later_takes_a_fresh_baseline() {
    let mut manager = Manager::from_state(fixtures::person());
    let root = manager.state().root();
    poke(&mut manager);
    manager.enable_mutation_check();
    assert!(manager.is_checking_mutations());
    manager
        .dispatch(vec![Action::update_property(root, "age", 41i64)])
        .unwrap();
}

#[test]
fn handlers_are_replaceable() {
    let mut manager = fixtures::checked_manager(fixtures::person());
    let root = manager.state().root();
    manager.set_violation_handler(PathOnlyHandler);
    poke(&mut manager);
    let err = manager
        .dispatch(vec![Action::update_property(root, "age", 41i64)])
        .unwrap_err();
    assert!(matches!(err, DispatchError::Mutation(ref v) if v.diff.is_none()));

    manager.set_violation_handler(WarnHandler);
    manager
        .dispatch(vec![Action::update_property(root, "age", 41i64)])
        .unwrap();
}

#[test]
fn config_flag_enables_guard_at_construction() {
    let config = ManagerConfig::from_json(r#"{"checkMutations": true}"#).unwrap();
    let manager = Manager::new(fixtures::person(), config).unwrap();
    assert!(manager.is_checking_mutations());
}
