//! Integration test: conditional creators, no-op filtering and the
//! treatment of unchanged updates.
//!
//! Unchanged plain updates are real actions: they are performed (with
//! `changed() == false`), notified and recorded. Callers that want
//! nothing to happen use the conditional creators, which yield no-ops
//! the dispatcher drops before doing any work.

use ripple_action::{Action, Creators, ListCreators, NoOpKind};
use ripple_engine::Manager;
use ripple_mapping::Binding;
use ripple_test_utils::{call_count, fixtures, RecordingObserver};
use serde_json::json;

#[test]
fn batch_of_no_ops_changes_nothing() {
    let mut manager = Manager::from_state(fixtures::person());
    let before = manager.state().to_json();
    let bindings = manager.mapping().binding_count();

    let out = manager
        .dispatch(vec![
            Action::no_op(NoOpKind::Update),
            Action::no_op(NoOpKind::Insert),
            Action::no_op(NoOpKind::Delete),
        ])
        .unwrap();
    assert!(out.is_empty());
    assert_eq!(manager.state().to_json(), before);
    assert_eq!(manager.mapping().binding_count(), bindings);
    assert!(!manager.can_undo());
}

#[test]
fn conditional_creators_yield_no_ops_when_nothing_to_do() {
    let mut manager = Manager::from_state(fixtures::person());
    let root = manager.state().root();
    let batch = {
        let c = Creators::new(manager.state(), root).unwrap();
        vec![
            c.update_if_changed("age", 40i64).unwrap(),
            c.insert_if_empty("age", 1i64).unwrap(),
            c.remove_if_present("missing").unwrap(),
        ]
    };
    assert!(manager.dispatch(batch).unwrap().is_empty());

    let batch = {
        let c = Creators::new(manager.state(), root).unwrap();
        vec![c.update_if_changed("age", 41i64).unwrap()]
    };
    assert_eq!(manager.dispatch(batch).unwrap().len(), 1);
    assert_eq!(manager.state().to_json()["age"], json!(41));
}

#[test]
fn unchanged_update_is_still_recorded_and_notified() {
    let mut manager = Manager::from_state(fixtures::person());
    let root = manager.state().root();
    let observer = RecordingObserver::new();
    let log = observer.handle();
    let id = manager.register_observer(observer);
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::new(id, "age", "age"))])
        .unwrap();

    let out = manager
        .dispatch(vec![Action::update_property(root, "age", 40i64)])
        .unwrap();
    assert!(!out[0].changed());
    assert_eq!(call_count(&log), 1);
    assert_eq!(manager.history().undo_len(), 1);
}

#[test]
fn list_conditional_creators() {
    let mut manager = Manager::from_state(fixtures::graph(json!({"tags": ["a", "b"]})));
    let root = manager.state().root();
    let batch = {
        let tags = ListCreators::new(manager.state(), root, "tags").unwrap();
        vec![tags.update_if_changed(0, "a"), tags.remove_if_present(7)]
    };
    assert!(manager.dispatch(batch).unwrap().is_empty());

    let batch = {
        let tags = ListCreators::new(manager.state(), root, "tags").unwrap();
        vec![tags.push("c"), tags.update_if_changed(0, "z")]
    };
    manager.dispatch(batch).unwrap();
    assert_eq!(manager.state().to_json(), json!({"tags": ["z", "b", "c"]}));
}
