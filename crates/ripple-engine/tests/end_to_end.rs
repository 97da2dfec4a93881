//! Integration test: binding, dispatch, notification and undo through a
//! real manager.
//!
//! Covers the two reference scenarios: a composite child inserted at
//! `name` with a bound `name.first`, and a list of addresses whose bound
//! element follows its row across an insert.

use ripple_action::{Action, ActionKind, ListCreators};
use ripple_core::{StateGraph, Value};
use ripple_engine::Manager;
use ripple_mapping::Binding;
use ripple_test_utils::{call_count, fixtures, last, RecordingObserver};
use serde_json::json;

#[test]
fn update_notifies_once_and_undo_restores() {
    let mut manager = Manager::from_state(StateGraph::new());
    let root = manager.state().root();

    let child = manager
        .state_mut()
        .create_object(json!({"first": "Matthew"}))
        .unwrap();
    manager
        .dispatch(vec![Action::insert_state_object(root, "name", child)])
        .unwrap();
    assert_eq!(manager.state().full_path(child, "first").unwrap(), "name.first");

    let observer = RecordingObserver::new();
    let log = observer.handle();
    let id = manager.register_observer(observer);
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::new(
            id,
            "firstName",
            "name.first",
        ))])
        .unwrap();
    assert_eq!(call_count(&log), 0);

    let performed = manager
        .dispatch(vec![Action::update_property(child, "first", "Matt")])
        .unwrap();
    assert_eq!(call_count(&log), 1);
    let note = last(&log).unwrap();
    assert_eq!(note.actions.len(), 1);
    assert_eq!(note.actions[0].id(), performed[0].id());
    assert_eq!(manager.state().to_json(), json!({"name": {"first": "Matt"}}));

    manager.undo(1).unwrap();
    assert_eq!(manager.state().to_json(), json!({"name": {"first": "Matthew"}}));
    assert_eq!(call_count(&log), 2);
    let inverse = last(&log).unwrap();
    assert_eq!(inverse.kinds(), vec![ActionKind::UpdateProperty]);
    assert_eq!(
        inverse.actions[0].value().and_then(Value::as_str),
        Some("Matthew")
    );
}

#[test]
fn bound_element_follows_its_row_on_insert() {
    let mut manager = Manager::from_state(fixtures::addresses());
    let root = manager.state().root();

    let observer = RecordingObserver::new();
    let log = observer.handle();
    let id = manager.register_observer(observer);
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::element(
            id,
            "row",
            "addresses",
            1,
        ))])
        .unwrap();

    let fresh = manager
        .state_mut()
        .create_object(json!({"street": "New street"}))
        .unwrap();
    let insert = ListCreators::new(manager.state(), root, "addresses")
        .unwrap()
        .insert(0, fresh);
    manager.dispatch(vec![insert]).unwrap();

    assert_eq!(
        manager.state().to_json()["addresses"],
        json!([
            {"street": "New street"},
            {"street": "A street"},
            {"street": "B street"},
        ])
    );
    let moved = manager.mapping().get("addresses", Some(2)).unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].index, Some(2));
    assert!(manager.mapping().get("addresses", Some(1)).is_none());

    // The element binding was not at the insert slot, so nobody heard.
    assert_eq!(call_count(&log), 0);

    // The new element is linked under the list key.
    assert_eq!(manager.state().node_path(fresh).unwrap(), "addresses");
    assert_eq!(
        manager.state().element_position(fresh).unwrap(),
        (root, "addresses".to_string(), 0)
    );
}

#[test]
fn deleting_a_bound_element_notifies_and_undo_rebinds() {
    let mut manager = Manager::from_state(fixtures::addresses());
    let root = manager.state().root();
    let observer = RecordingObserver::new();
    let log = observer.handle();
    let id = manager.register_observer(observer);
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::element(
            id, "row", "addresses", 0,
        ))])
        .unwrap();

    manager
        .dispatch(vec![Action::delete_element(root, "addresses", 0)])
        .unwrap();
    assert_eq!(call_count(&log), 1);
    assert!(manager.mapping().get("addresses", Some(0)).is_none());

    manager.undo(1).unwrap();
    assert_eq!(call_count(&log), 2);
    assert_eq!(
        manager.state().to_json()["addresses"][0],
        json!({"street": "A street"})
    );
    let restored = manager.mapping().get("addresses", Some(0)).unwrap();
    assert_eq!(restored[0].target, "row");
}

#[test]
fn deleting_a_state_object_unbinds_descendants_until_undone() {
    let mut manager = Manager::from_state(fixtures::person());
    let root = manager.state().root();
    let observer = RecordingObserver::new();
    let log = observer.handle();
    let id = manager.register_observer(observer);
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::new(
            id,
            "first",
            "name.first",
        ))])
        .unwrap();

    manager
        .dispatch(vec![Action::delete_state_object(root, "name")])
        .unwrap();
    assert_eq!(call_count(&log), 1);
    assert_eq!(manager.mapping().binding_count(), 0);
    assert_eq!(manager.state().to_json(), json!({"age": 40}));

    manager.undo(1).unwrap();
    assert_eq!(manager.mapping().binding_count(), 1);
    assert_eq!(
        manager.state().to_json()["name"],
        json!({"first": "Matthew", "last": "Smith"})
    );
    // Reinsertion notifies the restored descendant binding.
    assert_eq!(call_count(&log), 2);
}

#[test]
fn redo_of_inserted_state_object_restores_its_bindings() {
    let mut manager = Manager::from_state(StateGraph::new());
    let root = manager.state().root();
    let child = manager
        .state_mut()
        .create_object(json!({"first": "Matthew"}))
        .unwrap();
    manager
        .dispatch(vec![Action::insert_state_object(root, "name", child)])
        .unwrap();
    let id = manager.register_observer(RecordingObserver::new());
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::new(
            id,
            "first",
            "name.first",
        ))])
        .unwrap();
    assert_eq!(manager.mapping().binding_count(), 1);

    manager.undo(1).unwrap();
    assert_eq!(manager.mapping().binding_count(), 0);

    manager.redo(1).unwrap();
    assert_eq!(manager.state().to_json(), json!({"name": {"first": "Matthew"}}));
    let bound = manager.mapping().get("name.first", None).unwrap();
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].observer, id);

    // A second round trip behaves the same.
    manager.undo(1).unwrap();
    manager.redo(1).unwrap();
    assert_eq!(manager.mapping().binding_count(), 1);
}

#[test]
fn redo_of_inserted_element_restores_its_bindings() {
    let mut manager = Manager::from_state(fixtures::addresses());
    let root = manager.state().root();
    manager
        .dispatch(vec![Action::insert_element(root, "addresses", 2, "C street")])
        .unwrap();
    let id = manager.register_observer(RecordingObserver::new());
    manager
        .dispatch(vec![Action::map_state_to_prop(Binding::element(
            id, "row", "addresses", 2,
        ))])
        .unwrap();

    manager.undo(1).unwrap();
    assert!(manager.mapping().get("addresses", Some(2)).is_none());

    manager.redo(1).unwrap();
    let bound = manager.mapping().get("addresses", Some(2)).unwrap();
    assert_eq!(bound[0].target, "row");
    assert_eq!(bound[0].index, Some(2));
}

#[test]
fn nested_path_computation() {
    let graph = fixtures::nested();
    let (b, key) = graph.resolve("a.b.field").unwrap();
    assert_eq!(graph.full_path(b, &key).unwrap(), "a.b.field");
    assert_eq!(graph.node_path(b).unwrap(), "a.b");
}
