//! Benchmark fixtures for the Ripple action engine.
//!
//! - [`wide_state`]: a flat object with many scalar properties
//! - [`list_state`]: one list of composite rows
//! - [`bound_manager`]: a manager with one observer bound to every row

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ripple_action::Action;
use ripple_core::{ObserverId, StateGraph};
use ripple_engine::{DispatchQueue, Manager, ManagerConfig};
use ripple_mapping::Binding;
use serde_json::{json, Map, Value as Json};

/// `{"p0": 0, "p1": 1, ...}` with `width` properties.
pub fn wide_state(width: usize) -> StateGraph {
    let map: Map<String, Json> = (0..width)
        .map(|i| (format!("p{i}"), json!(i)))
        .collect();
    StateGraph::from_json(Json::Object(map)).expect("object literal")
}

/// `{"rows": [{"id": 0, "label": "row 0"}, ...]}` with `len` rows.
pub fn list_state(len: usize) -> StateGraph {
    let rows: Vec<Json> = (0..len)
        .map(|i| json!({"id": i, "label": format!("row {i}")}))
        .collect();
    StateGraph::from_json(json!({ "rows": rows })).expect("object literal")
}

/// A manager over [`list_state`] with one observer bound to each row.
pub fn bound_manager(len: usize, check_mutations: bool) -> (Manager, ObserverId) {
    let config = ManagerConfig {
        check_mutations,
        action_queue_size: 1024,
    };
    let mut manager = Manager::new(list_state(len), config).expect("valid config");
    let id = manager.register_observer(|_: &[Action], _: &mut DispatchQueue| {});
    let bindings = (0..len)
        .map(|i| Action::map_state_to_prop(Binding::element(id, format!("row{i}"), "rows", i)))
        .collect();
    manager.dispatch(bindings).expect("binding batch");
    (manager, id)
}
