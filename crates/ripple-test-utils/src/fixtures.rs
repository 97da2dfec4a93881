//! Reusable state fixtures.
//!
//! - [`person`]: `{"name": {"first": "Matthew", "last": "Smith"}, "age": 40}`
//! - [`addresses`]: an `addresses` list of two composite elements
//! - [`nested`]: the three-level `a.b.field` chain

use ripple_core::StateGraph;
use ripple_engine::{Manager, ManagerConfig};
use serde_json::{json, Value as Json};

pub fn person() -> StateGraph {
    graph(json!({
        "name": {"first": "Matthew", "last": "Smith"},
        "age": 40,
    }))
}

pub fn addresses() -> StateGraph {
    graph(json!({
        "addresses": [
            {"street": "A street"},
            {"street": "B street"},
        ],
    }))
}

pub fn nested() -> StateGraph {
    graph(json!({"a": {"b": {"field": 1}}}))
}

/// Build a graph from a JSON object literal.
pub fn graph(json: Json) -> StateGraph {
    StateGraph::from_json(json).expect("fixture must be a JSON object")
}

/// A manager over `graph` with mutation checking on.
pub fn checked_manager(graph: StateGraph) -> Manager {
    let config = ManagerConfig {
        check_mutations: true,
        ..ManagerConfig::default()
    };
    Manager::new(graph, config).expect("default config is valid")
}

/// A manager over `graph` with a history of `capacity` entries.
pub fn bounded_manager(graph: StateGraph, capacity: usize) -> Manager {
    let config = ManagerConfig {
        action_queue_size: capacity,
        ..ManagerConfig::default()
    };
    Manager::new(graph, config).expect("capacity must be non-zero")
}
