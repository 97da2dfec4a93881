//! Values stored in state node properties.

use serde_json::Value as Json;

use crate::id::NodeId;

/// A property value inside a [`StateNode`](crate::StateNode).
///
/// Three shapes exist:
///
/// - [`Value::Plain`]: any plain JSON datum (scalar, plain object or plain
///   array). Plain values carry no parent link and are replaced wholesale.
/// - [`Value::List`]: an observable array. Lists are not state nodes
///   themselves; array-element actions address them by owning node,
///   property key and index.
/// - [`Value::Node`]: a composite child, linked to its owner through the
///   child's own `parent` / `own_key` fields.
///
/// # Examples
///
/// ```
/// use ripple_core::Value;
///
/// let name = Value::from("Matthew");
/// assert_eq!(name.as_str(), Some("Matthew"));
///
/// let tags = Value::list(["a", "b"]);
/// assert_eq!(tags.as_list().map(|l| l.len()), Some(2));
/// assert!(!tags.is_null());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A plain JSON datum.
    Plain(Json),
    /// An observable array of values.
    List(Vec<Value>),
    /// A composite child node.
    Node(NodeId),
}

impl Value {
    /// The plain `null` value.
    pub fn null() -> Self {
        Self::Plain(Json::Null)
    }

    /// Build a list from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether this is the plain `null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Plain(Json::Null))
    }

    /// Whether this value is a composite child node.
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// The child node id, if this is a composite value.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// The list elements, if this is a list.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable list elements, if this is a list.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The plain JSON datum, if this is a plain value.
    pub fn as_plain(&self) -> Option<&Json> {
        match self {
            Self::Plain(json) => Some(json),
            _ => None,
        }
    }

    /// Shorthand for a plain string value.
    pub fn as_str(&self) -> Option<&str> {
        self.as_plain().and_then(Json::as_str)
    }

    /// Shorthand for a plain numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_plain().and_then(Json::as_f64)
    }
}

impl From<Json> for Value {
    fn from(v: Json) -> Self {
        Self::Plain(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Plain(Json::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Plain(Json::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Plain(Json::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Plain(Json::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Plain(Json::from(v))
    }
}

impl From<NodeId> for Value {
    fn from(v: NodeId) -> Self {
        Self::Node(v)
    }
}
