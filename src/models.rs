use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Adjacency mapping as it appears in serialized input: source -> { target -> weight }
pub type Adjacency = HashMap<String, HashMap<String, f64>>;

/// A weighted directed edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {} --> {}", self.from, self.weight, self.to)
    }
}

/// Outcome of a topological sort.
///
/// `order` is only a valid topological order when `is_dag` is true. When a
/// cycle was found it holds whatever the traversal collected and carries no
/// ordering guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortReport {
    pub order: Vec<String>,
    pub is_dag: bool,
}

impl SortReport {
    /// Index of `id` in the order, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|v| v == id)
    }

    /// True if both vertices are present and `before` comes strictly first
    pub fn precedes(&self, before: &str, after: &str) -> bool {
        match (self.position(before), self.position(after)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}
