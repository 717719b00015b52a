//! Directed weighted graph store with mirrored forward and reverse adjacency.

use crate::error::{GraphError, Result};
use crate::models::Edge;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// The three maps that make up a graph. Always locked together.
#[derive(Debug, Default)]
struct GraphInner {
    vertices: HashSet<String>,
    /// source -> (target -> weight)
    children: HashMap<String, HashMap<String, f64>>,
    /// target -> (source -> weight)
    parents: HashMap<String, HashMap<String, f64>>,
}

impl GraphInner {
    /// Fails with the first of `from`/`to` that is not a vertex
    fn require_pair(&self, from: &str, to: &str) -> Result<()> {
        self.require(from)?;
        self.require(to)
    }

    fn require(&self, id: &str) -> Result<()> {
        if self.vertices.contains(id) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(id.to_string()))
        }
    }

    fn set_weight(&mut self, from: &str, to: &str, weight: f64) {
        self.children
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), weight);
        self.parents
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string(), weight);
    }

    fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.children.get(from).and_then(|c| c.get(to)).copied()
    }
}

/// A directed, weighted graph keyed by string vertex identifiers.
///
/// Every public operation takes the lock for its own duration only. Sequences
/// of calls are not atomic as a whole.
#[derive(Debug, Default)]
pub struct Graph {
    inner: RwLock<GraphInner>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Vertex Operations ====================

    /// Insert a vertex. Returns false if it was already present.
    pub fn add_vertex(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        if !inner.vertices.insert(id.to_string()) {
            return false;
        }
        inner.children.entry(id.to_string()).or_default();
        inner.parents.entry(id.to_string()).or_default();
        debug!(vertex = id, "added vertex");
        true
    }

    /// Membership test
    pub fn find_vertex(&self, id: &str) -> bool {
        self.inner.read().vertices.contains(id)
    }

    /// Remove a vertex and every edge touching it.
    /// Returns false (and changes nothing) if the vertex was absent.
    pub fn delete_vertex(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        if !inner.vertices.remove(id) {
            return false;
        }

        // Purge incoming references from every other vertex's outgoing map,
        // and outgoing references from every other vertex's incoming map.
        for targets in inner.children.values_mut() {
            targets.remove(id);
        }
        for sources in inner.parents.values_mut() {
            sources.remove(id);
        }
        inner.children.remove(id);
        inner.parents.remove(id);

        debug!(vertex = id, "deleted vertex");
        true
    }

    /// Snapshot of the vertex set
    pub fn get_vertices(&self) -> HashSet<String> {
        self.inner.read().vertices.clone()
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.read().vertices.len()
    }

    // ==================== Edge Operations ====================

    /// Add `weight` to the edge `from -> to`, creating it if it does not exist.
    pub fn add_edge(&self, from: &str, to: &str, weight: f64) -> Result<()> {
        let mut inner = self.inner.write();
        inner.require_pair(from, to)?;

        let total = inner.weight(from, to).map_or(weight, |w| w + weight);
        inner.set_weight(from, to, total);
        debug!(from, to, weight = total, "added edge");
        Ok(())
    }

    /// Set the weight of `from -> to`, overwriting any previous weight.
    pub fn replace_edge(&self, from: &str, to: &str, weight: f64) -> Result<()> {
        let mut inner = self.inner.write();
        inner.require_pair(from, to)?;

        inner.set_weight(from, to, weight);
        debug!(from, to, weight, "replaced edge");
        Ok(())
    }

    /// Remove `from -> to`. Removing an edge that does not exist is a no-op.
    pub fn delete_edge(&self, from: &str, to: &str) -> Result<()> {
        let mut inner = self.inner.write();
        inner.require_pair(from, to)?;

        let removed = inner
            .children
            .get_mut(from)
            .and_then(|targets| targets.remove(to))
            .is_some();
        if let Some(sources) = inner.parents.get_mut(to) {
            sources.remove(from);
        }
        if removed {
            debug!(from, to, "deleted edge");
        }
        Ok(())
    }

    /// Weight of `from -> to`
    pub fn get_weight(&self, from: &str, to: &str) -> Result<f64> {
        let inner = self.inner.read();
        inner.require_pair(from, to)?;
        inner.weight(from, to).ok_or_else(|| GraphError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Vertices with an edge into `id`
    pub fn get_parents(&self, id: &str) -> Result<HashSet<String>> {
        let inner = self.inner.read();
        inner.require(id)?;
        Ok(inner
            .parents
            .get(id)
            .map(|sources| sources.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Vertices `id` has an edge to
    pub fn get_children(&self, id: &str) -> Result<HashSet<String>> {
        let inner = self.inner.read();
        inner.require(id)?;
        Ok(inner
            .children
            .get(id)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default())
    }

    pub fn edge_count(&self) -> usize {
        self.inner.read().children.values().map(HashMap::len).sum()
    }

    /// Snapshot of every edge, sorted by source then target
    pub fn edges(&self) -> Vec<Edge> {
        let inner = self.inner.read();
        let mut edges: Vec<Edge> = inner
            .children
            .iter()
            .flat_map(|(from, targets)| {
                targets.iter().map(move |(to, &weight)| Edge {
                    from: from.clone(),
                    to: to.clone(),
                    weight,
                })
            })
            .collect();
        edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));
        edges
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.edges() {
            writeln!(f, "{edge}")?;
        }
        Ok(())
    }
}
