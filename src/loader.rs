//! Building graphs from serialized adjacency documents.
//!
//! A document maps graph identifiers to adjacency mappings:
//! `{ "<graph>": { "<source>": { "<target>": <weight> } } }`.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::models::Adjacency;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A collection of named graph definitions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GraphDocument {
    graphs: HashMap<String, Adjacency>,
}

impl GraphDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let document = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), graphs = document.graphs.len(), "loaded graph document");
        Ok(document)
    }

    /// Graph identifiers, sorted
    pub fn graph_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.graphs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn adjacency(&self, id: &str) -> Option<&Adjacency> {
        self.graphs.get(id)
    }

    /// Construct the graph named `id`
    pub fn build(&self, id: &str) -> Result<Graph> {
        let adjacency = self
            .adjacency(id)
            .ok_or_else(|| GraphError::GraphNotDefined(id.to_string()))?;
        Graph::from_adjacency(adjacency)
    }
}

impl Graph {
    /// Build a graph from a complete adjacency mapping.
    ///
    /// Edges are set with overwrite semantics, so the mapping is taken as the
    /// exact weights rather than increments.
    pub fn from_adjacency(adjacency: &Adjacency) -> Result<Graph> {
        let graph = Graph::new();
        for (source, targets) in adjacency {
            graph.add_vertex(source);
            for (target, &weight) in targets {
                graph.add_vertex(target);
                graph.replace_edge(source, target, weight)?;
            }
        }
        Ok(graph)
    }
}
