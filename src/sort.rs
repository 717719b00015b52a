//! Depth-first topological sort with three-color cycle detection.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::models::SortReport;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace, warn};

/// Traversal state of a vertex within one sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Finished,
}

/// The sorter only queries vertices it enumerated from the store, so a missing
/// vertex means the graph changed underneath it.
fn invariant(err: GraphError) -> GraphError {
    match err {
        GraphError::VertexNotFound(v) => GraphError::InvariantViolation(v),
        other => other,
    }
}

/// A vertex on the DFS path together with the children still to visit
struct Frame {
    vertex: String,
    pending: Vec<String>,
}

/// Per-invocation state. Never stored on the graph.
struct Traversal<'g> {
    graph: &'g Graph,
    colors: HashMap<String, Color>,
    order: VecDeque<String>,
    is_dag: bool,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g Graph) -> Self {
        let colors = graph
            .get_vertices()
            .into_iter()
            .map(|v| (v, Color::Unvisited))
            .collect();
        Traversal {
            graph,
            colors,
            order: VecDeque::new(),
            is_dag: true,
        }
    }

    fn color(&self, vertex: &str) -> Color {
        self.colors
            .get(vertex)
            .copied()
            .unwrap_or(Color::Unvisited)
    }

    /// Mark `vertex` in progress and build its frame
    fn enter(&mut self, vertex: String) -> Result<Frame> {
        let pending = self
            .graph
            .get_children(&vertex)
            .map_err(invariant)?
            .into_iter()
            .collect();
        trace!(vertex = %vertex, "entering vertex");
        self.colors.insert(vertex.clone(), Color::InProgress);
        Ok(Frame { vertex, pending })
    }

    /// Visit `root` and everything reachable from it.
    ///
    /// Uses an explicit stack so path length is bounded by heap, not by the
    /// native call stack. A back-edge clears `is_dag` and skips that child
    /// only; the rest of the branch is still explored and finished.
    fn visit(&mut self, root: String) -> Result<()> {
        match self.color(&root) {
            Color::InProgress => {
                self.is_dag = false;
                return Ok(());
            }
            Color::Finished => return Ok(()),
            Color::Unvisited => {}
        }

        let mut stack = vec![self.enter(root)?];
        while let Some(frame) = stack.last_mut() {
            match frame.pending.pop() {
                Some(child) => match self.color(&child) {
                    Color::InProgress => {
                        warn!(from = %frame.vertex, to = %child, "back-edge found, graph has a cycle");
                        self.is_dag = false;
                    }
                    Color::Finished => {}
                    Color::Unvisited => {
                        let next = self.enter(child)?;
                        stack.push(next);
                    }
                },
                None => {
                    let done = stack.pop().map(|f| f.vertex);
                    if let Some(vertex) = done {
                        trace!(vertex = %vertex, "finished vertex");
                        self.colors.insert(vertex.clone(), Color::Finished);
                        self.order.push_front(vertex);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Topologically sort `graph`.
///
/// Returns the reverse-postorder of a depth-first search and whether the
/// graph is acyclic. A cycle is reported through `SortReport::is_dag`, not as
/// an error. The only error is `InvariantViolation`, raised if the graph
/// loses a vertex mid-sort, which means it was mutated concurrently.
pub fn topological_sort(graph: &Graph) -> Result<SortReport> {
    let mut traversal = Traversal::new(graph);
    debug!(vertices = traversal.colors.len(), "starting topological sort");

    let roots: Vec<String> = traversal.colors.keys().cloned().collect();
    for root in roots {
        if traversal.color(&root) == Color::Unvisited {
            traversal.visit(root)?;
        }
    }

    debug!(is_dag = traversal.is_dag, "topological sort finished");
    Ok(SortReport {
        order: traversal.order.into_iter().collect(),
        is_dag: traversal.is_dag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(vertices: &[&str], edges: &[(&str, &str)]) -> Graph {
        let graph = Graph::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        for (from, to) in edges {
            graph.add_edge(from, to, 1.0).unwrap();
        }
        graph
    }

    fn assert_valid_order(graph: &Graph, report: &SortReport) {
        assert!(report.is_dag);
        assert_eq!(report.order.len(), graph.vertex_count());
        for v in graph.get_vertices() {
            assert_eq!(report.order.iter().filter(|o| **o == v).count(), 1);
        }
        for edge in graph.edges() {
            assert!(
                report.precedes(&edge.from, &edge.to),
                "{} should precede {} in {:?}",
                edge.from,
                edge.to,
                report.order
            );
        }
    }

    #[test]
    fn test_empty_graph() {
        let report = topological_sort(&Graph::new()).unwrap();
        assert!(report.is_dag);
        assert!(report.order.is_empty());
    }

    #[test]
    fn test_linear_chain() {
        let graph = build(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let report = topological_sort(&graph).unwrap();
        assert_eq!(report.order, vec!["A", "B", "C"]);
        assert!(report.is_dag);
    }

    #[test]
    fn test_precedence_scenario() {
        let graph = build(
            &["S", "A", "B", "C", "D", "E", "F", "T"],
            &[
                ("S", "A"),
                ("S", "B"),
                ("S", "C"),
                ("A", "D"),
                ("B", "D"),
                ("B", "E"),
                ("C", "F"),
                ("D", "T"),
                ("E", "T"),
                ("F", "T"),
            ],
        );
        let report = topological_sort(&graph).unwrap();
        assert_valid_order(&graph, &report);

        for later in ["A", "B", "C"] {
            assert!(report.precedes("S", later));
        }
        for earlier in ["D", "E", "F"] {
            assert!(report.precedes(earlier, "T"));
        }
    }

    #[test]
    fn test_disconnected_components() {
        let graph = build(
            &["a1", "a2", "b1", "b2", "lonely"],
            &[("a1", "a2"), ("b1", "b2")],
        );
        let report = topological_sort(&graph).unwrap();
        assert_valid_order(&graph, &report);
    }

    #[test]
    fn test_three_cycle() {
        let graph = build(&["X", "Y", "Z"], &[("X", "Y"), ("Y", "Z"), ("Z", "X")]);
        let report = topological_sort(&graph).unwrap();
        assert!(!report.is_dag);
    }

    #[test]
    fn test_self_loop() {
        let graph = build(&["A", "B"], &[("A", "B"), ("B", "B")]);
        assert!(!topological_sort(&graph).unwrap().is_dag);
    }

    #[test]
    fn test_cycle_behind_dag_prefix() {
        let graph = build(
            &["root", "p", "q", "r"],
            &[("root", "p"), ("p", "q"), ("q", "r"), ("r", "p")],
        );
        assert!(!topological_sort(&graph).unwrap().is_dag);
    }

    #[test]
    fn test_repeated_sort_is_valid_both_times() {
        let graph = build(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let first = topological_sort(&graph).unwrap();
        let second = topological_sort(&graph).unwrap();
        assert_valid_order(&graph, &first);
        assert_valid_order(&graph, &second);
    }

    #[test]
    fn test_sort_after_breaking_cycle() {
        let graph = build(&["X", "Y", "Z"], &[("X", "Y"), ("Y", "Z"), ("Z", "X")]);
        assert!(!topological_sort(&graph).unwrap().is_dag);

        graph.delete_edge("Z", "X").unwrap();
        let report = topological_sort(&graph).unwrap();
        assert_eq!(report.order, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_invariant_maps_only_vertex_not_found() {
        assert!(matches!(
            invariant(GraphError::VertexNotFound("A".to_string())),
            GraphError::InvariantViolation(ref v) if v == "A"
        ));
        assert!(matches!(
            invariant(GraphError::EdgeNotFound {
                from: "A".to_string(),
                to: "B".to_string(),
            }),
            GraphError::EdgeNotFound { .. }
        ));
    }

    #[test]
    fn test_vertex_removed_mid_sort_aborts() {
        let graph = build(&["A", "B"], &[("A", "B")]);
        let mut traversal = Traversal::new(&graph);
        graph.delete_vertex("A");

        let err = traversal.visit("A".to_string()).unwrap_err();
        assert!(matches!(err, GraphError::InvariantViolation(ref v) if v == "A"));
        assert!(traversal.is_dag);
        assert!(traversal.order.is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let graph = Graph::new();
        let ids: Vec<String> = (0..100_000).map(|i| format!("n{i}")).collect();
        for id in &ids {
            graph.add_vertex(id);
        }
        for pair in ids.windows(2) {
            graph.add_edge(&pair[0], &pair[1], 1.0).unwrap();
        }

        let report = topological_sort(&graph).unwrap();
        assert!(report.is_dag);
        assert_eq!(report.order, ids);
    }
}
