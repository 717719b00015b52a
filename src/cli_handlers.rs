use crate::graph::Graph;
use crate::loader::GraphDocument;
use crate::sort::topological_sort;
use anyhow::{Context, bail};
use std::path::Path;

fn load_graph(file: &Path, graph_id: &str) -> anyhow::Result<Graph> {
    let document = GraphDocument::from_path(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    Ok(document.build(graph_id)?)
}

/// Handle the sort command
pub fn handle_sort(file: &Path, graph_id: &str, json: bool) -> anyhow::Result<()> {
    let graph = load_graph(file, graph_id)?;
    let report = topological_sort(&graph)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if !report.is_dag {
        bail!("Graph '{graph_id}' contains a cycle; no topological order exists");
    }
    if !json {
        for vertex in &report.order {
            println!("{vertex}");
        }
    }

    Ok(())
}

/// Handle the show command
pub fn handle_show(file: &Path, graph_id: &str, json: bool) -> anyhow::Result<()> {
    let graph = load_graph(file, graph_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&graph.edges())?);
        return Ok(());
    }
    if graph.edge_count() == 0 {
        eprintln!("Graph '{graph_id}' has no edges ({} vertices)", graph.vertex_count());
        return Ok(());
    }
    print!("{graph}");

    Ok(())
}

/// Handle the graphs command
pub fn handle_graphs(file: &Path) -> anyhow::Result<()> {
    let document = GraphDocument::from_path(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let ids = document.graph_ids();
    if ids.is_empty() {
        println!("No graphs found.");
        return Ok(());
    }
    for id in ids {
        println!("{id}");
    }

    Ok(())
}
