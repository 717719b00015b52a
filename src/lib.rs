pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod graph;
pub mod loader;
pub mod models;
pub mod sort;

pub use error::{GraphError, Result};
pub use graph::Graph;
pub use models::*;
pub use sort::topological_sort;
