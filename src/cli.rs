use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dagsort")]
#[command(about = "Topologically sort weighted directed graphs")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a topological order of a graph
    Sort {
        /// JSON document of graph definitions
        file: PathBuf,
        /// Graph identifier within the document
        #[arg(long)]
        graph: String,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every edge of a graph
    Show {
        /// JSON document of graph definitions
        file: PathBuf,
        /// Graph identifier within the document
        #[arg(long)]
        graph: String,
        /// Emit the edges as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// List the graphs defined in a document
    Graphs {
        /// JSON document of graph definitions
        file: PathBuf,
    },
}
