use clap::Parser;
use dagsort::cli::{Cli, Commands};
use dagsort::cli_handlers;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort { file, graph, json } => cli_handlers::handle_sort(&file, &graph, json),
        Commands::Show { file, graph, json } => cli_handlers::handle_show(&file, &graph, json),
        Commands::Graphs { file } => cli_handlers::handle_graphs(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
