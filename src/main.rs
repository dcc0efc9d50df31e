use anyhow::{Context, Result};
use clap::Parser;
use cholorder::io::read_stl;
use cholorder::{AdjacencyView, StrategyOutcome, StudyConfig, VertexGraph, run_study};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compare vertex reorderings by the sparsity of the Cholesky factor of the
/// mesh's pattern matrix.
#[derive(Parser)]
#[command(name = "cholorder")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// STL mesh to analyze (built-in six-vertex demo graph if omitted)
    mesh: Option<PathBuf>,

    /// Path to a JSON study configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random strategy
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run strategies one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => StudyConfig::load(path)?,
        None => StudyConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.sequential {
        config.parallel = false;
    }

    let graph = match &cli.mesh {
        Some(path) => {
            let mesh = read_stl(path)?;
            VertexGraph::from_mesh(&mesh)
        }
        None => VertexGraph::demo(),
    };
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph ready"
    );

    let outcomes = run_study(&graph, &config);

    if cli.json {
        print_json(&outcomes)?;
    } else {
        print_table(&outcomes);
    }
    Ok(())
}

fn print_table(outcomes: &[StrategyOutcome]) {
    for o in outcomes {
        println!("------ {} ------", o.name());
        match &o.result {
            Ok(r) => {
                println!("sparsity:  {:.4}", r.sparsity);
                println!("fill-in:   {}", r.fill_in);
                println!("bandwidth: {}", r.bandwidth);
            }
            Err(e) => println!("skipped: {e}"),
        }
    }
}

fn print_json(outcomes: &[StrategyOutcome]) -> Result<()> {
    let values: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(r) => serde_json::to_value(r),
            Err(e) => Ok(serde_json::json!({ "name": o.name(), "error": e.to_string() })),
        })
        .collect::<std::result::Result<_, _>>()
        .context("Failed to serialize reports")?;
    let s = serde_json::to_string_pretty(&values).context("Failed to serialize reports")?;
    println!("{s}");
    Ok(())
}
