//! graph-diameter: print the diameter of an undirected graph.
//!
//! Reads a whitespace-separated edge list (two node names per line, blank
//! lines and `#` comments ignored) from a file or stdin and writes the
//! longest shortest path, in hops, to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use graph_diameter_core::{diameter_with, DiameterOptions, Graph};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compute the exact diameter of an undirected, unweighted graph.
#[derive(Parser, Debug)]
#[command(name = "graph-diameter", author, version)]
#[command(after_help = "Examples:
  graph-diameter edges.txt
  cat edges.txt | graph-diameter --parallel --stats")]
struct Cli {
    /// Edge list file, or - for stdin
    #[arg(default_value = "-", env = "GRAPH_DIAMETER_INPUT")]
    input: PathBuf,

    /// Run the per-node BFS passes on a thread pool
    #[arg(short, long, env = "GRAPH_DIAMETER_PARALLEL")]
    parallel: bool,

    /// Worker threads for --parallel (0 = one per CPU)
    #[arg(short, long, default_value_t = 0, env = "GRAPH_DIAMETER_THREADS")]
    threads: usize,

    /// Print node, edge and component counts plus timing to stderr
    #[arg(long)]
    stats: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> DiameterOptions {
        DiameterOptions {
            parallel: self.parallel || self.threads > 0,
            threads: self.threads,
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn run(cli: &Cli) -> Result<()> {
    let reader = open_input(&cli.input)?;
    let graph = Graph::from_reader(reader)
        .with_context(|| format!("failed to load edge list from {}", cli.input.display()))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        self_loops = graph.self_loop_count(),
        "graph loaded"
    );

    let options = cli.options();
    debug!(?options, "computing diameter");
    let report = diameter_with(&graph, &options)?;

    if cli.stats {
        eprintln!(
            "nodes: {}  edges: {}  components: {}  passes: {}  time: {:.1}ms",
            report.node_count,
            graph.edge_count(),
            report.components,
            report.passes,
            report.elapsed.as_secs_f64() * 1000.0
        );
    }
    println!("{}", report.diameter);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
