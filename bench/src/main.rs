use graph_diameter_core::{connected_components, diameter, diameter_parallel, Graph};
use std::collections::VecDeque;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// A generator builds a graph of roughly `node_count` nodes and, when the
/// topology makes it obvious, returns the diameter it must have.
type Generator = fn(u64) -> (Graph, Option<u32>);

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-diameter-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  path        Single chain (diameter = n - 1, worst case per pass)");
        println!("  cycle       Ring (diameter = n / 2)");
        println!("  grid        Square lattice (diameter = 2 * (side - 1))");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 2000 (cost grows as V * (V + E))");
        return;
    }

    println!("graph-diameter-bench");
    println!("====================");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "path" => vec![("Path", gen_path as Generator)],
        "cycle" => vec![("Cycle", gen_cycle as Generator)],
        "grid" => vec![("Grid lattice", gen_grid as Generator)],
        "lsystem" => vec![("L-system tree", gen_lsystem as Generator)],
        "random" => vec![("Erdos-Renyi random", gen_random as Generator)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell as Generator)],
        "dla" => vec![("DLA (organic branching)", gen_dla as Generator)],
        "all" => vec![
            ("Path", gen_path as Generator),
            ("Cycle", gen_cycle),
            ("Grid lattice", gen_grid),
            ("L-system tree", gen_lsystem),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            std::process::exit(2);
        }
    };

    let mut failures = 0;
    for (name, generator) in generators {
        if !run_benchmark(name, generator, node_count) {
            failures += 1;
        }
    }

    if failures > 0 {
        eprintln!("{} benchmark(s) produced an unexpected diameter", failures);
        std::process::exit(1);
    }
}

/// Build, time both schedules, and check them against each other and the
/// generator's expected value. Returns false on any mismatch.
fn run_benchmark(name: &str, generator: Generator, node_count: u64) -> bool {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let (graph, expected) = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, {} components, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        connected_components(&graph),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>12} {:>10} {:>12}", "schedule", "diameter", "time");
    println!("{:->12} {:->10} {:->12}", "", "", "");

    let t = Instant::now();
    let sequential = diameter(&graph);
    let seq_time = t.elapsed();
    println!(
        "{:>12} {:>10} {:>10.1}ms",
        "sequential",
        sequential,
        seq_time.as_secs_f64() * 1000.0
    );

    let t = Instant::now();
    let parallel = diameter_parallel(&graph);
    let par_time = t.elapsed();
    println!(
        "{:>12} {:>10} {:>10.1}ms",
        "parallel",
        parallel,
        par_time.as_secs_f64() * 1000.0
    );

    let mut ok = true;
    if sequential != parallel {
        println!("MISMATCH: sequential {} != parallel {}", sequential, parallel);
        ok = false;
    }
    if let Some(want) = expected {
        if sequential != want {
            println!("MISMATCH: expected diameter {}, got {}", want, sequential);
            ok = false;
        }
    }
    println!();
    ok
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn name(id: u64) -> String {
    format!("c_{}", id)
}

fn link(graph: &mut Graph, a: u64, b: u64) {
    graph.add_edge(&name(a), &name(b));
}

/// Chain 0 - 1 - ... - (n-1). Every BFS pass walks the whole graph.
fn gen_path(node_count: u64) -> (Graph, Option<u32>) {
    let n = node_count.max(1);
    let mut graph = Graph::with_capacity(n as usize);
    graph.add_node(&name(0));
    for i in 1..n {
        link(&mut graph, i - 1, i);
    }
    (graph, Some((n - 1) as u32))
}

/// Ring of n nodes.
fn gen_cycle(node_count: u64) -> (Graph, Option<u32>) {
    let n = node_count.max(3);
    let mut graph = Graph::with_capacity(n as usize);
    for i in 0..n {
        link(&mut graph, i, (i + 1) % n);
    }
    (graph, Some((n / 2) as u32))
}

/// Square lattice with side floor(sqrt(n)), 4-neighborhood.
fn gen_grid(node_count: u64) -> (Graph, Option<u32>) {
    let side = ((node_count as f64).sqrt() as u64).max(2);
    let mut graph = Graph::with_capacity((side * side) as usize);
    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            if x + 1 < side {
                link(&mut graph, id, id + 1);
            }
            if y + 1 < side {
                link(&mut graph, id, id + side);
            }
        }
    }
    (graph, Some((2 * (side - 1)) as u32))
}

/// L-system fractal tree: every node spawns 3 children, breadth first.
///
/// Produces log-depth paths with exponential width.
fn gen_lsystem(node_count: u64) -> (Graph, Option<u32>) {
    let mut graph = Graph::with_capacity(node_count as usize);
    let branching = 3u64;
    graph.add_node(&name(0));

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                link(&mut graph, parent, child);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    (graph, None)
}

/// Erdos-Renyi: ~4 uniform random edges per node. May be disconnected.
fn gen_random(node_count: u64) -> (Graph, Option<u32>) {
    let n = node_count.max(2);
    let target_edges = n * 4;
    let mut graph = Graph::with_capacity(n as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..n {
        graph.add_node(&name(i));
    }

    for _ in 0..target_edges {
        let from = rng.next(n);
        let to = rng.next(n);
        if from != to {
            link(&mut graph, from, to);
        }
    }

    (graph, None)
}

/// Barbell: two dense random clusters joined by a chain of bridge nodes.
fn gen_barbell(node_count: u64) -> (Graph, Option<u32>) {
    let bridge_len = 10u64;
    let clique_size = (node_count.saturating_sub(bridge_len) / 2).max(2);
    let mut graph = Graph::with_capacity((clique_size * 2 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);

    let mut cluster = |graph: &mut Graph, offset: u64| {
        for i in 0..clique_size {
            graph.add_node(&name(offset + i));
        }
        // A spine keeps each cluster connected regardless of the random picks.
        for i in 1..clique_size {
            link(graph, offset + i - 1, offset + i);
        }
        for i in 0..clique_size {
            for _ in 0..8u64.min(clique_size - 1) {
                let target = rng.next(clique_size);
                if target != i {
                    link(graph, offset + i, offset + target);
                }
            }
        }
    };

    cluster(&mut graph, 0);

    let bridge_start = clique_size;
    link(&mut graph, clique_size - 1, bridge_start);
    for i in 1..bridge_len {
        link(&mut graph, bridge_start + i - 1, bridge_start + i);
    }

    let b_start = bridge_start + bridge_len;
    cluster(&mut graph, b_start);
    link(&mut graph, b_start - 1, b_start);

    (graph, None)
}

/// DLA (diffusion-limited aggregation): each new node sticks to a recent
/// "surface" node, with occasional long-range shortcuts.
fn gen_dla(node_count: u64) -> (Graph, Option<u32>) {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(77777);

    graph.add_node(&name(0));

    let surface_max = 500usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        link(&mut graph, new_node, attach_to);

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next_f64() < 0.1 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                link(&mut graph, new_node, other);
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    (graph, None)
}
