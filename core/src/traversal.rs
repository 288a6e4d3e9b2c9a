use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::GraphError;
use crate::graph::{Graph, NodeId};

/// Depth marker for nodes the current pass has not reached.
const UNDISCOVERED: u32 = u32::MAX;

/// How [`diameter_with`] schedules its BFS passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiameterOptions {
    /// Run one BFS per start node on a rayon pool instead of sequentially.
    pub parallel: bool,
    /// Worker threads for the parallel run. 0 uses rayon's global pool.
    pub threads: usize,
}

/// Outcome of a diameter computation plus the bookkeeping around it.
#[derive(Debug, Clone)]
pub struct DiameterReport {
    pub diameter: u32,
    pub node_count: usize,
    /// BFS passes run (one per node).
    pub passes: usize,
    pub components: usize,
    pub elapsed: Duration,
}

/// Per-pass BFS working state: discovered depth per node and the FIFO frontier.
///
/// Reused across passes by one worker; never shared between workers.
struct BfsScratch {
    depth: Vec<u32>,
    queue: VecDeque<NodeId>,
}

impl BfsScratch {
    fn new(node_count: usize) -> Self {
        Self {
            depth: vec![UNDISCOVERED; node_count],
            queue: VecDeque::with_capacity(node_count),
        }
    }

    /// BFS from `start`. Returns the depth of the last node dequeued, which is
    /// the eccentricity of `start` within its component.
    ///
    /// `start` must be a valid id of `graph`.
    fn run(&mut self, graph: &Graph, start: NodeId) -> u32 {
        let nodes = graph.nodes();
        self.depth.fill(UNDISCOVERED);
        self.queue.clear();

        self.depth[start as usize] = 0;
        self.queue.push_back(start);
        let mut last = start;

        while let Some(current) = self.queue.pop_front() {
            last = current;
            let next = self.depth[current as usize] + 1;
            for m in nodes[current as usize].neighbors() {
                let slot = &mut self.depth[m as usize];
                if *slot == UNDISCOVERED {
                    *slot = next;
                    self.queue.push_back(m);
                }
            }
        }

        self.depth[last as usize]
    }
}

/// Hop distance from `start` to every node, indexed by id.
///
/// `None` marks nodes in other components. Empty if `start` is not in the graph.
pub fn bfs_depths(graph: &Graph, start: NodeId) -> Vec<Option<u32>> {
    if graph.node(start).is_none() {
        return Vec::new();
    }
    let mut scratch = BfsScratch::new(graph.node_count());
    scratch.run(graph, start);
    scratch
        .depth
        .into_iter()
        .map(|d| (d != UNDISCOVERED).then_some(d))
        .collect()
}

/// Greatest hop distance from `start` to any node it can reach.
///
/// Returns None if `start` is not in the graph.
pub fn eccentricity(graph: &Graph, start: NodeId) -> Option<u32> {
    graph.node(start)?;
    let mut scratch = BfsScratch::new(graph.node_count());
    Some(scratch.run(graph, start))
}

/// Eccentricity of every node, in id order.
pub fn eccentricities(graph: &Graph) -> Vec<u32> {
    let mut scratch = BfsScratch::new(graph.node_count());
    (0..graph.node_count() as NodeId)
        .map(|v| scratch.run(graph, v))
        .collect()
}

/// Graph diameter in hops: the maximum eccentricity over all nodes.
///
/// Runs one full BFS per node, O(V·(V+E)). For a disconnected graph each
/// pass only sees its own component, so the result is the largest
/// per-component diameter. Empty and edgeless graphs yield 0.
pub fn diameter(graph: &Graph) -> u32 {
    let start = Instant::now();
    let mut scratch = BfsScratch::new(graph.node_count());
    let mut best = 0;

    for v in 0..graph.node_count() as NodeId {
        let ecc = scratch.run(graph, v);
        trace!(node = v, eccentricity = ecc, "bfs pass");
        best = best.max(ecc);
    }

    debug!(
        nodes = graph.node_count(),
        diameter = best,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "sequential diameter"
    );
    best
}

/// Same result as [`diameter`], with the per-node passes spread over the
/// current rayon pool. Each worker owns its scratch state; passes are
/// combined with a max reduction.
pub fn diameter_parallel(graph: &Graph) -> u32 {
    let start = Instant::now();
    let n = graph.node_count();

    let best = (0..n as NodeId)
        .into_par_iter()
        .map_init(|| BfsScratch::new(n), |scratch, v| scratch.run(graph, v))
        .max()
        .unwrap_or(0);

    debug!(
        nodes = n,
        diameter = best,
        threads = rayon::current_num_threads(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "parallel diameter"
    );
    best
}

/// Compute the diameter according to `options` and report how it went.
///
/// Fails only if a dedicated thread pool was requested and could not be built.
pub fn diameter_with(graph: &Graph, options: &DiameterOptions) -> Result<DiameterReport, GraphError> {
    let start = Instant::now();

    let diameter = match (options.parallel, options.threads) {
        (false, _) => diameter(graph),
        (true, 0) => diameter_parallel(graph),
        (true, threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| GraphError::ThreadPool(e.to_string()))?;
            pool.install(|| diameter_parallel(graph))
        }
    };

    Ok(DiameterReport {
        diameter,
        node_count: graph.node_count(),
        passes: graph.node_count(),
        components: connected_components(graph),
        elapsed: start.elapsed(),
    })
}

/// Number of connected components. Isolated nodes count as one each.
pub fn connected_components(graph: &Graph) -> usize {
    let n = graph.node_count();
    let mut seen = vec![false; n];
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    let mut components = 0;

    for root in 0..n {
        if seen[root] {
            continue;
        }
        components += 1;
        seen[root] = true;
        queue.push_back(root as NodeId);

        while let Some(current) = queue.pop_front() {
            for m in graph.neighbors(current) {
                if !seen[m as usize] {
                    seen[m as usize] = true;
                    queue.push_back(m);
                }
            }
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn build(edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        g.load_edges(edges.iter().copied());
        g
    }

    fn make_chain(n: usize) -> Graph {
        let mut g = Graph::new();
        for i in 0..n - 1 {
            g.add_edge(&format!("n{i}"), &format!("n{}", i + 1));
        }
        g
    }

    fn make_star(leaves: usize) -> Graph {
        let mut g = Graph::new();
        for i in 0..leaves {
            g.add_edge("hub", &format!("leaf{i}"));
        }
        g
    }

    fn make_cycle(n: usize) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_edge(&format!("n{i}"), &format!("n{}", (i + 1) % n));
        }
        g
    }

    fn make_grid(w: usize, h: usize) -> Graph {
        let mut g = Graph::new();
        for y in 0..h {
            for x in 0..w {
                let here = format!("{x},{y}");
                if x + 1 < w {
                    g.add_edge(&here, &format!("{},{y}", x + 1));
                }
                if y + 1 < h {
                    g.add_edge(&here, &format!("{x},{}", y + 1));
                }
            }
        }
        g
    }

    // --- Diameter scenarios ---

    #[rstest]
    #[case::empty(&[], 0)]
    #[case::one_edge(&[("a", "b")], 1)]
    #[case::three_in_line(&[("a", "b"), ("b", "c")], 2)]
    #[case::four_in_line(&[("a", "b"), ("b", "c"), ("c", "d")], 3)]
    #[case::triangle(&[("a", "b"), ("b", "c"), ("a", "c")], 1)]
    #[case::square(&[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")], 2)]
    #[case::two_loops(
        &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "c")],
        2
    )]
    fn test_diameter_scenarios(#[case] edges: &[(&str, &str)], #[case] expected: u32) {
        let g = build(edges);
        assert_eq!(g.diameter(), expected);
        assert_eq!(diameter_parallel(&g), expected);
    }

    #[test]
    fn test_diameter_chain() {
        assert_eq!(diameter(&make_chain(50)), 49);
    }

    #[test]
    fn test_diameter_star() {
        assert_eq!(diameter(&make_star(100)), 2);
    }

    #[test]
    fn test_diameter_cycle() {
        assert_eq!(diameter(&make_cycle(6)), 3);
        assert_eq!(diameter(&make_cycle(7)), 3);
    }

    #[test]
    fn test_diameter_grid() {
        assert_eq!(diameter(&make_grid(5, 4)), 7);
    }

    // --- Invariants ---

    #[test]
    fn test_isolated_nodes_have_zero_diameter() {
        let mut g = Graph::new();
        assert_eq!(g.diameter(), 0);
        g.add_node("solo");
        assert_eq!(g.diameter(), 0);
        for i in 0..10 {
            g.add_node(&format!("n{i}"));
        }
        assert_eq!(g.diameter(), 0);
        assert_eq!(diameter_parallel(&g), 0);
    }

    #[test]
    fn test_duplicate_edges_do_not_change_diameter() {
        let mut g = make_chain(5);
        let before = (g.diameter(), g.node_count());
        g.add_edge("n0", "n1");
        g.add_edge("n1", "n0");
        g.add_edge("n3", "n4");
        assert_eq!((g.diameter(), g.node_count()), before);
    }

    #[test]
    fn test_adding_edge_never_increases_connected_diameter() {
        let mut g = make_chain(10);
        let mut previous = g.diameter();
        for (a, b) in [("n0", "n9"), ("n2", "n7"), ("n4", "n5"), ("n1", "n6")] {
            g.add_edge(a, b);
            let now = g.diameter();
            assert!(now <= previous, "adding {a}-{b} grew diameter {previous} -> {now}");
            previous = now;
        }
    }

    #[test]
    fn test_depths_are_symmetric() {
        let g = build(&[("a", "b"), ("b", "c"), ("c", "d"), ("b", "e"), ("e", "d")]);
        let n = g.node_count() as NodeId;
        for u in 0..n {
            let from_u = bfs_depths(&g, u);
            for v in 0..n {
                assert_eq!(from_u[v as usize], bfs_depths(&g, v)[u as usize]);
            }
        }
    }

    #[test]
    fn test_disconnected_uses_widest_component() {
        let mut g = make_chain(4);
        g.load_edges([("x", "y"), ("y", "z"), ("z", "w"), ("w", "v"), ("v", "u")]);
        g.add_node("alone");
        assert_eq!(g.diameter(), 5);
        assert_eq!(connected_components(&g), 3);
    }

    #[test]
    fn test_self_loop_does_not_affect_diameter() {
        let mut g = build(&[("a", "b"), ("b", "c")]);
        g.add_edge("b", "b");
        g.add_edge("a", "a");
        assert_eq!(g.diameter(), 2);

        let mut solo = Graph::new();
        solo.add_edge("s", "s");
        assert_eq!(solo.diameter(), 0);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward = build(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")]);
        let backward = build(&[("e", "d"), ("d", "c"), ("c", "b"), ("b", "a")]);
        assert_eq!(forward.diameter(), backward.diameter());
        assert_ne!(forward.resolve("a"), backward.resolve("a"));
    }

    // --- BFS helpers ---

    #[test]
    fn test_bfs_depths_chain() {
        let g = make_chain(4);
        let depths = bfs_depths(&g, g.resolve("n0").unwrap());
        assert_eq!(depths, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_bfs_depths_unreachable() {
        let mut g = build(&[("a", "b")]);
        g.add_node("c");
        let depths = bfs_depths(&g, g.resolve("a").unwrap());
        assert_eq!(depths[g.resolve("c").unwrap() as usize], None);
    }

    #[test]
    fn test_bfs_depths_start_not_in_graph() {
        let g = make_chain(3);
        assert!(bfs_depths(&g, 999).is_empty());
    }

    #[test]
    fn test_eccentricity() {
        let g = make_chain(5);
        assert_eq!(eccentricity(&g, g.resolve("n0").unwrap()), Some(4));
        assert_eq!(eccentricity(&g, g.resolve("n2").unwrap()), Some(2));
        assert_eq!(eccentricity(&g, 999), None);
    }

    #[test]
    fn test_eccentricities_star() {
        let g = make_star(4);
        let ecc = eccentricities(&g);
        assert_eq!(ecc.len(), 5);
        assert_eq!(ecc[g.resolve("hub").unwrap() as usize], 1);
        assert_eq!(ecc.iter().copied().max(), Some(2));
    }

    #[test]
    fn test_bfs_parallel_edges_visit_once() {
        let mut g = Graph::new();
        for _ in 0..3 {
            g.add_edge("a", "b");
        }
        let depths = bfs_depths(&g, 0);
        assert_eq!(depths, vec![Some(0), Some(1)]);
    }

    // --- Scheduling ---

    #[test]
    fn test_parallel_matches_sequential() {
        for g in [make_chain(30), make_cycle(25), make_grid(6, 9), make_star(40)] {
            assert_eq!(diameter(&g), diameter_parallel(&g));
        }
    }

    #[test]
    fn test_diameter_with_dedicated_pool() {
        let g = make_grid(4, 4);
        let report = diameter_with(
            &g,
            &DiameterOptions {
                parallel: true,
                threads: 2,
            },
        )
        .unwrap();
        assert_eq!(report.diameter, 6);
        assert_eq!(report.node_count, 16);
        assert_eq!(report.passes, 16);
        assert_eq!(report.components, 1);
    }

    #[test]
    fn test_diameter_with_sequential_default() {
        let g = make_cycle(8);
        let report = diameter_with(&g, &DiameterOptions::default()).unwrap();
        assert_eq!(report.diameter, 4);
    }

    #[test]
    fn test_components_empty_graph() {
        assert_eq!(connected_components(&Graph::new()), 0);
    }
}
