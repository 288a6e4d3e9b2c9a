use std::collections::HashSet;

use crate::error::GraphError;
use crate::symbols::SymbolTable;

/// Dense node identifier assigned by the symbol table in first-seen order.
pub type NodeId = u32;

/// A vertex and the set of vertices it shares an edge with.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    adjacent: HashSet<NodeId>,
}

impl Node {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            adjacent: HashSet::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Adjacent node ids, in no particular order.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacent.iter().copied()
    }

    pub fn is_adjacent(&self, other: NodeId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Number of distinct neighbors. A self-loop counts as one.
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }

    pub fn has_self_loop(&self) -> bool {
        self.adjacent.contains(&self.id)
    }
}

/// Undirected, unweighted graph keyed by node name.
///
/// Nodes live in an arena indexed by `NodeId`; adjacency holds ids, not
/// references. Every name known to the symbol table has a node, so
/// `nodes.len() == symbols.len()` at all times.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    symbols: SymbolTable,
    nodes: Vec<Node>,
    edge_count: usize,
    self_loops: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            symbols: SymbolTable::with_capacity(node_count),
            nodes: Vec::with_capacity(node_count),
            edge_count: 0,
            self_loops: 0,
        }
    }

    /// Register a node by name without connecting it. Returns its id.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        let id = self.symbols.get_or_create(name);
        if id as usize == self.nodes.len() {
            self.nodes.push(Node::new(id));
        }
        id
    }

    /// Add an undirected edge between two named nodes, creating either if new.
    ///
    /// Re-adding an existing edge is a no-op. `a == b` stores a self-loop,
    /// which never changes any distance.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        let aid = self.add_node(a);
        let bid = self.add_node(b);
        self.link(aid, bid);
    }

    /// Add an undirected edge between two already-registered ids.
    ///
    /// Fails without touching the graph if either id was never allocated.
    pub fn add_edge_ids(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        for id in [a, b] {
            if id as usize >= self.nodes.len() {
                return Err(GraphError::NodeOutOfRange {
                    id,
                    node_count: self.nodes.len(),
                });
            }
        }
        self.link(a, b);
        Ok(())
    }

    /// Bulk load from an iterator of `(name, name)` pairs.
    pub fn load_edges<I, S>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        for (a, b) in edges {
            self.add_edge(a.as_ref(), b.as_ref());
        }
    }

    fn link(&mut self, a: NodeId, b: NodeId) {
        let inserted = self.nodes[a as usize].adjacent.insert(b);
        if a == b {
            if inserted {
                self.self_loops += 1;
                self.edge_count += 1;
            }
            return;
        }
        self.nodes[b as usize].adjacent.insert(a);
        if inserted {
            self.edge_count += 1;
        }
    }

    /// Look up a node id by name.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.symbols.get(name)
    }

    /// Resolve a node id back to its name.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.symbols.name(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Neighbors of `id`. Empty for ids not in the graph.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).into_iter().flat_map(|n| n.neighbors())
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distinct undirected edges, each self-loop counted once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn self_loop_count(&self) -> usize {
        self.self_loops
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest shortest path, in hops. See [`crate::diameter`].
    pub fn diameter(&self) -> u32 {
        crate::traversal::diameter(self)
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let names: usize = self.symbols.iter().map(|(_, n)| 2 * n.len() + 64).sum();
        let nodes_mem = self.nodes.len() * size_of::<Node>();
        // HashSet entries: id plus roughly one control byte, with headroom for load factor.
        let adj_mem: usize = self
            .nodes
            .iter()
            .map(|n| n.adjacent.capacity() * (size_of::<NodeId>() + 1))
            .sum();

        names + nodes_mem + adj_mem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_creates_nodes() {
        let mut g = Graph::new();
        g.add_edge("a", "b");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.resolve("a"), Some(0));
        assert_eq!(g.resolve("b"), Some(1));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut g = Graph::new();
        g.load_edges([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
        for node in g.nodes() {
            for m in node.neighbors() {
                assert!(
                    g.node(m).unwrap().is_adjacent(node.id()),
                    "{} -> {} has no reverse edge",
                    node.id(),
                    m
                );
            }
        }
    }

    #[test]
    fn test_duplicate_edge_collapses() {
        let mut g = Graph::new();
        g.add_edge("a", "b");
        g.add_edge("a", "b");
        g.add_edge("b", "a");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node(0).unwrap().degree(), 1);
    }

    #[test]
    fn test_self_loop_is_stored() {
        let mut g = Graph::new();
        g.add_edge("a", "a");
        g.add_edge("a", "a");
        let a = g.resolve("a").unwrap();
        assert!(g.node(a).unwrap().has_self_loop());
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.self_loop_count(), 1);
    }

    #[test]
    fn test_add_node_isolated() {
        let mut g = Graph::new();
        let x = g.add_node("x");
        assert_eq!(g.add_node("x"), x);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.neighbors(x).count(), 0);
    }

    #[test]
    fn test_add_edge_ids() {
        let mut g = Graph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        g.add_edge_ids(a, b).unwrap();
        assert!(g.node(a).unwrap().is_adjacent(b));
        assert!(g.node(b).unwrap().is_adjacent(a));
    }

    #[test]
    fn test_add_edge_ids_out_of_range() {
        let mut g = Graph::new();
        let a = g.add_node("a");
        let err = g.add_edge_ids(a, 7).unwrap_err();
        assert_eq!(err, GraphError::NodeOutOfRange { id: 7, node_count: 1 });
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node(a).unwrap().degree(), 0);
    }

    #[test]
    fn test_name_round_trip() {
        let mut g = Graph::new();
        g.add_edge("left", "right");
        let id = g.resolve("right").unwrap();
        assert_eq!(g.name(id), Some("right"));
        assert_eq!(g.name(42), None);
    }

    #[test]
    fn test_neighbors_unknown_id_is_empty() {
        let g = Graph::new();
        assert_eq!(g.neighbors(3).count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let mut g = Graph::with_capacity(100);
        for i in 1..100 {
            g.add_edge("hub", &format!("leaf{i}"));
        }
        assert!(g.memory_usage() > 0);
        assert_eq!(g.edge_count(), 99);
    }
}
