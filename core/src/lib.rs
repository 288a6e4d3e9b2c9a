//! graph-diameter-core: exact diameter of undirected, unweighted graphs.
//!
//! Nodes are added by name through [`Graph::add_edge`]; a [`SymbolTable`]
//! maps names to dense ids and adjacency is stored in an id-indexed arena.
//! The diameter is the maximum eccentricity over all nodes, found with one
//! breadth-first search per node (O(V·(V+E))).
//!
//! Disconnected graphs report the largest per-component diameter; there is
//! no notion of infinite distance.

mod edge_list;
mod error;
mod graph;
mod symbols;
mod traversal;

pub use edge_list::{parse_edge_line, read_edges};
pub use error::{EdgeListError, GraphError};
pub use graph::{Graph, Node, NodeId};
pub use symbols::SymbolTable;
pub use traversal::{
    bfs_depths, connected_components, diameter, diameter_parallel, diameter_with, eccentricities,
    eccentricity, DiameterOptions, DiameterReport,
};
