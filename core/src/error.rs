use std::io;

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by id-level graph mutation and diameter scheduling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node id {id} out of range (graph has {node_count} nodes)")]
    NodeOutOfRange { id: NodeId, node_count: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Errors raised while reading a whitespace-separated edge list.
#[derive(Debug, Error)]
pub enum EdgeListError {
    #[error("line {line}: expected 2 fields, found {fields}")]
    Malformed { line: usize, fields: usize },

    #[error("failed to read edge list: {0}")]
    Io(#[from] io::Error),
}
