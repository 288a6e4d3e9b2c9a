use std::io::BufRead;

use crate::error::EdgeListError;
use crate::graph::Graph;

/// Parse one line of a whitespace-separated edge list.
///
/// Blank lines and `#` comments yield `Ok(None)`. `line_no` is 1-based and
/// only used for error reporting.
pub fn parse_edge_line(line: &str, line_no: usize) -> Result<Option<(String, String)>, EdgeListError> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut fields = trimmed.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), None) => Ok(Some((a.to_string(), b.to_string()))),
        _ => Err(EdgeListError::Malformed {
            line: line_no,
            fields: trimmed.split_whitespace().count(),
        }),
    }
}

/// Read every edge from `reader`, stopping at the first malformed line.
pub fn read_edges<R: BufRead>(reader: R) -> Result<Vec<(String, String)>, EdgeListError> {
    let mut edges = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(edge) = parse_edge_line(&line?, i + 1)? {
            edges.push(edge);
        }
    }
    Ok(edges)
}

impl Graph {
    /// Build a graph from a whitespace-separated edge list.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, EdgeListError> {
        let mut graph = Graph::new();
        for (i, line) in reader.lines().enumerate() {
            if let Some((a, b)) = parse_edge_line(&line?, i + 1)? {
                graph.add_edge(&a, &b);
            }
        }
        Ok(graph)
    }
}
