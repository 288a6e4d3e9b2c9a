use std::collections::HashMap;

use crate::graph::NodeId;

/// Maps external node names to dense, zero-based ids in first-seen order.
///
/// Grows monotonically: ids are never reclaimed or reassigned, so a
/// long-lived process that keeps discovering names keeps growing.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known number of distinct names.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            ids: HashMap::with_capacity(capacity),
        }
    }

    /// Return the id for `name`, allocating the next sequential id if unseen.
    ///
    /// Panics if more than `u32::MAX` distinct names are interned.
    pub fn get_or_create(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = NodeId::try_from(self.names.len()).unwrap_or_else(|_| {
            panic!(
                "graph-diameter: symbol table exceeded maximum of {} names",
                NodeId::MAX
            )
        });
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up a name without allocating.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Resolve an id back to its name. None for ids never allocated.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (i as NodeId, name.as_str()))
    }
}
