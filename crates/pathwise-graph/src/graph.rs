//! Directed dependency graph over concept identifiers.
//!
//! Wraps a petgraph `DiGraph` keyed by concept id. Nodes are plain ids
//! rather than concept records so that references to concepts which are not
//! (yet) in the store can still be represented as edges.
//!
//! Neighbour queries return ids in edge insertion order, which keeps
//! traversals reproducible regardless of petgraph's internal adjacency
//! layout.

use crate::Relationship;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Directed graph with `prerequisite` and `related` edges.
///
/// Insertion always succeeds: cycles, self-loops and references to unknown
/// ids are all accepted. A given `(from, to, relationship)` triple is stored
/// at most once.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, Relationship>,
    node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes, including dangling references.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges of both kinds.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the number of edges of one kind.
    pub fn edge_count_of(&self, relationship: Relationship) -> usize {
        self.graph
            .edge_weights()
            .filter(|rel| **rel == relationship)
            .count()
    }

    /// Checks if a node exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Gets the petgraph `NodeIndex` for an id.
    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Returns an iterator over all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Returns all edges as `(from, to, relationship)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Relationship)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                *edge.weight(),
            )
        })
    }

    /// Returns the node for `id`, creating it if needed.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Adds an edge, creating missing endpoints.
    ///
    /// Returns `false` if the same edge was already present.
    pub fn add_edge(&mut self, from: &str, to: &str, relationship: Relationship) -> bool {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if self.contains_edge(from_idx, to_idx, relationship) {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, relationship);
        true
    }

    /// Checks whether a labelled edge exists between two ids.
    pub fn has_edge(&self, from: &str, to: &str, relationship: Relationship) -> bool {
        match (self.get_index(from), self.get_index(to)) {
            (Some(a), Some(b)) => self.contains_edge(a, b, relationship),
            _ => false,
        }
    }

    /// Prerequisites of `id`: sources of incoming `prerequisite` edges.
    pub fn prerequisites_of(&self, id: &str) -> Vec<&str> {
        self.directed_neighbors(id, Direction::Incoming, Some(Relationship::Prerequisite))
    }

    /// Dependents of `id`: targets of outgoing `prerequisite` edges.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.directed_neighbors(id, Direction::Outgoing, Some(Relationship::Prerequisite))
    }

    /// Targets of outgoing `related` edges.
    pub fn related_of(&self, id: &str) -> Vec<&str> {
        self.directed_neighbors(id, Direction::Outgoing, Some(Relationship::Related))
    }

    /// Neighbours in the undirected projection.
    ///
    /// Both edge kinds, both directions, each neighbour listed once. Ordered
    /// by the insertion of the first edge that connects it.
    pub fn neighbors_undirected(&self, id: &str) -> Vec<&str> {
        let Some(idx) = self.get_index(id) else {
            return Vec::new();
        };

        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .chain(
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .map(|e| (e.id(), e.source())),
            )
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);

        let mut out: Vec<&str> = Vec::with_capacity(edges.len());
        for (_, other) in edges {
            let other_id = self.graph[other].as_str();
            if other != idx && !out.contains(&other_id) {
                out.push(other_id);
            }
        }
        out
    }

    /// Number of edges touching `id`, in either direction.
    pub fn degree(&self, id: &str) -> usize {
        self.get_index(id).map_or(0, |idx| {
            self.graph.edges_directed(idx, Direction::Incoming).count()
                + self.graph.edges_directed(idx, Direction::Outgoing).count()
        })
    }

    fn contains_edge(&self, from: NodeIndex, to: NodeIndex, relationship: Relationship) -> bool {
        self.graph
            .edges_connecting(from, to)
            .any(|e| *e.weight() == relationship)
    }

    fn directed_neighbors(
        &self,
        id: &str,
        direction: Direction,
        relationship: Option<Relationship>,
    ) -> Vec<&str> {
        let Some(idx) = self.get_index(id) else {
            return Vec::new();
        };

        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|e| relationship.is_none_or(|rel| *e.weight() == rel))
            .map(|e| {
                let other = match direction {
                    Direction::Incoming => e.source(),
                    Direction::Outgoing => e.target(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);

        edges
            .into_iter()
            .map(|(_, other)| self.graph[other].as_str())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
