//! Concept graph statistics.
//!
//! Summarises store composition: counts per edge kind, dangling
//! references, root concepts, fan-in/fan-out extremes, and the
//! difficulty distribution.

use crate::{ConceptGraph, Relationship};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics about a concept graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphStats {
    /// Concepts in the store.
    pub concept_count: usize,
    /// Graph nodes, including dangling references.
    pub node_count: usize,
    /// Graph nodes with no concept record.
    pub dangling_count: usize,
    /// Number of `prerequisite` edges.
    pub prerequisite_edge_count: usize,
    /// Number of `related` edges.
    pub related_edge_count: usize,
    /// Concepts with no incoming prerequisite edges, in insertion order.
    pub root_concepts: Vec<String>,
    /// Largest number of direct dependents of one concept.
    pub max_dependents: usize,
    /// Largest number of direct prerequisites of one concept.
    pub max_prerequisites: usize,
    /// Concept with the most direct dependents.
    pub most_depended_on: Option<String>,
    /// Concept with the most direct prerequisites.
    pub most_prerequisites: Option<String>,
    /// Concepts per difficulty level.
    pub difficulty_distribution: BTreeMap<u8, usize>,
    /// Mean difficulty across concepts.
    pub avg_difficulty: f32,
}

/// Compute statistics for a concept graph.
///
/// Ties for the extremes go to the concept loaded first.
pub fn compute_stats(graph: &ConceptGraph) -> GraphStats {
    let deps = graph.dependency_graph();

    let mut difficulty_distribution: BTreeMap<u8, usize> = BTreeMap::new();
    let mut difficulty_total: u64 = 0;
    let mut root_concepts = Vec::new();
    let mut most_depended_on: Option<(&str, usize)> = None;
    let mut most_prerequisites: Option<(&str, usize)> = None;

    for concept in graph.concepts() {
        *difficulty_distribution
            .entry(concept.difficulty_level)
            .or_insert(0) += 1;
        difficulty_total += u64::from(concept.difficulty_level);

        let dependents = deps.dependents_of(&concept.id).len();
        if most_depended_on.is_none_or(|(_, best)| dependents > best) {
            most_depended_on = Some((concept.id.as_str(), dependents));
        }

        let prerequisites = deps.prerequisites_of(&concept.id).len();
        if prerequisites == 0 {
            root_concepts.push(concept.id.clone());
        }
        if most_prerequisites.is_none_or(|(_, best)| prerequisites > best) {
            most_prerequisites = Some((concept.id.as_str(), prerequisites));
        }
    }

    let concept_count = graph.len();
    let avg_difficulty = if concept_count > 0 {
        difficulty_total as f32 / concept_count as f32
    } else {
        0.0
    };

    GraphStats {
        concept_count,
        node_count: deps.node_count(),
        dangling_count: deps.node_ids().filter(|id| !graph.contains(id)).count(),
        prerequisite_edge_count: deps.edge_count_of(Relationship::Prerequisite),
        related_edge_count: deps.edge_count_of(Relationship::Related),
        root_concepts,
        max_dependents: most_depended_on.map_or(0, |(_, n)| n),
        max_prerequisites: most_prerequisites.map_or(0, |(_, n)| n),
        most_depended_on: most_depended_on
            .filter(|(_, n)| *n > 0)
            .map(|(id, _)| id.to_string()),
        most_prerequisites: most_prerequisites
            .filter(|(_, n)| *n > 0)
            .map(|(id, _)| id.to_string()),
        difficulty_distribution,
        avg_difficulty,
    }
}

// ============================================================================
// Tests
// ============================================================================
