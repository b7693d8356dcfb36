//! Query response types.
//!
//! Structured results returned to callers such as a tutoring-session
//! orchestrator or the CLI's `--json` mode. All types derive
//! `Serialize`/`Deserialize` for JSON transport.

use crate::algorithms::{learning_path, prerequisite_chain, related};
use crate::{Concept, ConceptGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Summaries
// ============================================================================

/// Summary information about a concept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSummary {
    /// Concept ID.
    pub id: String,
    /// Concept name.
    pub name: String,
    /// Difficulty level.
    pub difficulty_level: u8,
}

impl From<&Concept> for ConceptSummary {
    fn from(concept: &Concept) -> Self {
        Self {
            id: concept.id.clone(),
            name: concept.name.clone(),
            difficulty_level: concept.difficulty_level,
        }
    }
}

fn summarize(graph: &ConceptGraph, ids: &[String]) -> Vec<ConceptSummary> {
    ids.iter()
        .filter_map(|id| graph.get_concept(id))
        .map(ConceptSummary::from)
        .collect()
}

// ============================================================================
// Concept info
// ============================================================================

/// A concept together with its resolved references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptInfo {
    /// The concept itself.
    pub concept: Concept,
    /// Declared prerequisites that exist in the store, in declaration order.
    pub prerequisites: Vec<Concept>,
    /// Declared related concepts that exist in the store.
    pub related: Vec<Concept>,
    /// Raw difficulty level.
    pub difficulty: u8,
}

impl ConceptGraph {
    /// The concept with its prerequisites and related concepts resolved.
    ///
    /// Referenced ids that are not in the store are left out.
    pub fn get_concept_info(&self, id: &str) -> Option<ConceptInfo> {
        let concept = self.get_concept(id)?;
        let resolve = |ids: &[String]| -> Vec<Concept> {
            ids.iter()
                .filter_map(|other| self.get_concept(other))
                .cloned()
                .collect()
        };

        Some(ConceptInfo {
            prerequisites: resolve(&concept.prerequisites),
            related: resolve(&concept.related_concepts),
            difficulty: concept.difficulty_level,
            concept: concept.clone(),
        })
    }
}

// ============================================================================
// Prerequisites / learning path
// ============================================================================

/// Response for a prerequisite chain query.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainResponse {
    /// Target concept.
    pub target: ConceptSummary,
    /// Prerequisites, deepest first.
    pub prerequisites: Vec<ConceptSummary>,
    /// Total count.
    pub count: usize,
}

impl ChainResponse {
    /// Build the response, or `None` if the target is unknown.
    pub fn build(graph: &ConceptGraph, target: &str) -> Option<Self> {
        let concept = graph.get_concept(target)?;
        let prerequisites = summarize(graph, &prerequisite_chain(graph, target));
        Some(Self {
            target: concept.into(),
            count: prerequisites.len(),
            prerequisites,
        })
    }
}

/// Response for a learning path query.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LearningPathResponse {
    /// Target concept.
    pub target: ConceptSummary,
    /// Concept ids the learner already knows.
    pub known: Vec<String>,
    /// Study steps, ending in the target.
    pub steps: Vec<ConceptSummary>,
    /// Number of steps.
    pub count: usize,
}

impl LearningPathResponse {
    /// Build the response, or `None` if the target is unknown.
    pub fn build(graph: &ConceptGraph, target: &str, known: &[String]) -> Option<Self> {
        let concept = graph.get_concept(target)?;
        let known_set: HashSet<&str> = known.iter().map(String::as_str).collect();
        let steps = summarize(graph, &learning_path(graph, target, &known_set));
        Some(Self {
            target: concept.into(),
            known: known.to_vec(),
            count: steps.len(),
            steps,
        })
    }
}

// ============================================================================
// Related
// ============================================================================

/// Response for a related concepts query.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelatedResponse {
    /// The source concept.
    pub source: ConceptSummary,
    /// Hop cutoff used for the query.
    pub max_distance: usize,
    /// Concepts within the cutoff.
    pub related: Vec<ConceptSummary>,
    /// Total count.
    pub total_count: usize,
}

impl RelatedResponse {
    /// Build the response, or `None` if the source is unknown.
    pub fn build(graph: &ConceptGraph, id: &str, max_distance: usize) -> Option<Self> {
        let concept = graph.get_concept(id)?;
        let found = summarize(graph, &related(graph, id, max_distance));
        Some(Self {
            source: concept.into(),
            max_distance,
            total_count: found.len(),
            related: found,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
