//! Concept store and the graph derived from it.
//!
//! [`ConceptGraph`] owns the concept records and the [`DependencyGraph`]
//! built from their references. The two are only ever mutated together,
//! through [`ConceptGraph::add_concept`] or by replacing the whole store.

use crate::persistence::ConceptDocument;
use crate::{Concept, DependencyGraph, Relationship};
use pathwise_core::Result;
use std::collections::HashMap;

/// In-memory concept store with its dependency graph.
///
/// Concepts iterate in insertion order. Overwriting an existing id keeps
/// the id's original position.
#[derive(Clone, Debug, Default)]
pub struct ConceptGraph {
    concepts: HashMap<String, Concept>,
    order: Vec<String>,
    graph: DependencyGraph,
}

impl ConceptGraph {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store by adding each concept in order.
    pub fn from_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
        let mut graph = Self::new();
        for concept in concepts {
            graph.add_concept(concept);
        }
        graph
    }

    /// Builds a store from a document, validating it first.
    ///
    /// Either every concept is loaded or none is.
    pub fn from_document(document: ConceptDocument) -> Result<Self> {
        document.validate()?;
        let graph = Self::from_concepts(document.concepts);
        log::debug!(
            "Loaded {} concept(s), {} graph node(s), {} edge(s)",
            graph.len(),
            graph.graph.node_count(),
            graph.graph.edge_count()
        );
        Ok(graph)
    }

    /// Replaces the whole store with the contents of `document`.
    ///
    /// On error the current contents are left untouched.
    pub fn reload(&mut self, document: ConceptDocument) -> Result<()> {
        *self = Self::from_document(document)?;
        Ok(())
    }

    /// Inserts or overwrites a concept and records its edges.
    ///
    /// Every prerequisite gets a `prerequisite` edge into this concept, even
    /// when the prerequisite is not in the store. Related ids only get a
    /// `related` edge if they are already in the store at call time.
    /// Edges contributed by an overwritten record are kept.
    pub fn add_concept(&mut self, concept: Concept) {
        let id = concept.id.clone();
        let related = concept.related_concepts.clone();
        self.graph.ensure_node(&id);

        for prereq in &concept.prerequisites {
            self.graph.add_edge(prereq, &id, Relationship::Prerequisite);
        }

        match self.concepts.insert(id.clone(), concept) {
            Some(_) => log::trace!("Overwrote concept '{id}'"),
            None => self.order.push(id.clone()),
        }

        for other in &related {
            if self.concepts.contains_key(other) {
                self.graph.add_edge(&id, other, Relationship::Related);
            } else {
                log::trace!("Dropped related edge '{id}' -> '{other}': not loaded yet");
            }
        }
    }

    /// Gets a concept by id.
    pub fn get_concept(&self, id: &str) -> Option<&Concept> {
        self.concepts.get(id)
    }

    /// Checks if a concept is in the store.
    ///
    /// Dangling references exist in the graph but not in the store.
    pub fn contains(&self, id: &str) -> bool {
        self.concepts.contains_key(id)
    }

    /// Difficulty of a concept, or 0 if it is not in the store.
    pub fn get_difficulty(&self, id: &str) -> u8 {
        self.concepts.get(id).map_or(0, |c| c.difficulty_level)
    }

    /// Case-insensitive exact name lookup; first match in insertion order.
    pub fn get_concept_by_name(&self, name: &str) -> Option<&Concept> {
        let wanted = name.to_lowercase();
        self.concepts().find(|c| c.name.to_lowercase() == wanted)
    }

    /// Number of concepts in the store.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no concepts.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Concepts in insertion order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.order.iter().filter_map(|id| self.concepts.get(id))
    }

    /// Concept ids in insertion order.
    pub fn concept_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The dependency graph derived from the store.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Snapshot of the store in document form.
    pub fn to_document(&self) -> ConceptDocument {
        ConceptDocument {
            concepts: self.concepts().cloned().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn math() -> ConceptGraph {
        ConceptGraph::from_concepts([
            Concept::new("basic_math", "Basic Math"),
            Concept::new("algebra", "Algebra")
                .with_difficulty(3)
                .with_prerequisites(["basic_math"]),
            Concept::new("geometry", "Geometry")
                .with_difficulty(4)
                .with_prerequisites(["basic_math"])
                .with_related(["algebra"]),
            Concept::new("calculus", "Calculus")
                .with_difficulty(7)
                .with_prerequisites(["algebra", "geometry"]),
        ])
    }

    // ------------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_concept_records_prerequisite_edges() {
        let graph = math();
        let deps = graph.dependency_graph();
        assert!(deps.has_edge("basic_math", "algebra", Relationship::Prerequisite));
        assert!(deps.has_edge("algebra", "calculus", Relationship::Prerequisite));
        assert!(deps.has_edge("geometry", "calculus", Relationship::Prerequisite));
        assert_eq!(deps.edge_count_of(Relationship::Prerequisite), 4);
    }

    #[test]
    fn test_add_concept_without_edges_creates_node() {
        let graph = ConceptGraph::from_concepts([Concept::new("solo", "Solo")]);
        assert!(graph.dependency_graph().has_node("solo"));
    }

    #[test]
    fn test_related_edge_to_loaded_concept() {
        let graph = math();
        assert!(
            graph
                .dependency_graph()
                .has_edge("geometry", "algebra", Relationship::Related)
        );
    }

    #[test]
    fn test_related_edge_to_later_concept_is_dropped() {
        let graph = ConceptGraph::from_concepts([
            Concept::new("a", "A").with_related(["b"]),
            Concept::new("b", "B"),
        ]);
        let deps = graph.dependency_graph();
        assert!(!deps.has_edge("a", "b", Relationship::Related));
        assert_eq!(deps.edge_count(), 0);
    }

    #[test]
    fn test_dangling_prerequisite_is_kept_as_node() {
        let graph = ConceptGraph::from_concepts([
            Concept::new("topology", "Topology").with_prerequisites(["set_theory"])
        ]);
        assert!(graph.dependency_graph().has_node("set_theory"));
        assert!(!graph.contains("set_theory"));
        assert!(graph.get_concept("set_theory").is_none());
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let mut graph = math();
        graph.add_concept(
            Concept::new("algebra", "Linear Algebra")
                .with_difficulty(5)
                .with_prerequisites(["basic_math"]),
        );

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.get_concept("algebra").unwrap().name, "Linear Algebra");
        assert_eq!(graph.get_difficulty("algebra"), 5);
        let ids: Vec<&str> = graph.concept_ids().collect();
        assert_eq!(ids, vec!["basic_math", "algebra", "geometry", "calculus"]);
    }

    #[test]
    fn test_overwrite_keeps_previous_edges() {
        let mut graph = ConceptGraph::from_concepts([
            Concept::new("a", "A"),
            Concept::new("b", "B").with_prerequisites(["a"]),
        ]);
        graph.add_concept(Concept::new("b", "B"));

        assert!(graph.get_concept("b").unwrap().prerequisites.is_empty());
        assert!(
            graph
                .dependency_graph()
                .has_edge("a", "b", Relationship::Prerequisite)
        );
    }

    #[test]
    fn test_adding_twice_is_idempotent() {
        let once = math();
        let mut twice = math();
        for concept in once.concepts().cloned().collect::<Vec<_>>() {
            twice.add_concept(concept);
        }

        assert_eq!(once.len(), twice.len());
        assert_eq!(once.to_document(), twice.to_document());
        let a: Vec<_> = once.dependency_graph().edges().collect();
        let b: Vec<_> = twice.dependency_graph().edges().collect();
        assert_eq!(a, b);
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_difficulty() {
        let graph = math();
        assert_eq!(graph.get_difficulty("calculus"), 7);
        assert_eq!(graph.get_difficulty("basic_math"), 1);
        assert_eq!(graph.get_difficulty("missing"), 0);
    }

    #[test]
    fn test_get_concept_by_name_case_insensitive() {
        let graph = math();
        assert_eq!(graph.get_concept_by_name("ALGEBRA").unwrap().id, "algebra");
        assert_eq!(graph.get_concept_by_name("basic math").unwrap().id, "basic_math");
        assert!(graph.get_concept_by_name("Algebr").is_none());
    }

    #[test]
    fn test_get_concept_by_name_first_in_insertion_order() {
        let graph = ConceptGraph::from_concepts([
            Concept::new("z_first", "Limits"),
            Concept::new("a_second", "limits"),
        ]);
        assert_eq!(graph.get_concept_by_name("LIMITS").unwrap().id, "z_first");
    }

    #[test]
    fn test_concepts_iterate_in_insertion_order() {
        let graph = math();
        let ids: Vec<&str> = graph.concepts().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["basic_math", "algebra", "geometry", "calculus"]);
    }

    #[test]
    fn test_empty_store() {
        let graph = ConceptGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.get_concept_by_name("anything").is_none());
    }

    // ------------------------------------------------------------------------
    // Document loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_from_document_rejects_invalid_difficulty() {
        let document = ConceptDocument {
            concepts: vec![
                Concept::new("a", "A"),
                Concept::new("b", "B").with_difficulty(11),
            ],
        };
        assert!(ConceptGraph::from_document(document).is_err());
    }

    #[test]
    fn test_reload_failure_leaves_store_untouched() {
        let mut graph = math();
        let bad = ConceptDocument {
            concepts: vec![Concept::new("x", "X").with_difficulty(0)],
        };

        assert!(graph.reload(bad).is_err());
        assert_eq!(graph.len(), 4);
        assert!(graph.contains("calculus"));
    }

    #[test]
    fn test_reload_replaces_store() {
        let mut graph = math();
        let document = ConceptDocument {
            concepts: vec![Concept::new("x", "X")],
        };

        graph.reload(document).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(!graph.contains("algebra"));
        assert!(!graph.dependency_graph().has_node("algebra"));
    }
}
