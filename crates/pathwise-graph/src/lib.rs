//! Concept dependency graphs for Pathwise.
//!
//! This crate provides the concept store, the directed multi-kind graph
//! built from concept references, and the traversals a tutoring system
//! needs: prerequisite chains, difficulty-ordered learning paths, and
//! bounded relatedness search. Storage uses petgraph; datasets load from
//! and save to JSON.
//!
//! # Key Abstractions
//!
//! - [`Concept`]: one unit of learnable material
//! - [`Relationship`]: the two edge kinds, `prerequisite` and `related`
//! - [`ConceptGraph`]: the store plus its [`DependencyGraph`]
//! - [`SharedConceptGraph`]: a cloneable handle for concurrent readers
//!
//! # Example
//!
//! ```
//! use pathwise_graph::{Concept, ConceptGraph, prerequisite_chain};
//!
//! let graph = ConceptGraph::from_concepts([
//!     Concept::new("basic_math", "Basic Math"),
//!     Concept::new("algebra", "Algebra").with_prerequisites(["basic_math"]),
//! ]);
//!
//! assert_eq!(prerequisite_chain(&graph, "algebra"), vec!["basic_math"]);
//! ```

pub mod algorithms;
pub mod graph;
pub mod persistence;
pub mod query;
pub mod shared;
pub mod stats;
pub mod store;
pub mod types;
pub mod validation;

// Types
pub use graph::DependencyGraph;
pub use shared::SharedConceptGraph;
pub use store::ConceptGraph;
pub use types::{Concept, MAX_DIFFICULTY, MIN_DIFFICULTY, Relationship};

// Algorithms
pub use algorithms::{learning_path, prerequisite_chain, related};

// Persistence
pub use persistence::{
    ConceptDocument, load_document, load_document_from_str, load_graph, load_graph_from_str,
    save_graph, to_json,
};

// Query response types
pub use query::{ChainResponse, ConceptInfo, ConceptSummary, LearningPathResponse, RelatedResponse};

// Stats and validation
pub use stats::{GraphStats, compute_stats};
pub use validation::{ValidationIssue, ValidationResult, is_valid, validate_graph};
