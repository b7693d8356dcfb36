//! Concept document loading and saving.
//!
//! The on-disk format is a JSON object with a single `concepts` array.
//! Loading parses and validates the entire document before anything is
//! inserted, so a malformed document never leaves a half-built store.

use crate::{Concept, ConceptGraph};
use pathwise_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// Document type
// ============================================================================

/// Serializable concept dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDocument {
    /// All concepts, in load order.
    pub concepts: Vec<Concept>,
}

impl ConceptDocument {
    /// Creates a document from concepts.
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self { concepts }
    }

    /// Checks the load-boundary rules.
    ///
    /// Every concept needs a non-empty id and a difficulty within 1 to 10.
    /// Repeated ids are allowed; the last one wins when loaded.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        for (i, concept) in self.concepts.iter().enumerate() {
            if concept.id.trim().is_empty() {
                problems.push(format!("concept #{i} has an empty id"));
            }
            if !concept.has_valid_difficulty() {
                problems.push(format!(
                    "concept '{}' has difficulty_level {} (expected 1-10)",
                    concept.id, concept.difficulty_level
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_data(problems.join("; ")))
        }
    }

    /// Ids that appear more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for concept in &self.concepts {
            let id = concept.id.as_str();
            if !seen.insert(id) && !dupes.contains(&id) {
                dupes.push(id);
            }
        }
        dupes
    }
}

// ============================================================================
// Load
// ============================================================================

/// Load a concept document from a JSON file.
pub fn load_document(path: impl AsRef<Path>) -> Result<ConceptDocument> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    log::debug!("Read concept document from {}", path.display());
    load_document_from_str(&json)
}

/// Parse a concept document from a JSON string.
pub fn load_document_from_str(json: &str) -> Result<ConceptDocument> {
    let document: ConceptDocument = serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("Failed to parse concept JSON: {e}")))?;

    for id in document.duplicate_ids() {
        log::warn!("Concept '{id}' is defined more than once; the last definition wins");
    }
    Ok(document)
}

/// Load and build a concept graph from a JSON file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<ConceptGraph> {
    ConceptGraph::from_document(load_document(path)?)
}

/// Load and build a concept graph from a JSON string.
pub fn load_graph_from_str(json: &str) -> Result<ConceptGraph> {
    ConceptGraph::from_document(load_document_from_str(json)?)
}

// ============================================================================
// Save
// ============================================================================

/// Serialize the store as pretty-printed JSON.
pub fn to_json(graph: &ConceptGraph) -> Result<String> {
    serde_json::to_string_pretty(&graph.to_document())
        .map_err(|e| Error::serialization(format!("Failed to serialize concepts: {e}")))
}

/// Save the store to a JSON file.
pub fn save_graph(graph: &ConceptGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(graph)?;
    std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;
    log::debug!("Saved {} concept(s) to {}", graph.len(), path.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOC: &str = r#"{
        "concepts": [
            {
                "id": "basic_math",
                "name": "Basic Math",
                "description": "Arithmetic",
                "difficulty_level": 1,
                "prerequisites": [],
                "examples": ["2 + 2 = 4"],
                "related_concepts": [],
                "learning_objectives": ["Add and subtract"]
            },
            {
                "id": "algebra",
                "name": "Algebra",
                "description": "Symbols for numbers",
                "difficulty_level": 3,
                "prerequisites": ["basic_math"],
                "examples": [],
                "related_concepts": ["basic_math"],
                "learning_objectives": []
            }
        ]
    }"#;

    #[test]
    fn test_load_graph_from_str() {
        let graph = load_graph_from_str(DOC).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get_concept("algebra").unwrap().difficulty_level, 3);
    }

    #[test]
    fn test_round_trip_json() {
        let graph = load_graph_from_str(DOC).unwrap();
        let out = to_json(&graph).unwrap();

        let original: serde_json::Value = serde_json::from_str(DOC).unwrap();
        let written: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(original, written);
    }

    #[test]
    fn test_parse_error_on_missing_required_field() {
        let json = r#"{"concepts": [{"id": "a", "name": "A", "description": "x"}]}"#;
        let err = load_graph_from_str(json).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_error_on_missing_concepts_key() {
        assert!(load_document_from_str(r#"{"items": []}"#).is_err());
    }

    #[test]
    fn test_parse_error_on_wrong_type() {
        let json = r#"{"concepts": [{"id": "a", "name": "A", "description": "",
                       "difficulty_level": "hard"}]}"#;
        assert!(load_document_from_str(json).is_err());
    }

    #[test]
    fn test_invalid_difficulty_rejected() {
        let json = r#"{"concepts": [
            {"id": "a", "name": "A", "description": "", "difficulty_level": 4},
            {"id": "b", "name": "B", "description": "", "difficulty_level": 12}
        ]}"#;
        let err = load_graph_from_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let document = ConceptDocument::new(vec![Concept::new("  ", "Blank")]);
        assert!(document.validate().is_err());
    }

    #[test]
    fn test_empty_document_is_valid() {
        let graph = load_graph_from_str(r#"{"concepts": []}"#).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_duplicate_ids() {
        let document = ConceptDocument::new(vec![
            Concept::new("a", "A"),
            Concept::new("b", "B"),
            Concept::new("a", "A2"),
            Concept::new("a", "A3"),
        ]);
        assert_eq!(document.duplicate_ids(), vec!["a"]);
        assert!(document.validate().is_ok());

        let graph = ConceptGraph::from_document(document).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get_concept("a").unwrap().name, "A3");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("concepts.json");

        let graph = load_graph_from_str(DOC).unwrap();
        save_graph(&graph, &path).unwrap();

        let loaded = load_graph(&path).unwrap();
        assert_eq!(loaded.to_document(), graph.to_document());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document("/nonexistent/concepts.json").unwrap_err();
        assert!(err.is_not_found());
    }
}
