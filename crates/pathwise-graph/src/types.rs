//! Core types for concept graphs.
//!
//! A [`Concept`] is a unit of learnable material. Concepts reference each
//! other by identifier through two lists: `prerequisites` (must be learned
//! first) and `related_concepts` (topically associated). These lists become
//! the two [`Relationship`] kinds of the dependency graph.

use serde::{Deserialize, Serialize};

/// Lowest accepted difficulty level.
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest accepted difficulty level.
pub const MAX_DIFFICULTY: u8 = 10;

// ============================================================================
// Relationship enum
// ============================================================================

/// Edge kinds in the dependency graph.
///
/// `Prerequisite` edges point from the prerequisite to the concept that
/// depends on it. `Related` edges point from a concept to the concept it
/// lists as related and are only ever consumed direction-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// A must be learned before B.
    Prerequisite,
    /// A and B are topically associated.
    Related,
}

impl Relationship {
    /// Returns the relationship label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prerequisite => "prerequisite",
            Self::Related => "related",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Concept struct
// ============================================================================

/// A learning unit.
///
/// Field order matches the on-disk document so serialized output reads the
/// same as the input it was loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Unique identifier (e.g., "basic_math", "calculus").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Difficulty from 1 (easiest) to 10. Only used as a sort key.
    pub difficulty_level: u8,
    /// Ids of concepts to learn first, in declaration order.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Worked examples, display only.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Ids of topically related concepts.
    #[serde(default)]
    pub related_concepts: Vec<String>,
    /// Learning objectives, display only.
    #[serde(default)]
    pub learning_objectives: Vec<String>,
}

impl Concept {
    /// Creates a concept with the lowest difficulty and no references.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            difficulty_level: MIN_DIFFICULTY,
            prerequisites: Vec::new(),
            examples: Vec::new(),
            related_concepts: Vec::new(),
            learning_objectives: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the difficulty level.
    pub fn with_difficulty(mut self, level: u8) -> Self {
        self.difficulty_level = level;
        self
    }

    /// Sets the prerequisite ids.
    pub fn with_prerequisites<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the related concept ids.
    pub fn with_related<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_concepts = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the examples.
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the learning objectives.
    pub fn with_learning_objectives<I, S>(mut self, objectives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.learning_objectives = objectives.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the difficulty lies within 1 to 10.
    pub fn has_valid_difficulty(&self) -> bool {
        (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty_level)
    }
}

// ============================================================================
// Tests
// ============================================================================
