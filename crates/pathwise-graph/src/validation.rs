//! Concept graph validation and integrity checking.
//!
//! Reports data-quality issues such as prerequisite cycles, dangling
//! references, and difficulty values that contradict the dependency
//! structure. Validation is advisory: the store accepts all of these at
//! load time, and nothing here mutates or rejects it.

use crate::{ConceptGraph, Relationship};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Types
// ============================================================================

/// Result of graph validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the graph is valid (no critical issues).
    pub valid: bool,
    /// Critical issues that should be fixed.
    pub errors: Vec<ValidationIssue>,
    /// Non-critical issues (warnings).
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add an error (marks graph as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Add an informational finding.
    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Find an issue of any severity by code.
    pub fn find(&self, code: &str) -> Option<&ValidationIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
            .find(|issue| issue.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue type/code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected concept IDs (if applicable).
    pub nodes: Vec<String>,
    /// Affected edge descriptions (if applicable).
    pub edges: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Attach affected nodes.
    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Attach affected edges.
    pub fn with_edges(mut self, edges: Vec<String>) -> Self {
        self.edges = edges;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a concept graph for common data-quality issues.
///
/// Checks for:
/// - Concepts listing themselves as a prerequisite (error)
/// - Prerequisite cycles (error)
/// - Prerequisite and related references to unknown concepts (warning)
/// - Prerequisites rated harder than their dependents (warning)
/// - Related references dropped because of load order (info)
/// - Concepts with no edges at all (info)
pub fn validate_graph(graph: &ConceptGraph) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_self_prerequisites(graph, &mut result);
    check_prerequisite_cycles(graph, &mut result);
    check_dangling_prerequisites(graph, &mut result);
    check_dangling_related(graph, &mut result);
    check_difficulty_inversions(graph, &mut result);
    check_unlinked_related(graph, &mut result);
    check_orphans(graph, &mut result);

    result
}

/// Quick check if graph has any validation errors.
pub fn is_valid(graph: &ConceptGraph) -> bool {
    validate_graph(graph).valid
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_self_prerequisites(graph: &ConceptGraph, result: &mut ValidationResult) {
    let offenders: Vec<String> = graph
        .concepts()
        .filter(|c| c.prerequisites.contains(&c.id))
        .map(|c| c.id.clone())
        .collect();

    if !offenders.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "SELF_PREREQUISITE",
                format!("{} concept(s) list themselves as a prerequisite", offenders.len()),
            )
            .with_nodes(offenders),
        );
    }
}

/// Cycles among stored concepts over prerequisite edges.
///
/// Self-loops are reported by `check_self_prerequisites` instead.
fn check_prerequisite_cycles(graph: &ConceptGraph, result: &mut ValidationResult) {
    let mut prereq_graph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for id in graph.concept_ids() {
        indices.insert(id, prereq_graph.add_node(id));
    }

    for (from, to, relationship) in graph.dependency_graph().edges() {
        if relationship == Relationship::Prerequisite
            && from != to
            && let (Some(&a), Some(&b)) = (indices.get(from), indices.get(to))
        {
            prereq_graph.add_edge(a, b, ());
        }
    }

    let mut cyclic: Vec<String> = Vec::new();
    let mut cycles: Vec<String> = Vec::new();
    for component in tarjan_scc(&prereq_graph) {
        if component.len() < 2 {
            continue;
        }
        let mut ids: Vec<&str> = component.iter().map(|idx| prereq_graph[*idx]).collect();
        ids.sort_unstable();
        cycles.push(ids.join(" <-> "));
        cyclic.extend(ids.into_iter().map(String::from));
    }

    if !cycles.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "PREREQUISITE_CYCLE",
                format!("{} cycle(s) detected in prerequisite relationships", cycles.len()),
            )
            .with_nodes(cyclic)
            .with_edges(cycles),
        );
    }
}

fn check_dangling_prerequisites(graph: &ConceptGraph, result: &mut ValidationResult) {
    let dangling: Vec<String> = graph
        .concepts()
        .flat_map(|c| {
            c.prerequisites
                .iter()
                .filter(|p| !graph.contains(p))
                .map(move |p| format!("{} -[prerequisite]-> {}", p, c.id))
        })
        .collect();

    if !dangling.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "DANGLING_PREREQUISITES",
                format!("{} prerequisite reference(s) to unknown concepts", dangling.len()),
            )
            .with_edges(dangling),
        );
    }
}

fn check_dangling_related(graph: &ConceptGraph, result: &mut ValidationResult) {
    let dangling: Vec<String> = graph
        .concepts()
        .flat_map(|c| {
            c.related_concepts
                .iter()
                .filter(|r| !graph.contains(r))
                .map(move |r| format!("{} -[related]-> {}", c.id, r))
        })
        .collect();

    if !dangling.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "DANGLING_RELATED",
                format!("{} related reference(s) to unknown concepts", dangling.len()),
            )
            .with_edges(dangling),
        );
    }
}

/// Prerequisites rated harder than the concept depending on them.
///
/// Learning paths sort by difficulty, so these pairs come out in
/// dependency-violating order.
fn check_difficulty_inversions(graph: &ConceptGraph, result: &mut ValidationResult) {
    let mut inversions: Vec<String> = Vec::new();
    for concept in graph.concepts() {
        for prereq in concept
            .prerequisites
            .iter()
            .filter_map(|p| graph.get_concept(p))
        {
            if prereq.difficulty_level > concept.difficulty_level {
                inversions.push(format!(
                    "{} ({}) -> {} ({})",
                    prereq.id, prereq.difficulty_level, concept.id, concept.difficulty_level
                ));
            }
        }
    }

    if !inversions.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "DIFFICULTY_INVERSION",
                format!(
                    "{} prerequisite(s) are harder than their dependent concept",
                    inversions.len()
                ),
            )
            .with_edges(inversions),
        );
    }
}

/// Related references to concepts that exist but were loaded afterwards.
fn check_unlinked_related(graph: &ConceptGraph, result: &mut ValidationResult) {
    let deps = graph.dependency_graph();
    let unlinked: Vec<String> = graph
        .concepts()
        .flat_map(|c| {
            c.related_concepts
                .iter()
                .filter(|r| graph.contains(r) && !deps.has_edge(&c.id, r, Relationship::Related))
                .map(move |r| format!("{} -[related]-> {}", c.id, r))
        })
        .collect();

    if !unlinked.is_empty() {
        result.add_info(
            ValidationIssue::new(
                "UNLINKED_RELATED",
                format!(
                    "{} related reference(s) not linked because the target loaded later",
                    unlinked.len()
                ),
            )
            .with_edges(unlinked),
        );
    }
}

fn check_orphans(graph: &ConceptGraph, result: &mut ValidationResult) {
    let deps = graph.dependency_graph();
    let orphans: Vec<String> = graph
        .concept_ids()
        .filter(|id| deps.degree(id) == 0)
        .map(String::from)
        .collect();

    if !orphans.is_empty() {
        result.add_info(
            ValidationIssue::new(
                "ORPHAN_CONCEPTS",
                format!("{} concept(s) have no connections", orphans.len()),
            )
            .with_nodes(orphans),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
