//! Handler functions for concept graph commands.
//!
//! These functions implement `chain`, `path`, `related`, `info`, `find`,
//! `validate`, `stats`, and `export` against an already loaded
//! [`ConceptGraph`]. Every query handler prints either a human-readable
//! listing or, with `--json`, the matching response type.

use pathwise_core::{Error, Result};
use pathwise_graph::{
    ChainResponse, ConceptGraph, ConceptSummary, LearningPathResponse, RelatedResponse,
    ValidationIssue, compute_stats, load_graph, save_graph, to_json, validate_graph,
};
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Loading
// ============================================================================

/// Load the concept dataset, returning a helpful error if it is missing.
pub fn load_dataset(path: &Path) -> Result<ConceptGraph> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let graph = load_graph(path)?;
    tracing::debug!("Loaded {} concept(s) from {}", graph.len(), path.display());
    Ok(graph)
}

// ============================================================================
// Query handlers
// ============================================================================

/// Print the prerequisite chain of a concept.
pub fn handle_chain(graph: &ConceptGraph, id: &str, json: bool) -> Result<()> {
    let response = ChainResponse::build(graph, id).ok_or_else(|| unknown_concept(id))?;
    if json {
        return print_json(&response);
    }

    println!("Prerequisites of '{}' (deepest first):", response.target.id);
    print_summaries(&response.prerequisites, "(no prerequisites)");
    println!("\n{} prerequisite(s)", response.count);
    Ok(())
}

/// Print a learning path for a concept.
pub fn handle_path(graph: &ConceptGraph, id: &str, known: &[String], json: bool) -> Result<()> {
    let response =
        LearningPathResponse::build(graph, id, known).ok_or_else(|| unknown_concept(id))?;
    if json {
        return print_json(&response);
    }

    println!("Learning path to '{}':", response.target.id);
    if !response.known.is_empty() {
        println!("  (already known: {})", response.known.join(", "));
    }
    print_summaries(&response.steps, "(nothing to study)");
    println!("\n{} step(s)", response.count);
    Ok(())
}

/// Print concepts within `max_distance` hops of a concept.
pub fn handle_related(
    graph: &ConceptGraph,
    id: &str,
    max_distance: usize,
    json: bool,
) -> Result<()> {
    let response =
        RelatedResponse::build(graph, id, max_distance).ok_or_else(|| unknown_concept(id))?;
    if json {
        return print_json(&response);
    }

    println!(
        "Related to '{}' (within {} hop(s)):",
        response.source.id, response.max_distance
    );
    print_summaries(&response.related, "(no related concepts)");
    println!("\n{} related concept(s)", response.total_count);
    Ok(())
}

/// Print a concept with its resolved references.
pub fn handle_info(graph: &ConceptGraph, id: &str, json: bool) -> Result<()> {
    let info = graph
        .get_concept_info(id)
        .ok_or_else(|| unknown_concept(id))?;
    if json {
        return print_json(&info);
    }

    let concept = &info.concept;
    println!("{} ({})", concept.name, concept.id);
    println!("Difficulty: {}", info.difficulty);
    if !concept.description.is_empty() {
        println!("\n{}", concept.description);
    }

    let prerequisites: Vec<ConceptSummary> =
        info.prerequisites.iter().map(ConceptSummary::from).collect();
    println!("\nPrerequisites:");
    print_summaries(&prerequisites, "(none)");

    let related: Vec<ConceptSummary> = info.related.iter().map(ConceptSummary::from).collect();
    println!("\nRelated:");
    print_summaries(&related, "(none)");

    print_list("Learning objectives", &concept.learning_objectives);
    print_list("Examples", &concept.examples);
    Ok(())
}

/// Look up a concept by name.
pub fn handle_find(graph: &ConceptGraph, name: &str, json: bool) -> Result<()> {
    let concept = graph
        .get_concept_by_name(name)
        .ok_or_else(|| Error::not_found(format!("No concept named '{name}'")))?;
    if json {
        return print_json(concept);
    }

    println!(
        "{} ({}, difficulty {})",
        concept.id, concept.name, concept.difficulty_level
    );
    Ok(())
}

// ============================================================================
// Dataset handlers
// ============================================================================

/// Print the validation report. Fails if any error-level issue was found.
pub fn handle_validate(graph: &ConceptGraph, json: bool) -> Result<()> {
    let result = validate_graph(graph);

    if json {
        print_json(&result)?;
    } else {
        if result.valid {
            println!("Dataset is valid.");
        } else {
            println!("Dataset has validation issues:");
        }
        print_issues("ERROR", &result.errors);
        print_issues("WARN ", &result.warnings);
        print_issues("INFO ", &result.info);
        println!(
            "\nSummary: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }

    if result.valid {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Dataset validation failed with {} error(s)",
            result.errors.len()
        )))
    }
}

/// Print dataset statistics.
pub fn handle_stats(graph: &ConceptGraph, json: bool) -> Result<()> {
    let stats = compute_stats(graph);
    if json {
        return print_json(&stats);
    }

    println!("Concept Statistics");
    println!("==================");
    println!("Concepts:           {}", stats.concept_count);
    println!("Graph nodes:        {}", stats.node_count);
    println!("  Dangling:         {}", stats.dangling_count);
    println!("Prerequisite edges: {}", stats.prerequisite_edge_count);
    println!("Related edges:      {}", stats.related_edge_count);
    println!("Root concepts:      {}", stats.root_concepts.len());
    println!("Avg difficulty:     {:.2}", stats.avg_difficulty);

    if let Some(ref id) = stats.most_depended_on {
        println!("Most depended on:   {id} ({} dependents)", stats.max_dependents);
    }
    if let Some(ref id) = stats.most_prerequisites {
        println!(
            "Most prerequisites: {id} ({} prerequisites)",
            stats.max_prerequisites
        );
    }

    if !stats.difficulty_distribution.is_empty() {
        println!("\nDifficulty:");
        for (level, count) in &stats.difficulty_distribution {
            println!("  {level:>2}: {count}");
        }
    }

    Ok(())
}

/// Write the dataset as JSON to `output`, or to stdout.
pub fn handle_export(graph: &ConceptGraph, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
            }
            save_graph(graph, path)?;
            eprintln!("Exported {} concept(s) to {}", graph.len(), path.display());
        }
        None => println!("{}", to_json(graph)?),
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn unknown_concept(id: &str) -> Error {
    Error::not_found(format!("Concept '{id}'"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_summaries(summaries: &[ConceptSummary], empty: &str) {
    if summaries.is_empty() {
        println!("  {empty}");
    }
    for (i, summary) in summaries.iter().enumerate() {
        println!(
            "  {}. {} ({}, difficulty {})",
            i + 1,
            summary.id,
            summary.name,
            summary.difficulty_level
        );
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}

fn print_issues(label: &str, issues: &[ValidationIssue]) {
    for issue in issues {
        println!("  {label} [{}]: {}", issue.code, issue.message);
        for node in &issue.nodes {
            println!("    - {node}");
        }
        for edge in &issue.edges {
            println!("    - {edge}");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
