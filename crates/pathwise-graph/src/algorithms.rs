//! Dependency resolution over a [`ConceptGraph`].
//!
//! - [`prerequisite_chain`]: every transitive prerequisite of a concept
//! - [`learning_path`]: the chain minus known concepts, easiest first,
//!   ending in the target
//! - [`related`]: concepts within a hop distance, ignoring edge kind and
//!   direction
//!
//! Unknown ids never produce errors; they produce empty results.

use crate::ConceptGraph;
use std::collections::{HashSet, VecDeque};

// ============================================================================
// Prerequisite chain
// ============================================================================

/// All transitive prerequisites of `target`, deepest first along each branch.
///
/// Depth-first from `target` over prerequisite edges. A prerequisite is
/// appended once the descent into it returns, or immediately when it was
/// already visited, unless it is already in the chain. Visited nodes are
/// never expanded again, so a cycle truncates the walk instead of looping.
///
/// Prerequisites that are not in the store are skipped. `target` itself is
/// never part of the result. Returns an empty chain for unknown targets.
pub fn prerequisite_chain(graph: &ConceptGraph, target: &str) -> Vec<String> {
    if !graph.contains(target) {
        return Vec::new();
    }

    let mut chain = Chain::new(target);
    let mut visited: HashSet<&str> = HashSet::from([target]);
    // Each frame is a node plus the prerequisites not yet descended into.
    let mut stack = vec![(target, stored_prerequisites(graph, target))];

    loop {
        let next = match stack.last_mut() {
            Some((_, pending)) => pending.next(),
            None => break,
        };

        match next {
            Some(prereq) if visited.insert(prereq) => {
                stack.push((prereq, stored_prerequisites(graph, prereq)));
            }
            Some(prereq) => chain.push(prereq),
            None => {
                if let Some((done, _)) = stack.pop()
                    && !stack.is_empty()
                {
                    chain.push(done);
                }
            }
        }
    }

    log::trace!("Prerequisite chain for '{target}': {} item(s)", chain.ids.len());
    chain.ids
}

/// Prerequisites of `id` that are present in the store.
fn stored_prerequisites<'a>(graph: &'a ConceptGraph, id: &str) -> std::vec::IntoIter<&'a str> {
    graph
        .dependency_graph()
        .prerequisites_of(id)
        .into_iter()
        .filter(|prereq| graph.contains(prereq))
        .collect::<Vec<_>>()
        .into_iter()
}

/// Ordered, duplicate-free chain that never holds the target.
struct Chain<'a> {
    target: &'a str,
    seen: HashSet<&'a str>,
    ids: Vec<String>,
}

impl<'a> Chain<'a> {
    fn new(target: &'a str) -> Self {
        Self {
            target,
            seen: HashSet::new(),
            ids: Vec::new(),
        }
    }

    fn push(&mut self, id: &'a str) {
        if id != self.target && self.seen.insert(id) {
            self.ids.push(id.to_string());
        }
    }
}

// ============================================================================
// Learning path
// ============================================================================

/// Suggested study order for `target` given the concepts already known.
///
/// The prerequisite chain is filtered against `known`, stable-sorted by
/// ascending difficulty, and `target` is appended last, even when it is
/// itself known. Ties keep chain order.
///
/// The sort looks at difficulty only. When a prerequisite is rated harder
/// than something that depends on it, the dependent comes first.
pub fn learning_path<S>(graph: &ConceptGraph, target: &str, known: &HashSet<S>) -> Vec<String>
where
    S: std::borrow::Borrow<str> + std::hash::Hash + Eq,
{
    if !graph.contains(target) {
        return Vec::new();
    }

    let mut path: Vec<String> = prerequisite_chain(graph, target)
        .into_iter()
        .filter(|id| !known.contains(id.as_str()))
        .collect();
    path.sort_by_key(|id| graph.get_difficulty(id));
    path.push(target.to_string());
    path
}

// ============================================================================
// Related concepts
// ============================================================================

/// Concepts within `max_distance` hops of `id`, ignoring edge direction.
///
/// Breadth-first over both edge kinds. The cutoff is inclusive and `id`
/// is excluded. Dangling references count as hops but are never
/// reported. Results come in breadth-first order; treat them as a set.
pub fn related(graph: &ConceptGraph, id: &str, max_distance: usize) -> Vec<String> {
    if !graph.contains(id) {
        return Vec::new();
    }

    let deps = graph.dependency_graph();
    let mut found = Vec::new();
    let mut visited: HashSet<&str> = HashSet::from([id]);
    let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(id, 0)]);

    while let Some((current, distance)) = queue.pop_front() {
        if distance >= max_distance {
            continue;
        }
        for neighbor in deps.neighbors_undirected(current) {
            if !visited.insert(neighbor) {
                continue;
            }
            if graph.contains(neighbor) {
                found.push(neighbor.to_string());
            }
            queue.push_back((neighbor, distance + 1));
        }
    }

    found
}

// ============================================================================
// Tests
// ============================================================================
