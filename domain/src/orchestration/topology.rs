//! Dependency graph ordering
//!
//! Kahn's algorithm with ties broken by declaration order: at every step
//! the earliest-declared node whose dependencies are all emitted goes
//! next. A plan without dependencies therefore keeps its original order.

use std::collections::{HashMap, HashSet};

use crate::core::error::DomainError;

/// A node in a dependency graph
pub trait DependencyNode {
    fn node_id(&self) -> &str;
    fn node_dependencies(&self) -> &[String];
}

/// Reject duplicate ids and dependencies on ids not in the graph
pub fn validate_graph<N: DependencyNode>(nodes: &[N]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.node_id()) {
            return Err(DomainError::DuplicateStepId(node.node_id().to_string()));
        }
    }
    for node in nodes {
        if let Some(missing) = node
            .node_dependencies()
            .iter()
            .find(|d| !seen.contains(d.as_str()))
        {
            return Err(DomainError::UnknownDependency {
                step: node.node_id().to_string(),
                dependency: missing.clone(),
            });
        }
    }
    Ok(())
}

/// Dependency-respecting order of node ids.
///
/// Fails with [`DomainError::DependencyCycle`] listing the nodes that could
/// not be scheduled, in declaration order.
pub fn topological_order<N: DependencyNode>(nodes: &[N]) -> Result<Vec<String>, DomainError> {
    validate_graph(nodes)?;

    let mut emitted: HashSet<&str> = HashSet::with_capacity(nodes.len());
    let mut order = Vec::with_capacity(nodes.len());
    let mut remaining: Vec<&N> = nodes.iter().collect();

    while !remaining.is_empty() {
        let ready = remaining.iter().position(|node| {
            node.node_dependencies()
                .iter()
                .all(|d| emitted.contains(d.as_str()))
        });
        match ready {
            Some(idx) => {
                let node = remaining.remove(idx);
                emitted.insert(node.node_id());
                order.push(node.node_id().to_string());
            }
            None => {
                return Err(DomainError::DependencyCycle(
                    remaining.iter().map(|n| n.node_id().to_string()).collect(),
                ));
            }
        }
    }

    Ok(order)
}

/// Group node ids by dependency depth.
///
/// Level 0 holds nodes without dependencies; a node's level is one more
/// than the deepest of its dependencies. Within a level, declaration order
/// is kept.
pub fn dependency_levels<N: DependencyNode>(nodes: &[N]) -> Result<Vec<Vec<String>>, DomainError> {
    let order = topological_order(nodes)?;
    let by_id: HashMap<&str, &N> = nodes.iter().map(|n| (n.node_id(), n)).collect();

    let mut depth: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for id in &order {
        let Some(node) = by_id.get(id.as_str()) else {
            continue;
        };
        let level = node
            .node_dependencies()
            .iter()
            .filter_map(|d| depth.get(d.as_str()))
            .map(|l| l + 1)
            .max()
            .unwrap_or(0);
        depth.insert(node.node_id(), level);
    }

    let max_level = depth.values().copied().max();
    let mut levels = vec![Vec::new(); max_level.map_or(0, |m| m + 1)];
    for node in nodes {
        if let Some(&level) = depth.get(node.node_id()) {
            levels[level].push(node.node_id().to_string());
        }
    }
    Ok(levels)
}
