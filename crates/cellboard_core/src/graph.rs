//! Static dependency graph between named cells.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKey {
    RequestTarget,
    TodoFetch,
    StringList,
    Counter,
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKey::RequestTarget => "request_target",
            CellKey::TodoFetch => "todo_fetch",
            CellKey::StringList => "string_list",
            CellKey::Counter => "counter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge {from} -> {to} would create a cycle")]
    Cycle { from: CellKey, to: CellKey },
}

/// Directed acyclic graph: an edge `a -> b` means `b` is computed from `a`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependents: BTreeMap<CellKey, BTreeSet<CellKey>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph used by the application: the todo fetch derives from the
    /// request target; list and counter are independent sources.
    pub fn standard() -> Self {
        let mut dependents = BTreeMap::new();
        dependents.insert(CellKey::RequestTarget, BTreeSet::from([CellKey::TodoFetch]));
        Self { dependents }
    }

    pub fn add_dependency(&mut self, source: CellKey, derived: CellKey) -> Result<(), GraphError> {
        if source == derived || self.reaches(derived, source) {
            return Err(GraphError::Cycle {
                from: source,
                to: derived,
            });
        }
        self.dependents.entry(source).or_default().insert(derived);
        Ok(())
    }

    pub fn direct_dependents(&self, key: CellKey) -> impl Iterator<Item = CellKey> + '_ {
        self.dependents.get(&key).into_iter().flatten().copied()
    }

    /// All cells that must recompute after `changed`, in an order where every
    /// cell comes after the cells it depends on.
    pub fn recompute_order(&self, changed: CellKey) -> Vec<CellKey> {
        let mut affected = BTreeSet::new();
        let mut queue = VecDeque::from([changed]);
        while let Some(key) = queue.pop_front() {
            for next in self.direct_dependents(key) {
                if affected.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        // Kahn's algorithm restricted to the affected subgraph.
        let mut indegree: BTreeMap<CellKey, usize> = affected.iter().map(|k| (*k, 0)).collect();
        for key in affected.iter().copied() {
            for next in self.direct_dependents(key) {
                if let Some(count) = indegree.get_mut(&next) {
                    *count += 1;
                }
            }
        }
        let mut ready: VecDeque<CellKey> = indegree
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(key, _)| *key)
            .collect();
        let mut order = Vec::with_capacity(affected.len());
        while let Some(key) = ready.pop_front() {
            order.push(key);
            for next in self.direct_dependents(key) {
                if let Some(count) = indegree.get_mut(&next) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(next);
                    }
                }
            }
        }
        order
    }

    fn reaches(&self, from: CellKey, to: CellKey) -> bool {
        let mut seen = BTreeSet::new();
        let mut stack = vec![from];
        while let Some(key) = stack.pop() {
            if key == to {
                return true;
            }
            if seen.insert(key) {
                stack.extend(self.direct_dependents(key));
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_graph_links_target_to_fetch_only() {
        let graph = DependencyGraph::standard();
        assert_eq!(
            graph.recompute_order(CellKey::RequestTarget),
            vec![CellKey::TodoFetch]
        );
        assert!(graph.recompute_order(CellKey::StringList).is_empty());
        assert!(graph.recompute_order(CellKey::Counter).is_empty());
    }

    #[test]
    fn cycles_are_rejected() {
        let mut graph = DependencyGraph::new();
        graph
            .add_dependency(CellKey::RequestTarget, CellKey::TodoFetch)
            .unwrap();
        graph
            .add_dependency(CellKey::TodoFetch, CellKey::StringList)
            .unwrap();

        assert_eq!(
            graph.add_dependency(CellKey::StringList, CellKey::RequestTarget),
            Err(GraphError::Cycle {
                from: CellKey::StringList,
                to: CellKey::RequestTarget,
            })
        );
        assert!(graph
            .add_dependency(CellKey::Counter, CellKey::Counter)
            .is_err());
    }

    #[test]
    fn diamond_is_ordered_topologically() {
        // target -> fetch -> list, target -> list, list -> counter
        let mut graph = DependencyGraph::new();
        graph
            .add_dependency(CellKey::RequestTarget, CellKey::TodoFetch)
            .unwrap();
        graph
            .add_dependency(CellKey::TodoFetch, CellKey::StringList)
            .unwrap();
        graph
            .add_dependency(CellKey::RequestTarget, CellKey::StringList)
            .unwrap();
        graph
            .add_dependency(CellKey::StringList, CellKey::Counter)
            .unwrap();

        assert_eq!(
            graph.recompute_order(CellKey::RequestTarget),
            vec![CellKey::TodoFetch, CellKey::StringList, CellKey::Counter]
        );
    }
}
