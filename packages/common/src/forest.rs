//! # Forest
//!
//! The ordered list of root nodes that makes up one page. Forests are treated as
//! immutable snapshots: every edit produces a new `Forest` and leaves the
//! previous one valid, sharing untouched subtrees with it.

use crate::{Node, Visitor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Arc<Node>>,
}

impl Forest {
    pub fn new(roots: Vec<Node>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(roots: Vec<Arc<Node>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    /// True when both forests hold the very same root allocations, which is
    /// the case for an edit that did not apply.
    pub fn ptr_eq(&self, other: &Forest) -> bool {
        self.roots.len() == other.roots.len()
            && self.roots.iter().zip(&other.roots).all(|(a, b)| Arc::ptr_eq(a, b))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.roots.iter()
    }

    /// Total number of nodes at every depth
    pub fn node_count(&self) -> usize {
        let mut counter = NodeCounter::default();
        counter.visit_forest(self);
        counter.count
    }

    /// Identities of every node in depth-first document order
    pub fn identities(&self) -> Vec<String> {
        let mut collector = IdentityCollector::default();
        collector.visit_forest(self);
        collector.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        let mut finder = IdentityFinder { id, found: false };
        finder.visit_forest(self);
        finder.found
    }
}

impl From<Vec<Node>> for Forest {
    fn from(roots: Vec<Node>) -> Self {
        Forest::new(roots)
    }
}

#[derive(Default)]
struct NodeCounter {
    count: usize,
}

impl Visitor for NodeCounter {
    fn visit_node(&mut self, node: &Node) {
        self.count += 1;
        crate::walk_node(self, node);
    }
}

#[derive(Default)]
struct IdentityCollector {
    ids: Vec<String>,
}

impl Visitor for IdentityCollector {
    fn visit_node(&mut self, node: &Node) {
        self.ids.push(node.id.clone());
        crate::walk_node(self, node);
    }
}

struct IdentityFinder<'a> {
    id: &'a str,
    found: bool,
}

impl Visitor for IdentityFinder<'_> {
    fn visit_node(&mut self, node: &Node) {
        if self.found {
            return;
        }
        if node.id == self.id {
            self.found = true;
            return;
        }
        crate::walk_node(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Forest {
        Forest::new(vec![
            Node::new("a", "div").with_child(Node::new("a1", "p").with_child(Node::new("a1x", "a"))),
            Node::new("b", "img"),
        ])
    }

    #[test]
    fn test_counts_and_identities() {
        let forest = sample();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest.node_count(), 4);
        assert_eq!(forest.identities(), vec!["a", "a1", "a1x", "b"]);
        assert!(forest.contains("a1x"));
        assert!(!forest.contains("zzz"));
    }

    #[test]
    fn test_ptr_eq_tracks_shared_roots() {
        let forest = sample();
        assert!(forest.ptr_eq(&forest.clone()));

        let rebuilt = sample();
        assert_eq!(rebuilt, forest);
        assert!(!rebuilt.ptr_eq(&forest));

        let mut roots = forest.roots().to_vec();
        roots.pop();
        assert!(!Forest::from_shared(roots).ptr_eq(&forest));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let forest = Forest::new(vec![Node::new("a", "div")]);
        let json = serde_json::to_value(&forest).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["kind"], "div");

        let back: Forest = serde_json::from_value(json).unwrap();
        assert_eq!(back, forest);
    }
}
