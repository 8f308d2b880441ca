use crate::{Forest, Node};

/// Visitor pattern for traversing builder trees immutably
///
/// The default implementations walk the entire tree depth-first in document
/// order. Override `visit_node` to act on each node; call [`walk_node`] from the
/// override to keep descending.
pub trait Visitor: Sized {
    fn visit_forest(&mut self, forest: &Forest) {
        walk_forest(self, forest);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

/// Visitor that also receives the depth of each node (roots are depth 0)
pub trait DepthVisitor: Sized {
    fn visit_forest(&mut self, forest: &Forest) {
        for (index, root) in forest.iter().enumerate() {
            self.visit_node(root, 0, index);
        }
    }

    fn visit_node(&mut self, node: &Node, depth: usize, _index: usize) {
        walk_node_with_depth(self, node, depth);
    }
}

pub fn walk_forest<V: Visitor>(visitor: &mut V, forest: &Forest) {
    for root in forest.iter() {
        visitor.visit_node(root);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in &node.children {
        visitor.visit_node(child);
    }
}

pub fn walk_node_with_depth<V: DepthVisitor>(visitor: &mut V, node: &Node, depth: usize) {
    for (index, child) in node.children.iter().enumerate() {
        visitor.visit_node(child, depth + 1, index);
    }
}
