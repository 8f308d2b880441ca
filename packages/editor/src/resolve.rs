//! # Path Resolution
//!
//! Locates nodes in a forest snapshot and reports their ancestry as a [`Path`].
//!
//! Traversal is breadth first. When more than one node satisfies a predicate the
//! first one reached breadth first wins: shallower nodes beat deeper ones, and
//! among nodes at the same depth the one earlier in document order wins. The
//! rule is deterministic for a given snapshot.

use pagecraft_common::{Forest, Node, Path};
use std::collections::VecDeque;
use std::sync::Arc;

/// Find the path of the first node (breadth first) matching `predicate`
pub fn find_path<F>(forest: &Forest, predicate: F) -> Option<Path>
where
    F: Fn(&Node) -> bool,
{
    let mut queue: VecDeque<(&Arc<Node>, Vec<usize>)> = forest
        .iter()
        .enumerate()
        .map(|(index, root)| (root, vec![index]))
        .collect();

    while let Some((node, ancestry)) = queue.pop_front() {
        if predicate(node) {
            return Some(Path::new(ancestry));
        }
        for (index, child) in node.children.iter().enumerate() {
            let mut child_ancestry = ancestry.clone();
            child_ancestry.push(index);
            queue.push_back((child, child_ancestry));
        }
    }

    None
}

/// Find the path of the node with identity `id`
pub fn find_path_by_id(forest: &Forest, id: &str) -> Option<Path> {
    let path = find_path(forest, |node| node.id == id);
    tracing::trace!(id, path = ?path.as_ref().map(ToString::to_string), "resolved identity");
    path
}

/// Node at `path`, or `None` if the path is empty or does not resolve
pub fn get_at_path<'a>(forest: &'a Forest, path: &[usize]) -> Option<&'a Arc<Node>> {
    let (&first, rest) = path.split_first()?;
    let mut node = forest.roots().get(first)?;
    for &index in rest {
        node = node.children.get(index)?;
    }
    Some(node)
}

/// Number of children at `path`; the empty path counts the roots
pub(crate) fn children_len(forest: &Forest, path: &[usize]) -> Option<usize> {
    if path.is_empty() {
        return Some(forest.len());
    }
    get_at_path(forest, path).map(|node| node.children.len())
}
