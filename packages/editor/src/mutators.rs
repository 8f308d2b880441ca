//! # Persistent Mutators
//!
//! Copy-on-write primitives over a [`Forest`]. Each call returns a new forest and
//! leaves its input untouched.
//!
//! Only the nodes on the edited path are copied (`Arc::make_mut` on a node that
//! is still shared with the input snapshot clones that one node, whose children
//! stay shared). Untouched subtrees are shared between the old and new forest, so
//! an edit costs O(depth x siblings) rather than O(forest size).

use pagecraft_common::{Forest, Node};
use std::sync::Arc;

/// Result of [`remove_at_path`]
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// The removed subtree, descendants included
    pub removed: Arc<Node>,

    /// Forest without the removed subtree
    pub forest: Forest,
}

/// Remove the node at `path`.
///
/// Returns `None` when the path is empty or does not resolve.
pub fn remove_at_path(forest: &Forest, path: &[usize]) -> Option<Removal> {
    let (&index, parent) = path.split_last()?;
    let (forest, removed) = edit_children(forest, parent, |children| {
        (index < children.len()).then(|| children.remove(index))
    })?;
    Some(Removal { removed, forest })
}

/// Insert `node` at `path`.
///
/// All but the last element of `path` select the parent (none selects the roots),
/// the last element is the position in that parent's children. Positions past
/// the end append. An empty path appends at root level. If the parent does not
/// resolve the input forest is returned unchanged.
pub fn insert_at_path(forest: &Forest, path: &[usize], node: impl Into<Arc<Node>>) -> Forest {
    try_insert_at_path(forest, path, node).unwrap_or_else(|| {
        tracing::debug!(path = ?path, "insert target does not resolve, forest unchanged");
        forest.clone()
    })
}

/// [`insert_at_path`] that reports an unresolvable parent as `None`
pub fn try_insert_at_path(
    forest: &Forest,
    path: &[usize],
    node: impl Into<Arc<Node>>,
) -> Option<Forest> {
    let node = node.into();
    let (index, parent) = match path.split_last() {
        Some((&index, parent)) => (index, parent),
        None => (usize::MAX, path),
    };
    let (forest, ()) = edit_children(forest, parent, |children| {
        children.insert(index.min(children.len()), node);
        Some(())
    })?;
    Some(forest)
}

/// Append `node` as the last child of the node at `parent`.
///
/// An empty `parent` appends at root level.
pub fn append_child(forest: &Forest, parent: &[usize], node: impl Into<Arc<Node>>) -> Option<Forest> {
    let node = node.into();
    let (forest, ()) = edit_children(forest, parent, |children| {
        children.push(node);
        Some(())
    })?;
    Some(forest)
}

/// Replace the node at `path` (and its whole subtree) with `node`
pub fn replace_at_path(forest: &Forest, path: &[usize], node: impl Into<Arc<Node>>) -> Option<Forest> {
    let node = node.into();
    let (&index, parent) = path.split_last()?;
    let (forest, ()) = edit_children(forest, parent, |children| {
        let slot = children.get_mut(index)?;
        *slot = node;
        Some(())
    })?;
    Some(forest)
}

/// Edit the node at `path` in place on a private copy
pub fn update_at_path<F>(forest: &Forest, path: &[usize], edit: F) -> Option<Forest>
where
    F: FnOnce(&mut Node),
{
    let (&index, parent) = path.split_last()?;
    let (forest, ()) = edit_children(forest, parent, |children| {
        let slot = children.get_mut(index)?;
        edit(Arc::make_mut(slot));
        Some(())
    })?;
    Some(forest)
}

/// Run `edit` against the children list of the node at `parent` (the root list
/// when `parent` is empty) in a fresh copy of `forest`.
fn edit_children<R, F>(forest: &Forest, parent: &[usize], edit: F) -> Option<(Forest, R)>
where
    F: FnOnce(&mut Vec<Arc<Node>>) -> Option<R>,
{
    let mut roots = forest.roots().to_vec();
    let result = with_children_at(&mut roots, parent, edit)?;
    Some((Forest::from_shared(roots), result))
}

fn with_children_at<R, F>(siblings: &mut Vec<Arc<Node>>, path: &[usize], edit: F) -> Option<R>
where
    F: FnOnce(&mut Vec<Arc<Node>>) -> Option<R>,
{
    match path.split_first() {
        None => edit(siblings),
        Some((&head, rest)) => {
            let slot = siblings.get_mut(head)?;
            with_children_at(&mut Arc::make_mut(slot).children, rest, edit)
        }
    }
}
