//! # Structural Operations
//!
//! Identity-addressed edits composed from path resolution and the persistent
//! mutators. Every operation is a pure function `Forest x args -> Forest`.
//!
//! Paths are never reused across the steps of a compound edit: each step
//! re-resolves the identities it needs against the forest produced by the
//! previous step. When any step fails to resolve, the operation returns its
//! input unchanged.
//!
//! Moves never create cycles: `merge` and `reorder` remove the moved subtree
//! first, so a target inside that subtree no longer resolves and the edit
//! becomes a no-op.

use crate::mutators::{append_child, remove_at_path, try_insert_at_path, update_at_path, Removal};
use crate::resolve::{children_len, find_path_by_id, get_at_path};
use pagecraft_common::{CommonError, Forest, IdGenerator, Node, NodePatch};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Where a dragged node lands relative to the row it was dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Before,
    After,
}

impl FromStr for DropZone {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(DropZone::Before),
            "after" => Ok(DropZone::After),
            other => Err(CommonError::InvalidDropZone(other.to_string())),
        }
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropZone::Before => write!(f, "before"),
            DropZone::After => write!(f, "after"),
        }
    }
}

/// Swap the node with its preceding sibling
pub fn move_up(forest: &Forest, id: &str) -> Forest {
    or_unchanged(forest, "move_up", id, try_move_up(forest, id))
}

/// Swap the node with its following sibling
pub fn move_down(forest: &Forest, id: &str) -> Forest {
    or_unchanged(forest, "move_down", id, try_move_down(forest, id))
}

/// Reparent the node as the last child of its preceding sibling
pub fn indent(forest: &Forest, id: &str) -> Forest {
    or_unchanged(forest, "indent", id, try_indent(forest, id))
}

/// Move the node out of its parent, right after that parent
pub fn outdent(forest: &Forest, id: &str) -> Forest {
    or_unchanged(forest, "outdent", id, try_outdent(forest, id))
}

/// Reparent `from_id` as the last child of `target_id`
pub fn merge(forest: &Forest, from_id: &str, target_id: &str) -> Forest {
    or_unchanged(forest, "merge", from_id, try_merge(forest, from_id, target_id))
}

/// Move `from_id` before or after `to_id` (drag and drop onto a row edge)
pub fn reorder(forest: &Forest, from_id: &str, to_id: &str, zone: DropZone) -> Forest {
    or_unchanged(forest, "reorder", from_id, try_reorder(forest, from_id, to_id, zone))
}

/// Append `node` as the last child of `parent_id`.
///
/// A no-op when any identity in `node`'s subtree is already in the forest or
/// repeats within it.
pub fn add_child(forest: &Forest, parent_id: &str, node: impl Into<Arc<Node>>) -> Forest {
    let node = node.into();
    let result = fresh(forest, &node)
        .and_then(|()| find_path_by_id(forest, parent_id))
        .and_then(|path| append_child(forest, &path, node));
    or_unchanged(forest, "add_child", parent_id, result)
}

/// Append `node` at root level.
///
/// A no-op when any identity in `node`'s subtree is already in the forest or
/// repeats within it.
pub fn add_root(forest: &Forest, node: impl Into<Arc<Node>>) -> Forest {
    let node = node.into();
    let result = fresh(forest, &node).and_then(|()| append_child(forest, &[], Arc::clone(&node)));
    or_unchanged(forest, "add_root", &node.id, result)
}

/// First identity of `node`'s subtree that is already taken in `forest`, or
/// that repeats within the subtree itself
pub(crate) fn conflicting_identity(forest: &Forest, node: &Arc<Node>) -> Option<String> {
    let mut taken: HashSet<String> = forest.identities().into_iter().collect();
    Forest::from_shared(vec![Arc::clone(node)])
        .identities()
        .into_iter()
        .find(|id| !taken.insert(id.clone()))
}

fn fresh(forest: &Forest, node: &Arc<Node>) -> Option<()> {
    match conflicting_identity(forest, node) {
        Some(id) => {
            tracing::debug!(id = %id, "identity already in use, not inserting");
            None
        }
        None => Some(()),
    }
}

/// Remove the node and its subtree
pub fn delete(forest: &Forest, id: &str) -> Forest {
    let result = find_path_by_id(forest, id)
        .and_then(|path| remove_at_path(forest, &path))
        .map(|removal| removal.forest);
    or_unchanged(forest, "delete", id, result)
}

/// Merge `patch` into the node's attributes and styles
pub fn update(forest: &Forest, id: &str, patch: &NodePatch) -> Forest {
    let result = find_path_by_id(forest, id)
        .and_then(|path| update_at_path(forest, &path, |node| node.apply_patch(patch)));
    or_unchanged(forest, "update", id, result)
}

/// Insert a re-identified deep copy of the node right after it
pub fn duplicate(forest: &Forest, id: &str, ids: &mut IdGenerator) -> Forest {
    or_unchanged(forest, "duplicate", id, try_duplicate(forest, id, ids))
}

fn try_move_up(forest: &Forest, id: &str) -> Option<Forest> {
    let path = find_path_by_id(forest, id)?;
    let index = path.last()?;
    if index == 0 {
        return None;
    }
    let Removal { removed, forest } = remove_at_path(forest, &path)?;
    try_insert_at_path(&forest, &path.sibling(index - 1), removed)
}

fn try_move_down(forest: &Forest, id: &str) -> Option<Forest> {
    let path = find_path_by_id(forest, id)?;
    let index = path.last()?;
    if index + 1 >= children_len(forest, &path.parent())? {
        return None;
    }
    let Removal { removed, forest } = remove_at_path(forest, &path)?;
    // later siblings already shifted left by one, so index + 1 lands after the old next sibling
    try_insert_at_path(&forest, &path.sibling(index + 1), removed)
}

fn try_indent(forest: &Forest, id: &str) -> Option<Forest> {
    let path = find_path_by_id(forest, id)?;
    let index = path.last()?;
    if index == 0 {
        return None;
    }
    let previous_id = get_at_path(forest, &path.sibling(index - 1))?.id.clone();

    let Removal { removed, forest } = remove_at_path(forest, &path)?;
    let previous = find_path_by_id(&forest, &previous_id)?;
    append_child(&forest, &previous, removed)
}

fn try_outdent(forest: &Forest, id: &str) -> Option<Forest> {
    let path = find_path_by_id(forest, id)?;
    if path.depth() <= 1 {
        return None;
    }
    let parent = path.parent();
    let parent_index = parent.last()?;
    let grand = parent.parent();

    let Removal { removed, forest } = remove_at_path(forest, &path)?;
    try_insert_at_path(&forest, &grand.child(parent_index + 1), removed)
}

fn try_merge(forest: &Forest, from_id: &str, target_id: &str) -> Option<Forest> {
    if from_id == target_id {
        return None;
    }
    let from = find_path_by_id(forest, from_id)?;
    let Removal { removed, forest } = remove_at_path(forest, &from)?;
    // removal may shift an ancestor of the target, resolve it again
    let target = find_path_by_id(&forest, target_id)?;
    append_child(&forest, &target, removed)
}

fn try_reorder(forest: &Forest, from_id: &str, to_id: &str, zone: DropZone) -> Option<Forest> {
    if from_id == to_id {
        return None;
    }
    let from = find_path_by_id(forest, from_id)?;
    let Removal { removed, forest } = remove_at_path(forest, &from)?;

    // The target is resolved after the removal, so when both nodes share a
    // parent and `from` came first the target index has already moved left by
    // one. No further correction is applied on top of that.
    let to = find_path_by_id(&forest, to_id)?;
    let mut insert_index = to.last()?;
    if zone == DropZone::After {
        insert_index += 1;
    }
    try_insert_at_path(&forest, &to.sibling(insert_index), removed)
}

fn try_duplicate(forest: &Forest, id: &str, ids: &mut IdGenerator) -> Option<Forest> {
    let path = find_path_by_id(forest, id)?;
    let index = path.last()?;
    let copy = get_at_path(forest, &path)?.reidentify(ids);
    try_insert_at_path(forest, &path.sibling(index + 1), copy)
}

fn or_unchanged(forest: &Forest, op: &'static str, id: &str, result: Option<Forest>) -> Forest {
    result.unwrap_or_else(|| {
        tracing::debug!(op, id, "operation did not apply, forest unchanged");
        forest.clone()
    })
}
