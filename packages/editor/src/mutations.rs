//! # Tree Mutations
//!
//! Serializable, identity-addressed edit commands. A `Mutation` is what a UI
//! event turns into: it names the nodes involved and the operation, and is
//! applied to whatever forest is current when it runs.
//!
//! ## Semantics
//!
//! - `apply` never fails. A mutation that cannot apply (missing node, first
//!   child asked to indent, drop target inside the dragged subtree, ...) returns
//!   the input forest unchanged.
//! - `validate` reports *why* the same mutation would be a no-op, for callers
//!   that want to surface a warning. It never changes anything.

use crate::operations::{self, DropZone};
use crate::resolve::{children_len, find_path_by_id};
use pagecraft_common::{Forest, IdGenerator, Node, NodePatch, Path};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Semantic tree edits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Swap with the preceding sibling
    #[serde(rename_all = "camelCase")]
    MoveUp { node_id: String },

    /// Swap with the following sibling
    #[serde(rename_all = "camelCase")]
    MoveDown { node_id: String },

    /// Become the last child of the preceding sibling
    #[serde(rename_all = "camelCase")]
    Indent { node_id: String },

    /// Become the sibling right after the current parent
    #[serde(rename_all = "camelCase")]
    Outdent { node_id: String },

    /// Become the last child of `target_id` (drop onto a row)
    #[serde(rename_all = "camelCase")]
    Merge { node_id: String, target_id: String },

    /// Move before or after `target_id` (drop onto a row edge)
    #[serde(rename_all = "camelCase")]
    Reorder {
        node_id: String,
        target_id: String,
        zone: DropZone,
    },

    /// Append a new node as the last child of `parent_id`
    #[serde(rename_all = "camelCase")]
    AddChild { parent_id: String, node: Node },

    /// Append a new default container as the last child of `parent_id`
    #[serde(rename_all = "camelCase")]
    AddContainer { parent_id: String },

    /// Append a new node at root level
    #[serde(rename_all = "camelCase")]
    AddRoot { node: Node },

    /// Remove a node and its subtree
    #[serde(rename_all = "camelCase")]
    Remove { node_id: String },

    /// Merge attribute and style values into a node
    #[serde(rename_all = "camelCase")]
    Update { node_id: String, patch: NodePatch },

    /// Insert a re-identified copy right after the node
    #[serde(rename_all = "camelCase")]
    Duplicate { node_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Node {0} is the first child and has no preceding sibling")]
    NoPrecedingSibling(String),

    #[error("Node {0} is already first among its siblings")]
    AlreadyFirst(String),

    #[error("Node {0} is already last among its siblings")]
    AlreadyLast(String),

    #[error("Node {0} is already at root level")]
    AlreadyRoot(String),

    #[error("Node cannot be moved relative to itself: {0}")]
    SameNode(String),

    #[error("Would create cycle: {target} is inside {node}")]
    CycleDetected { node: String, target: String },

    #[error("Node {0} already exists")]
    DuplicateIdentity(String),
}

impl Mutation {
    /// Apply to `forest`, returning the new forest (or `forest` itself if the
    /// mutation does not apply). `ids` mints identities for created nodes.
    pub fn apply(&self, forest: &Forest, ids: &mut IdGenerator) -> Forest {
        tracing::debug!(mutation = self.name(), "applying mutation");

        match self {
            Mutation::MoveUp { node_id } => operations::move_up(forest, node_id),
            Mutation::MoveDown { node_id } => operations::move_down(forest, node_id),
            Mutation::Indent { node_id } => operations::indent(forest, node_id),
            Mutation::Outdent { node_id } => operations::outdent(forest, node_id),
            Mutation::Merge { node_id, target_id } => operations::merge(forest, node_id, target_id),
            Mutation::Reorder { node_id, target_id, zone } => {
                operations::reorder(forest, node_id, target_id, *zone)
            }
            Mutation::AddChild { parent_id, node } => {
                operations::add_child(forest, parent_id, node.clone())
            }
            Mutation::AddContainer { parent_id } => {
                if !forest.contains(parent_id) {
                    return forest.clone();
                }
                operations::add_child(forest, parent_id, Node::container(ids))
            }
            Mutation::AddRoot { node } => operations::add_root(forest, node.clone()),
            Mutation::Remove { node_id } => operations::delete(forest, node_id),
            Mutation::Update { node_id, patch } => operations::update(forest, node_id, patch),
            Mutation::Duplicate { node_id } => operations::duplicate(forest, node_id, ids),
        }
    }

    /// Check whether `apply` would change `forest`, and if not, why
    pub fn validate(&self, forest: &Forest) -> Result<(), MutationError> {
        match self {
            Mutation::MoveUp { node_id } => {
                let path = require(forest, node_id)?;
                if path.last() == Some(0) {
                    return Err(MutationError::AlreadyFirst(node_id.clone()));
                }
                Ok(())
            }

            Mutation::MoveDown { node_id } => {
                let path = require(forest, node_id)?;
                let siblings = children_len(forest, &path.parent()).unwrap_or_default();
                if path.last().map(|index| index + 1) == Some(siblings) {
                    return Err(MutationError::AlreadyLast(node_id.clone()));
                }
                Ok(())
            }

            Mutation::Remove { node_id }
            | Mutation::Update { node_id, .. }
            | Mutation::Duplicate { node_id } => {
                require(forest, node_id)?;
                Ok(())
            }

            Mutation::Indent { node_id } => {
                let path = require(forest, node_id)?;
                if path.last() == Some(0) {
                    return Err(MutationError::NoPrecedingSibling(node_id.clone()));
                }
                Ok(())
            }

            Mutation::Outdent { node_id } => {
                let path = require(forest, node_id)?;
                if path.depth() <= 1 {
                    return Err(MutationError::AlreadyRoot(node_id.clone()));
                }
                Ok(())
            }

            Mutation::Merge { node_id, target_id } | Mutation::Reorder { node_id, target_id, .. } => {
                if node_id == target_id {
                    return Err(MutationError::SameNode(node_id.clone()));
                }
                let from = require(forest, node_id)?;
                let target = find_path_by_id(forest, target_id)
                    .ok_or_else(|| MutationError::TargetNotFound(target_id.clone()))?;
                if target.starts_with(&from) {
                    return Err(MutationError::CycleDetected {
                        node: node_id.clone(),
                        target: target_id.clone(),
                    });
                }
                Ok(())
            }

            Mutation::AddChild { parent_id, node } => {
                require(forest, parent_id)?;
                unique(forest, node)
            }

            Mutation::AddContainer { parent_id } => {
                require(forest, parent_id)?;
                Ok(())
            }

            Mutation::AddRoot { node } => unique(forest, node),
        }
    }

    /// Debug name of the mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::MoveUp { .. } => "move_up",
            Mutation::MoveDown { .. } => "move_down",
            Mutation::Indent { .. } => "indent",
            Mutation::Outdent { .. } => "outdent",
            Mutation::Merge { .. } => "merge",
            Mutation::Reorder { .. } => "reorder",
            Mutation::AddChild { .. } => "add_child",
            Mutation::AddContainer { .. } => "add_container",
            Mutation::AddRoot { .. } => "add_root",
            Mutation::Remove { .. } => "remove",
            Mutation::Update { .. } => "update",
            Mutation::Duplicate { .. } => "duplicate",
        }
    }

    /// Identity of the node the mutation acts on, if any
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Mutation::MoveUp { node_id }
            | Mutation::MoveDown { node_id }
            | Mutation::Indent { node_id }
            | Mutation::Outdent { node_id }
            | Mutation::Merge { node_id, .. }
            | Mutation::Reorder { node_id, .. }
            | Mutation::Remove { node_id }
            | Mutation::Update { node_id, .. }
            | Mutation::Duplicate { node_id } => Some(node_id),
            Mutation::AddChild { parent_id, .. } | Mutation::AddContainer { parent_id } => Some(parent_id),
            Mutation::AddRoot { .. } => None,
        }
    }
}

fn require(forest: &Forest, id: &str) -> Result<Path, MutationError> {
    find_path_by_id(forest, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

fn unique(forest: &Forest, node: &Node) -> Result<(), MutationError> {
    match operations::conflicting_identity(forest, &Arc::new(node.clone())) {
        Some(id) => Err(MutationError::DuplicateIdentity(id)),
        None => Ok(()),
    }
}
