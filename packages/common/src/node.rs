//! # Builder Nodes
//!
//! The unit of an editable page. A node carries an opaque `kind` tag, a
//! type-erased attribute map, a map of style buckets, and an ordered list of
//! children it owns exclusively.
//!
//! Children are held behind [`Arc`] so that a new snapshot of the tree can share
//! every subtree an edit did not touch with the snapshot it was derived from.

use crate::IdGenerator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named attribute values (text, src, href, event bindings, ...)
pub type Attributes = Map<String, Value>;

/// Style buckets mapped to style tokens (e.g. `padding` -> `p-4`)
pub type Styles = BTreeMap<String, String>;

/// Kind used for generic containers and for nodes with no kind at all
pub const CONTAINER_KIND: &str = "div";

/// A node of the builder tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Per-session identity used for selection and lookup
    pub id: String,

    /// Role tag (div, p, img, button, a, ...)
    pub kind: String,

    /// Authored `id` from imported page JSON, re-emitted on export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default)]
    pub styles: Styles,

    /// Ordered children (document order)
    #[serde(default)]
    pub children: Vec<Arc<Node>>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            source_id: None,
            attributes: Attributes::new(),
            styles: Styles::new(),
            children: Vec::new(),
        }
    }

    /// Create a node whose identity is minted from `ids`
    pub fn minted(kind: impl Into<String>, ids: &mut IdGenerator) -> Self {
        let kind = kind.into();
        let id = ids.mint(&kind);
        Self::new(id, kind)
    }

    /// The default layout container inserted by "add container"
    pub fn container(ids: &mut IdGenerator) -> Self {
        Self::minted(CONTAINER_KIND, ids)
            .with_style("display", "flex")
            .with_style("direction", "flex-col")
            .with_style("gap", "gap-4")
            .with_style("padding", "p-4")
            .with_style("rounded", "rounded-md")
            .with_style("bg", "bg-white")
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, bucket: impl Into<String>, token: impl Into<String>) -> Self {
        self.styles.insert(bucket.into(), token.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Text content, if the node carries a string `text` attribute
    pub fn text(&self) -> Option<&str> {
        self.attribute("text").and_then(Value::as_str)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Deep copy of this subtree where every node gets a fresh identity.
    ///
    /// Inserting the same subtree twice must go through here, identities are
    /// never checked for uniqueness on insert. Authored ids stay with the original.
    pub fn reidentify(&self, ids: &mut IdGenerator) -> Node {
        Node {
            id: ids.mint(&self.kind),
            kind: self.kind.clone(),
            source_id: None,
            attributes: self.attributes.clone(),
            styles: self.styles.clone(),
            children: self
                .children
                .iter()
                .map(|child| Arc::new(child.reidentify(ids)))
                .collect(),
        }
    }

    /// Shallow-merge a patch into the attribute and style maps
    pub fn apply_patch(&mut self, patch: &NodePatch) {
        for (key, value) in &patch.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
        for (bucket, token) in &patch.styles {
            self.styles.insert(bucket.clone(), token.clone());
        }
    }
}

/// Partial update of a node's attributes and styles. Children are never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default)]
    pub styles: Styles,
}

impl NodePatch {
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, bucket: impl Into<String>, token: impl Into<String>) -> Self {
        self.styles.insert(bucket.into(), token.into());
        self
    }
}
