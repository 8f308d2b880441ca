//! # Normalize / Denormalize
//!
//! Bridges the external page JSON shape and the builder's [`Node`] shape.
//!
//! Import is tolerant: any JSON value normalizes to *some* node. Missing kinds
//! become containers, non-array children become no children, non-string style
//! tokens are dropped. Every imported node gets a freshly minted identity, so
//! normalizing the same input twice yields different identities.
//!
//! Export always produces the canonical shape: `tag`, `content`, `src`, `style`,
//! `props`, `events` and top-level `children`. For input already in that shape,
//! `denormalize(normalize(x)) == x`.

use pagecraft_common::{Attributes, Forest, IdGenerator, Node, PageNode, Styles, CONTAINER_KIND};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Attribute keys that are lifted out of `props` into top-level wire fields
const TEXT_KEY: &str = "text";
const SRC_KEY: &str = "src";
const EVENTS_KEY: &str = "events";
const CHILDREN_KEY: &str = "children";

/// Normalize a raw page node. Never fails.
pub fn normalize_value(value: &Value, ids: &mut IdGenerator) -> Node {
    let Some(object) = value.as_object() else {
        tracing::warn!(value = %value, "page node is not an object, importing an empty container");
        return Node::minted(CONTAINER_KIND, ids);
    };

    let kind = ["type", "tag"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str).filter(|kind| !kind.is_empty()))
        .unwrap_or(CONTAINER_KIND);

    let mut node = Node::minted(kind, ids);
    node.source_id = object.get("id").and_then(Value::as_str).map(str::to_string);

    let mut attributes: Attributes = object
        .get("props")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let props_children = attributes.remove(CHILDREN_KEY);

    lift(&mut attributes, TEXT_KEY, object.get("content"));
    lift(&mut attributes, SRC_KEY, object.get("src"));
    lift(&mut attributes, EVENTS_KEY, object.get("events"));
    node.attributes = attributes;

    if let Some(style) = object.get("style").or_else(|| object.get("styles")) {
        node.styles = normalize_styles(style);
    }

    let children: &[Value] = match (object.get(CHILDREN_KEY), props_children.as_ref()) {
        (Some(Value::Array(children)), _) => children.as_slice(),
        (_, Some(Value::Array(children))) => children.as_slice(),
        (None, None) => &[],
        (children, props_children) => {
            tracing::warn!(
                kind,
                children = ?children,
                props_children = ?props_children,
                "page node children are not an array, importing without children"
            );
            &[]
        }
    };
    node.children = children
        .iter()
        .map(|child| Arc::new(normalize_value(child, ids)))
        .collect();

    node
}

/// Normalize a canonical page node
pub fn normalize(page_node: &PageNode, ids: &mut IdGenerator) -> Node {
    normalize_value(&page_node.to_value(), ids)
}

/// Normalize a page's component list into a forest
pub fn normalize_forest(components: &[Value], ids: &mut IdGenerator) -> Forest {
    Forest::new(
        components
            .iter()
            .map(|component| normalize_value(component, ids))
            .collect(),
    )
}

/// Convert a builder node back into the canonical page node. The identity is
/// dropped, it never leaves the editing session.
pub fn denormalize(node: &Node) -> PageNode {
    let mut props = node.attributes.clone();
    props.remove(CHILDREN_KEY);
    let content = props.remove(TEXT_KEY);
    let src = props.remove(SRC_KEY);
    let events = props.remove(EVENTS_KEY);

    PageNode {
        id: node.source_id.clone(),
        tag: node.kind.clone(),
        content,
        src,
        style: node.styles.clone(),
        props,
        events,
        children: node.children.iter().map(|child| denormalize(child)).collect(),
    }
}

pub fn denormalize_forest(forest: &Forest) -> Vec<PageNode> {
    forest.iter().map(|root| denormalize(root)).collect()
}

fn lift(attributes: &mut Map<String, Value>, key: &str, value: Option<&Value>) {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return;
    };
    if !attributes.contains_key(key) {
        attributes.insert(key.to_string(), value.clone());
    }
}

fn normalize_styles(value: &Value) -> Styles {
    let Some(object) = value.as_object() else {
        tracing::warn!(style = %value, "style is not an object, ignoring it");
        return Styles::new();
    };

    object
        .iter()
        .filter_map(|(bucket, token)| match token.as_str() {
            Some(token) => Some((bucket.clone(), token.to_string())),
            None => {
                tracing::warn!(bucket = %bucket, token = %token, "dropping non-string style token");
                None
            }
        })
        .collect()
}
