//! # Page Wire Format
//!
//! The external JSON shape of pages and their nodes, as persisted and exported.
//!
//! ```text
//! Node := {
//!   id?, tag | type, content?, src?,
//!   style | styles?: { bucket: token },
//!   props?: { ..., children?: Node[] },
//!   events?: { domEvent: actionName },
//!   children?: Node[]
//! }
//! ```
//!
//! Stored page components are kept as raw [`Value`]s: hand-written page files use
//! either spelling of several fields and the importer must tolerate all of them.
//! [`PageNode`] is the canonical form the exporter produces.

use crate::{Attributes, Styles};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical external node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<Value>,

    #[serde(default, skip_serializing_if = "Styles::is_empty")]
    pub style: Styles,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub props: Attributes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageNode>,
}

impl PageNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn to_value(&self) -> Value {
        // A PageNode only holds strings, maps and JSON values, serialization cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// One page of the persisted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub title: String,

    pub slug: String,

    #[serde(default)]
    pub components: Vec<Value>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            components: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_node_omits_empty_fields() {
        let node = PageNode::new("div");
        assert_eq!(node.to_value(), json!({ "tag": "div" }));
    }

    #[test]
    fn test_page_parses_with_raw_components() {
        let page: Page = serde_json::from_value(json!({
            "id": "p1",
            "title": "Home",
            "slug": "home",
            "components": [{ "type": "h1", "content": "Hi" }, "not a node"]
        }))
        .unwrap();

        assert_eq!(page.slug, "home");
        assert_eq!(page.components.len(), 2);
    }
}
