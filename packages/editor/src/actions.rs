//! # Action Dispatch
//!
//! Built nodes bind DOM event names to application action names through their
//! `events` attribute (`{ "click": "addToCart" }`). Whoever renders a node hands
//! the event to an [`ActionDispatcher`] it was given explicitly; there is no
//! process-wide dispatcher.
//!
//! Unknown action names are logged and ignored, never an error.

use pagecraft_common::{Attributes, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// What an action handler receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub component_id: String,
    pub component_type: String,
    pub event: String,
    pub props: Attributes,
}

impl ActionPayload {
    pub fn for_node(node: &Node, event: impl Into<String>) -> Self {
        Self {
            component_id: node.id.clone(),
            component_type: node.kind.clone(),
            event: event.into(),
            props: node.attributes.clone(),
        }
    }
}

/// Receives actions emitted by rendered nodes
pub trait ActionDispatcher {
    fn invoke(&self, action: &str, payload: &ActionPayload);
}

type Handler = Box<dyn Fn(&ActionPayload) + Send + Sync>;

/// Dispatcher that routes action names to registered handlers
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, Handler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `action`, replacing any previous handler
    pub fn register<F>(&mut self, action: impl Into<String>, handler: F)
    where
        F: Fn(&ActionPayload) + Send + Sync + 'static,
    {
        self.handlers.insert(action.into(), Box::new(handler));
    }

    pub fn unregister(&mut self, action: &str) -> bool {
        self.handlers.remove(action).is_some()
    }

    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }
}

impl ActionDispatcher for ActionRegistry {
    fn invoke(&self, action: &str, payload: &ActionPayload) {
        match self.handlers.get(action) {
            Some(handler) => {
                tracing::debug!(action, component = %payload.component_id, event = %payload.event, "invoking action");
                handler(payload);
            }
            None => {
                tracing::warn!(action, component = %payload.component_id, "no handler registered for action");
            }
        }
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.handlers.keys().collect();
        actions.sort();
        f.debug_struct("ActionRegistry").field("actions", &actions).finish()
    }
}

/// Event name to action name bindings declared on a node
pub fn event_bindings(node: &Node) -> Vec<(String, String)> {
    let Some(events) = node.attribute("events").and_then(Value::as_object) else {
        return Vec::new();
    };
    events
        .iter()
        .filter_map(|(event, action)| Some((event.clone(), action.as_str()?.to_string())))
        .collect()
}

/// Route `event` on `node` to the action bound to it.
///
/// Returns whether the node had a binding for the event.
pub fn dispatch_event(dispatcher: &dyn ActionDispatcher, node: &Node, event: &str) -> bool {
    let Some(action) = node
        .attribute("events")
        .and_then(|events| events.get(event))
        .and_then(Value::as_str)
    else {
        return false;
    };
    dispatcher.invoke(action, &ActionPayload::for_node(node, event));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn button() -> Node {
        Node::new("button-1", "button")
            .with_attribute("text", "Buy")
            .with_attribute("events", json!({ "click": "addToCart", "hover": 3 }))
    }

    #[test]
    fn test_dispatch_routes_to_registered_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ActionRegistry::new();
        {
            let seen = Arc::clone(&seen);
            registry.register("addToCart", move |payload: &ActionPayload| {
                seen.lock().unwrap().push(payload.clone());
            });
        }

        assert!(dispatch_event(&registry, &button(), "click"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].component_id, "button-1");
        assert_eq!(seen[0].component_type, "button");
        assert_eq!(seen[0].event, "click");
        assert_eq!(seen[0].props.get("text"), Some(&json!("Buy")));
    }

    #[test]
    fn test_unknown_action_is_tolerated() {
        let registry = ActionRegistry::new();
        // no handler for addToCart: logged, not a panic
        assert!(dispatch_event(&registry, &button(), "click"));
        registry.invoke("navigate", &ActionPayload::for_node(&button(), "click"));
    }

    #[test]
    fn test_unbound_event_is_not_dispatched() {
        let registry = ActionRegistry::new();
        assert!(!dispatch_event(&registry, &button(), "submit"));
        assert!(!dispatch_event(&registry, &button(), "hover"));
        assert!(!dispatch_event(&registry, &Node::new("p-1", "p"), "click"));
    }

    #[test]
    fn test_event_bindings_skip_non_string_actions() {
        assert_eq!(
            event_bindings(&button()),
            vec![("click".to_string(), "addToCart".to_string())]
        );
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = ActionRegistry::new();
        registry.register("navigate", |_: &ActionPayload| {});
        assert!(registry.contains("navigate"));
        assert!(registry.unregister("navigate"));
        assert!(!registry.unregister("navigate"));
    }
}
