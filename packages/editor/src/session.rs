//! # Edit Session Management
//!
//! Holds the editing state of one open page: the current forest, the current
//! selection and the identity generator. Every user action becomes one
//! synchronous `apply` producing one new forest, so edits are serialized by
//! construction.
//!
//! Forest snapshots handed out by [`EditSession::forest`] stay valid after
//! later edits, which is all an external history stack needs.

use crate::normalize::denormalize_forest;
use crate::resolve::find_path_by_id;
use crate::Mutation;
use pagecraft_common::{Forest, IdGenerator, Node, PageNode, Path};
use std::sync::Arc;

/// Editing state for one page
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Slug of the page being edited
    pub slug: String,

    /// Incremented on every mutation that changed the forest
    pub version: u64,

    forest: Forest,
    selected: Option<String>,
    ids: IdGenerator,
}

impl EditSession {
    pub fn new(slug: impl Into<String>, forest: Forest, ids: IdGenerator) -> Self {
        Self {
            slug: slug.into(),
            version: 0,
            forest,
            selected: None,
            ids,
        }
    }

    /// Current forest snapshot
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Apply a mutation. Returns whether the forest changed.
    pub fn apply(&mut self, mutation: &Mutation) -> bool {
        if let Err(reason) = mutation.validate(&self.forest) {
            tracing::debug!(slug = %self.slug, mutation = mutation.name(), %reason, "mutation will not apply");
        }

        let next = mutation.apply(&self.forest, &mut self.ids);
        if next.ptr_eq(&self.forest) || next == self.forest {
            return false;
        }

        self.forest = next;
        self.version += 1;

        if let Some(selected) = &self.selected {
            if !self.forest.contains(selected) {
                tracing::debug!(slug = %self.slug, selected = %selected, "selected node removed, clearing selection");
                self.selected = None;
            }
        }
        true
    }

    /// Apply a batch in order, each mutation seeing the result of the previous one.
    /// Returns how many of them changed the forest.
    pub fn apply_all<'a>(&mut self, mutations: impl IntoIterator<Item = &'a Mutation>) -> usize {
        mutations
            .into_iter()
            .filter(|mutation| self.apply(mutation))
            .count()
    }

    /// Replace the forest wholesale (e.g. reloading a page)
    pub fn replace_forest(&mut self, forest: Forest) {
        self.forest = forest;
        self.version += 1;
        if let Some(selected) = &self.selected {
            if !self.forest.contains(selected) {
                self.selected = None;
            }
        }
    }

    /// Select a node. Unknown identities clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.forest.contains(id))
            .map(str::to_string);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Currently selected node, resolved against the current forest
    pub fn selected_node(&self) -> Option<&Arc<Node>> {
        let id = self.selected.as_deref()?;
        self.node(id)
    }

    pub fn node(&self, id: &str) -> Option<&Arc<Node>> {
        let path = find_path_by_id(&self.forest, id)?;
        crate::resolve::get_at_path(&self.forest, &path)
    }

    pub fn path_of(&self, id: &str) -> Option<Path> {
        find_path_by_id(&self.forest, id)
    }

    /// Current forest in the canonical page shape
    pub fn export(&self) -> Vec<PageNode> {
        denormalize_forest(&self.forest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        let forest = Forest::new(vec![
            Node::new("a", "div").with_child(Node::new("a0", "p")),
            Node::new("b", "div"),
        ]);
        EditSession::new("home", forest, IdGenerator::new("home"))
    }

    #[test]
    fn test_session_creation() {
        let session = session();

        assert_eq!(session.slug, "home");
        assert_eq!(session.version, 0);
        assert!(session.selected_id().is_none());
    }

    #[test]
    fn test_version_only_bumps_on_change() {
        let mut session = session();

        assert!(!session.apply(&Mutation::MoveUp { node_id: "a".to_string() }));
        assert_eq!(session.version, 0);

        assert!(session.apply(&Mutation::MoveUp { node_id: "b".to_string() }));
        assert_eq!(session.version, 1);
        assert_eq!(session.forest().roots()[0].id, "b");
    }

    #[test]
    fn test_selection_cleared_when_node_removed() {
        let mut session = session();

        session.select(Some("a0"));
        assert_eq!(session.selected_node().map(|n| n.kind.as_str()), Some("p"));

        session.apply(&Mutation::Remove { node_id: "a".to_string() });
        assert!(session.selected_id().is_none());
    }

    #[test]
    fn test_selecting_unknown_node_clears_selection() {
        let mut session = session();
        session.select(Some("b"));
        session.select(Some("nope"));
        assert!(session.selected_id().is_none());
    }

    #[test]
    fn test_old_snapshots_stay_valid() {
        let mut session = session();
        let before = session.forest().clone();

        session.apply(&Mutation::Indent { node_id: "b".to_string() });

        assert_eq!(before.len(), 2);
        assert_eq!(session.forest().len(), 1);
        assert_eq!(session.path_of("b"), Some(Path::new(vec![0, 1])));
    }
}
