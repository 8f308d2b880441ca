//! # Pagecraft Editor
//!
//! Tree editing engine for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ page JSON (tag/content/style/children)      │
//! └─────────────────────────────────────────────┘
//!                 ↓ normalize       ↑ denormalize
//! ┌─────────────────────────────────────────────┐
//! │ editor: Forest of builder nodes             │
//! │  - resolve identities to paths              │
//! │  - persistent remove/insert                 │
//! │  - move, indent, outdent, merge, reorder    │
//! │  - sessions and page documents              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer / exporter (not part of this crate)│
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Pure edits**: every operation maps a forest to a new forest
//! 2. **Identity addressing**: paths are re-resolved before each step, never reused
//! 3. **Silent no-ops**: an edit that cannot apply returns its input unchanged
//! 4. **Structural sharing**: only nodes on the edited path are copied
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Mutation, PageDocument};
//!
//! let mut doc = PageDocument::load("pages.json")?;
//! let mut session = doc.open("home")?;
//!
//! let id = session.forest().roots()[1].id.clone();
//! session.apply(&Mutation::MoveUp { node_id: id });
//!
//! doc.sync(&session)?;
//! doc.save(true)?;
//! ```

mod actions;
mod document;
mod errors;
mod mutations;
mod mutators;
mod normalize;
mod operations;
mod resolve;
mod session;

pub use actions::{dispatch_event, event_bindings, ActionDispatcher, ActionPayload, ActionRegistry};
pub use document::{DocumentStorage, PageDocument};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError};
pub use mutators::{
    append_child, insert_at_path, remove_at_path, replace_at_path, try_insert_at_path, update_at_path,
    Removal,
};
pub use normalize::{denormalize, denormalize_forest, normalize, normalize_forest, normalize_value};
pub use operations::{
    add_child, add_root, delete, duplicate, indent, merge, move_down, move_up, outdent, reorder, update,
    DropZone,
};
pub use resolve::{find_path, find_path_by_id, get_at_path};
pub use session::EditSession;

// Re-export common types for convenience
pub use pagecraft_common::{Forest, IdGenerator, Node, NodePatch, Page, PageNode, Path};
