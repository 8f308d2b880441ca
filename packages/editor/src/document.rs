//! # Page Document
//!
//! The persisted document: an ordered list of pages, each owning a list of
//! components in the external wire shape.
//!
//! A document can be:
//! - **Memory-backed**: built from a JSON string or a page list, for tests and previews
//! - **File-backed**: loaded from and saved to a pages JSON file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Open page → Edit → Sync → Save
//!   ↓        ↓         ↓      ↓      ↓
//! File   normalize  Mutations  denormalize  File
//! ```

use crate::normalize::{denormalize_forest, normalize_forest};
use crate::{EditSession, EditorError};
use pagecraft_common::{IdGenerator, Page, PageNode};
use std::path::{Path, PathBuf};

/// Editable multi-page document
#[derive(Debug)]
pub struct PageDocument {
    pub pages: Vec<Page>,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for a document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only
    Memory,

    /// File-backed
    File { path: PathBuf, dirty: bool },
}

impl PageDocument {
    /// Create a memory-backed document from pages
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            storage: DocumentStorage::Memory,
        }
    }

    /// Create a memory-backed document from pages JSON
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        let pages: Vec<Page> = serde_json::from_str(source)?;
        Ok(Self::from_pages(pages))
    }

    /// Load a file-backed document
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path)?;
        let pages: Vec<Page> = serde_json::from_str(&source)?;
        tracing::debug!(path = %path.display(), pages = pages.len(), "loaded page document");

        Ok(Self {
            pages,
            storage: DocumentStorage::File { path, dirty: false },
        })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path, .. } => Some(path),
            DocumentStorage::Memory => None,
        }
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory => false,
        }
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.slug.as_str())
    }

    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.slug == slug)
    }

    /// The page with `slug`, or the first page when no page has that slug
    pub fn page_or_first(&self, slug: &str) -> Result<&Page, EditorError> {
        if let Some(page) = self.page(slug) {
            return Ok(page);
        }
        let first = self.pages.first().ok_or(EditorError::NoPages)?;
        tracing::debug!(requested = slug, fallback = %first.slug, "page not found, opening first page");
        Ok(first)
    }

    /// Normalize a page into a fresh editing session
    pub fn open(&self, slug: &str) -> Result<EditSession, EditorError> {
        let page = self.page_or_first(slug)?;
        let mut ids = IdGenerator::new(&page.slug);
        let forest = normalize_forest(&page.components, &mut ids);
        Ok(EditSession::new(page.slug.clone(), forest, ids))
    }

    /// Write a session's forest back into its page
    pub fn sync(&mut self, session: &EditSession) -> Result<(), EditorError> {
        self.set_components(&session.slug, denormalize_forest(session.forest()))
    }

    /// Replace a page's components with canonical page nodes
    pub fn set_components(&mut self, slug: &str, components: Vec<PageNode>) -> Result<(), EditorError> {
        let page = self
            .pages
            .iter_mut()
            .find(|page| page.slug == slug)
            .ok_or_else(|| EditorError::PageNotFound(slug.to_string()))?;

        page.components = components.iter().map(PageNode::to_value).collect();

        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }
        Ok(())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, EditorError> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.pages)?
        } else {
            serde_json::to_string(&self.pages)?
        };
        Ok(json)
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self, pretty: bool) -> Result<(), EditorError> {
        let json = self.to_json(pretty)?;
        match &mut self.storage {
            DocumentStorage::File { path, dirty } => {
                std::fs::write(&*path, json)?;
                *dirty = false;
                tracing::debug!(path = %path.display(), "saved page document");
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mutation;
    use serde_json::json;

    const PAGES: &str = r#"[
        {
            "id": "page_1",
            "title": "Home",
            "slug": "home",
            "components": [
                { "tag": "h1", "content": "Welcome" },
                { "tag": "p", "content": "Intro" }
            ]
        },
        { "id": "page_2", "title": "About", "slug": "about", "components": [] }
    ]"#;

    #[test]
    fn test_create_memory_document() {
        let doc = PageDocument::from_json(PAGES).unwrap();

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.slugs().collect::<Vec<_>>(), vec!["home", "about"]);
        assert!(!doc.is_dirty());
        assert!(doc.path().is_none());
    }

    #[test]
    fn test_open_unknown_slug_falls_back_to_first_page() {
        let doc = PageDocument::from_json(PAGES).unwrap();
        let session = doc.open("missing").unwrap();

        assert_eq!(session.slug, "home");
        assert_eq!(session.forest().len(), 2);
    }

    #[test]
    fn test_open_empty_document_fails() {
        let doc = PageDocument::from_pages(vec![]);
        assert!(matches!(doc.open("home"), Err(EditorError::NoPages)));
    }

    #[test]
    fn test_sync_writes_canonical_components() {
        let mut doc = PageDocument::from_json(PAGES).unwrap();
        let mut session = doc.open("home").unwrap();
        let intro = session.forest().roots()[1].id.clone();

        session.apply(&Mutation::MoveUp { node_id: intro });
        doc.sync(&session).unwrap();

        assert_eq!(
            doc.page("home").unwrap().components,
            vec![json!({ "tag": "p", "content": "Intro" }), json!({ "tag": "h1", "content": "Welcome" })]
        );
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = PageDocument::from_json(PAGES).unwrap();
        assert!(matches!(doc.save(true), Err(EditorError::NotFileBacked)));
    }
}
