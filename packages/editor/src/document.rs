//! # Document Handle
//!
//! A Document holds one email template and its editing state.
//! Documents can be:
//! - **Memory-backed**: Temporary, for tests, previews or in-browser state
//! - **File-backed**: Loaded from and saved to a JSON file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Validate → Edit → Save
//!   ↓       ↓         ↓      ↓
//! File   Template Mutations File
//! ```
//!
//! Every successful edit replaces the whole template and bumps `version`.
//! A failed edit leaves both untouched.

use crate::{EditorError, Mutation, MutationResult};
use mailcraft_schema::Template;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Editable email template
#[derive(Debug)]
pub struct Document {
    /// Path of the backing file, or a display name for memory documents
    pub path: PathBuf,

    /// Current version number (increments on each successful edit)
    pub version: u64,

    storage: DocumentStorage,
}

/// Saved document state, see [`Document::checkpoint`]
#[derive(Debug, Clone)]
pub struct Checkpoint {
    template: Template,
    version: u64,
    dirty: bool,
}

impl Checkpoint {
    pub fn into_template(self) -> Template {
        self.template
    }
}

/// Where the template lives between edits
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only
    Memory { template: Template },

    /// File-backed
    File { template: Template, dirty: bool },
}

impl Document {
    /// Wrap an already validated template (memory-backed)
    pub fn from_template(path: impl Into<PathBuf>, template: Template) -> Self {
        Self {
            path: path.into(),
            version: 0,
            storage: DocumentStorage::Memory { template },
        }
    }

    /// Create document from JSON source (memory-backed)
    pub fn from_source(path: impl Into<PathBuf>, source: &str) -> Result<Self, EditorError> {
        let template = parse_template(source)?;
        Ok(Self::from_template(path, template))
    }

    /// Read and validate a template file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path)?;
        let template = parse_template(&source)?;

        info!(path = %path.display(), title = %template.title, "Loaded document");
        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File {
                template,
                dirty: false,
            },
        })
    }

    pub fn template(&self) -> &Template {
        match &self.storage {
            DocumentStorage::Memory { template } => template,
            DocumentStorage::File { template, .. } => template,
        }
    }

    /// Apply a mutation. On error the document is left as it was.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let next = mutation.apply(self.template())?;
        self.replace(next);

        debug!(
            version = self.version,
            target = mutation.target().unwrap_or("template"),
            mutation = %mutation.label(),
            "Applied mutation"
        );
        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Swap in a whole new template, e.g. an undo snapshot
    pub fn replace(&mut self, next: Template) {
        match &mut self.storage {
            DocumentStorage::Memory { template } => *template = next,
            DocumentStorage::File { template, dirty } => {
                *template = next;
                *dirty = true;
            }
        }
        self.version += 1;
    }

    /// Current template, version and dirty flag, for [`Document::restore`]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            template: self.template().clone(),
            version: self.version,
            dirty: self.is_dirty(),
        }
    }

    /// Return to a checkpoint as if the edits since never happened
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        match &mut self.storage {
            DocumentStorage::Memory { template } => *template = checkpoint.template,
            DocumentStorage::File { template, dirty } => {
                *template = checkpoint.template;
                *dirty = checkpoint.dirty;
            }
        }
        self.version = checkpoint.version;
    }

    /// Unsaved edits since load or the last save. Always false in memory
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            _ => false,
        }
    }

    /// Write back to `path` as pretty JSON. Memory documents use `save_as`
    pub fn save(&mut self) -> Result<(), EditorError> {
        let source = self.to_json(true)?;
        match &mut self.storage {
            DocumentStorage::File { dirty, .. } => {
                std::fs::write(&self.path, source)?;
                *dirty = false;
                info!(path = %self.path.display(), version = self.version, "Saved document");
                Ok(())
            }
            _ => Err(EditorError::NotFileBacked),
        }
    }

    /// Write the template to `path` regardless of backing
    pub fn save_as(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), EditorError> {
        std::fs::write(path, self.to_json(pretty)?)?;
        Ok(())
    }

    /// Serialized template, with a trailing newline when pretty
    pub fn to_json(&self, pretty: bool) -> Result<String, EditorError> {
        Ok(if pretty {
            let mut source = serde_json::to_string_pretty(self.template())?;
            source.push('\n');
            source
        } else {
            serde_json::to_string(self.template())?
        })
    }
}

fn parse_template(source: &str) -> Result<Template, EditorError> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    Ok(Template::validate(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_schema::default_template;
    use serde_json::json;

    #[test]
    fn test_memory_document_starts_clean() {
        let doc = Document::from_template("welcome.json", default_template());

        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert_eq!(doc.template().container.children.len(), 7);
    }

    #[test]
    fn test_document_version_increments_on_success_only() {
        let mut doc = Document::from_template("welcome.json", default_template());

        let bad = Mutation::RemoveNode {
            node_id: "missing".to_string(),
        };
        assert!(doc.apply(&bad).is_err());
        assert_eq!(doc.version, 0);
        assert_eq!(doc.template(), &default_template());

        let good = Mutation::UpdateNode {
            node_id: "cta-text".to_string(),
            patch: json!({ "html": "Try it now" }),
        };
        let result = doc.apply(&good).unwrap();
        assert_eq!(result.version, 1);
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_invalid_source_reports_path() {
        let err = Document::from_source("bad.json", r#"{ "title": "t", "preview": 1 }"#).unwrap_err();
        match err {
            EditorError::Validation(err) => assert_eq!(err.path.as_str(), "preview"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_restore_checkpoint_resets_version() {
        let mut doc = Document::from_template("welcome.json", default_template());
        let checkpoint = doc.checkpoint();

        doc.apply(&Mutation::RemoveNode {
            node_id: "row-footer".to_string(),
        })
        .unwrap();
        assert_eq!(doc.version, 1);

        doc.restore(checkpoint);
        assert_eq!(doc.version, 0);
        assert_eq!(doc.template(), &default_template());
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = Document::from_template("welcome.json", default_template());
        assert!(matches!(doc.save(), Err(EditorError::NotFileBacked)));
    }
}
