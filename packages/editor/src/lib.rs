//! # Mailcraft Editor
//!
//! Tree mutation engine and document editing for Mailcraft templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: JSON → validated Template           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents                      │
//! │  - Apply mutations with validation          │
//! │  - Snapshot undo/redo history               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Whole-tree replacement**: every edit yields a new template
//! 2. **All or nothing**: a failed edit changes nothing
//! 3. **Typed levels**: container → row → column → leaf, enforced on every insert and move
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailcraft_editor::{Document, Mutation};
//!
//! let mut doc = Document::load("welcome.json")?;
//!
//! let mutation = Mutation::UpdateNode {
//!     node_id: "cta-button".to_string(),
//!     patch: json!({ "text": "Sign up" }),
//! };
//! doc.apply(&mutation)?;
//!
//! doc.save()?;
//! ```

mod document;
mod errors;
mod mutations;
pub mod operations;
mod undo_stack;

pub use document::{Checkpoint, Document, DocumentStorage};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use operations::{
    duplicate_node, find_node, insert_node, move_node, remove_node, update_node, update_template,
};
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export the schema for convenience
pub use mailcraft_schema as schema;
