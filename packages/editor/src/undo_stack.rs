//! # Undo/Redo Stack
//!
//! Edit history kept as whole-template snapshots. Undoing a step swaps the
//! document back to the template it had before the step; redoing swaps the
//! later snapshot in again. Recording a fresh step forgets everything that
//! was undone.
//!
//! Several mutations can be grouped into one step with
//! [`UndoStack::begin_batch`] and [`UndoStack::end_batch`]. Undo and redo
//! are refused while a batch is open.
//!
//! ```rust,ignore
//! let mut history = UndoStack::new();
//! let mut doc = Document::from_template("welcome.json", default_template());
//!
//! history.apply(&mutation, &mut doc)?;
//! history.undo(&mut doc);
//! history.redo(&mut doc);
//! ```

use crate::{Checkpoint, Document, EditorError, Mutation, MutationResult};
use mailcraft_schema::Template;
use std::collections::VecDeque;
use tracing::debug;

const DEFAULT_LEVELS: usize = 100;

/// One undo step: the mutations it applied and the templates on either side
#[derive(Debug, Clone)]
pub struct MutationBatch {
    pub mutations: Vec<Mutation>,
    pub before: Template,
    pub after: Template,
    pub description: Option<String>,
}

impl MutationBatch {
    pub fn single(mutation: Mutation, before: Template, after: Template) -> Self {
        Self {
            mutations: vec![mutation],
            before,
            after,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Default)]
struct OpenBatch {
    mutations: Vec<Mutation>,
    start: Option<Checkpoint>,
    description: Option<String>,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Oldest step at the front
    done: VecDeque<MutationBatch>,
    undone: Vec<MutationBatch>,
    /// 0 keeps every step
    limit: usize,
    open: Option<OpenBatch>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_LEVELS)
    }

    pub fn with_max_levels(limit: usize) -> Self {
        Self {
            done: VecDeque::new(),
            undone: Vec::new(),
            limit,
            open: None,
        }
    }

    /// Apply `mutation` to `doc`. Successful edits become an undo step, or
    /// join the open batch.
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut Document) -> Result<MutationResult, EditorError> {
        let start = doc.checkpoint();
        let result = doc.apply(mutation)?;

        match &mut self.open {
            Some(open) => {
                open.mutations.push(mutation.clone());
                open.start.get_or_insert(start);
            }
            None => {
                let step = MutationBatch::single(mutation.clone(), start.into_template(), doc.template().clone())
                    .with_description(mutation.label());
                self.record(step);
            }
        }

        Ok(result)
    }

    /// Group the following mutations into a single undo step
    pub fn begin_batch(&mut self) {
        self.open = Some(OpenBatch::default());
    }

    /// No-op unless a batch is open
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(open) = &mut self.open {
            open.description = Some(description.into());
        }
    }

    /// Close the open batch, taking the after-snapshot from `doc`. A batch
    /// that applied nothing records nothing.
    pub fn end_batch(&mut self, doc: &Document) {
        let Some(open) = self.open.take() else {
            return;
        };

        if let Some(start) = open.start {
            self.record(MutationBatch {
                mutations: open.mutations,
                before: start.into_template(),
                after: doc.template().clone(),
                description: open.description,
            });
        }
    }

    pub fn is_batching(&self) -> bool {
        self.open.is_some()
    }

    /// Drop the open batch and put `doc` back where the batch started,
    /// version included
    pub fn abort_batch(&mut self, doc: &mut Document) {
        if let Some(OpenBatch {
            start: Some(start), ..
        }) = self.open.take()
        {
            doc.restore(start);
        }
    }

    fn record(&mut self, step: MutationBatch) {
        debug!(
            mutations = step.mutations.len(),
            description = step.description.as_deref().unwrap_or(""),
            "Recorded undo step"
        );
        self.done.push_back(step);
        if self.limit > 0 && self.done.len() > self.limit {
            self.done.pop_front();
        }
        self.undone.clear();
    }

    /// Returns false when there is nothing to undo or a batch is open
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        if self.is_batching() {
            return false;
        }
        let Some(step) = self.done.pop_back() else {
            return false;
        };
        doc.replace(step.before.clone());
        self.undone.push(step);
        true
    }

    /// Returns false when there is nothing to redo or a batch is open
    pub fn redo(&mut self, doc: &mut Document) -> bool {
        if self.is_batching() {
            return false;
        }
        let Some(step) = self.undone.pop() else {
            return false;
        };
        doc.replace(step.after.clone());
        self.done.push_back(step);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.is_batching() && !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_batching() && !self.undone.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.done.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.undone.len()
    }

    /// Forget all history, including an open batch
    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
        self.open = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.done.back().and_then(|step| step.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.undone.last().and_then(|step| step.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_schema::default_template;
    use serde_json::json;

    fn doc() -> Document {
        Document::from_template("test.json", default_template())
    }

    fn set_html(id: &str, html: &str) -> Mutation {
        Mutation::UpdateNode {
            node_id: id.to_string(),
            patch: json!({ "html": html }),
        }
    }

    fn html_of(doc: &Document, id: &str) -> String {
        doc.template().find(id).unwrap().attributes()["html"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_empty_history() {
        let history = UndoStack::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_apply_and_undo_update() {
        let mut doc = doc();
        let mut history = UndoStack::new();

        history.apply(&set_html("cta-text", "World"), &mut doc).unwrap();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Update cta-text"));
        assert_eq!(html_of(&doc, "cta-text"), "World");

        // Undo
        assert!(history.undo(&mut doc));
        assert_eq!(html_of(&doc, "cta-text"), "Try Resend today");
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 1);

        // Redo
        assert!(history.redo(&mut doc));
        assert_eq!(html_of(&doc, "cta-text"), "World");
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_failed_mutation_not_recorded() {
        let mut doc = doc();
        let mut history = UndoStack::new();

        let mutation = Mutation::RemoveNode {
            node_id: "container-1".to_string(),
        };
        assert!(history.apply(&mutation, &mut doc).is_err());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_batch_undoes_as_one_step() {
        let mut doc = doc();
        let mut history = UndoStack::new();

        history.begin_batch();
        history.set_batch_description("Rewrite copy");
        history.apply(&set_html("cta-text", "One"), &mut doc).unwrap();
        history.apply(&set_html("footer-text", "Two"), &mut doc).unwrap();
        history.end_batch(&doc);

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Rewrite copy"));

        // Undo reverts both
        history.undo(&mut doc);
        assert_eq!(doc.template(), &default_template());
    }

    #[test]
    fn test_empty_batch_is_dropped() {
        let doc = doc();
        let mut history = UndoStack::new();

        history.begin_batch();
        history.end_batch(&doc);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_abort_batch_restores() {
        let mut doc = doc();
        let mut history = UndoStack::new();

        history.begin_batch();
        history.apply(&set_html("cta-text", "One"), &mut doc).unwrap();
        history.abort_batch(&mut doc);

        assert!(!history.is_batching());
        assert_eq!(doc.template(), &default_template());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_abort_batch_restores_version() {
        let mut doc = doc();
        let mut history = UndoStack::new();

        history.apply(&set_html("cta-text", "Before"), &mut doc).unwrap();
        history.begin_batch();
        history.apply(&set_html("cta-text", "One"), &mut doc).unwrap();
        history.apply(&set_html("footer-text", "Two"), &mut doc).unwrap();
        history.abort_batch(&mut doc);

        assert_eq!(doc.version, 1);
        assert_eq!(html_of(&doc, "cta-text"), "Before");
        assert_eq!(history.undo_levels(), 1);
    }

    #[test]
    fn test_undo_refused_inside_batch() {
        let mut doc = doc();
        let footer = html_of(&doc, "footer-text");
        let mut history = UndoStack::new();

        history.apply(&set_html("cta-text", "X"), &mut doc).unwrap();
        history.begin_batch();
        history.apply(&set_html("footer-text", "Y"), &mut doc).unwrap();

        assert!(!history.can_undo());
        assert!(!history.undo(&mut doc));
        assert!(!history.redo(&mut doc));
        assert_eq!(html_of(&doc, "cta-text"), "X");

        history.end_batch(&doc);
        assert_eq!(history.undo_levels(), 2);

        // Batch first, then the earlier edit
        assert!(history.undo(&mut doc));
        assert_eq!(html_of(&doc, "footer-text"), footer);
        assert_eq!(html_of(&doc, "cta-text"), "X");
        assert!(history.undo(&mut doc));
        assert_eq!(doc.template(), &default_template());
    }

    #[test]
    fn test_fresh_edit_forgets_redo() {
        let mut doc = doc();
        let mut history = UndoStack::new();

        history.apply(&set_html("cta-text", "World"), &mut doc).unwrap();
        history.undo(&mut doc);
        assert_eq!(history.redo_levels(), 1);

        history.apply(&set_html("cta-text", "Everyone"), &mut doc).unwrap();
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_oldest_step_dropped_past_limit() {
        let mut doc = doc();
        let mut history = UndoStack::with_max_levels(2);

        for i in 0..3 {
            history
                .apply(&set_html("cta-text", &format!("Text {}", i)), &mut doc)
                .unwrap();
        }

        assert_eq!(history.undo_levels(), 2);

        // Oldest step was dropped, so two undos land on "Text 0"
        history.undo(&mut doc);
        history.undo(&mut doc);
        assert_eq!(html_of(&doc, "cta-text"), "Text 0");
        assert!(!history.undo(&mut doc));
    }
}
