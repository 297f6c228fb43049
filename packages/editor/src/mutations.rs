//! # Template Mutations
//!
//! Serializable edits on a [`Template`], one variant per tree operation.
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Atomic detach + insert, the node keeps its id
//! - The index is read against the target list after detaching
//! - Fails if the target parent cannot hold the node's kind
//!
//! ### Update
//! - Patch merged over the current attributes, nested objects recursively
//! - `id`, `type` and `children` are immutable
//! - Last write wins
//!
//! ### Remove
//! - Removes the node and all descendants
//! - The container itself cannot be removed
//!
//! Every mutation is all-or-nothing: on error the input template is
//! returned to the caller unchanged.

use crate::operations;
use mailcraft_schema::{Node, NodeKind, Template, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One edit to a template tree, as sent by an editor client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a node (with its subtree) under a parent
    InsertNode {
        parent_id: String,
        node: Node,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Merge a partial attribute patch into a node
    UpdateNode { node_id: String, patch: Value },

    /// Delete a node with its whole subtree
    RemoveNode { node_id: String },

    /// Move a node to a new parent at index
    MoveNode {
        node_id: String,
        new_parent_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Copy a node with fresh ids right after the original
    DuplicateNode { node_id: String },

    /// Merge a patch into the template title, preview or font
    UpdateTemplate { patch: Value },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("A {parent} cannot contain a {child}")]
    TypeConstraintViolation { parent: NodeKind, child: NodeKind },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The container cannot be removed")]
    CannotRemoveContainer,

    #[error("The container cannot be duplicated")]
    CannotDuplicateContainer,

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Field `{0}` cannot be changed by a patch")]
    ImmutableField(String),
}

impl Mutation {
    /// Apply the mutation, producing a new template
    pub fn apply(&self, template: &Template) -> Result<Template, MutationError> {
        match self {
            Mutation::InsertNode {
                parent_id,
                node,
                index,
            } => operations::insert_node(template, parent_id, node.clone(), *index),

            Mutation::UpdateNode { node_id, patch } => {
                operations::update_node(template, node_id, patch)
            }

            Mutation::RemoveNode { node_id } => operations::remove_node(template, node_id),

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => operations::move_node(template, node_id, new_parent_id, *index),

            Mutation::DuplicateNode { node_id } => operations::duplicate_node(template, node_id),

            Mutation::UpdateTemplate { patch } => operations::update_template(template, patch),
        }
    }

    /// Dry run: would `apply` succeed on `template`?
    pub fn validate(&self, template: &Template) -> Result<(), MutationError> {
        self.apply(template).map(|_| ())
    }

    /// Id of the node the mutation targets, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Mutation::InsertNode { parent_id, .. } => Some(parent_id),
            Mutation::UpdateNode { node_id, .. }
            | Mutation::RemoveNode { node_id }
            | Mutation::MoveNode { node_id, .. }
            | Mutation::DuplicateNode { node_id } => Some(node_id),
            Mutation::UpdateTemplate { .. } => None,
        }
    }

    /// Short human label, used as the default undo description
    pub fn label(&self) -> String {
        match self {
            Mutation::InsertNode { parent_id, node, .. } => {
                format!("Insert {} into {}", node.kind(), parent_id)
            }
            Mutation::UpdateNode { node_id, .. } => format!("Update {}", node_id),
            Mutation::RemoveNode { node_id } => format!("Remove {}", node_id),
            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => format!("Move {} to {}", node_id, new_parent_id),
            Mutation::DuplicateNode { node_id } => format!("Duplicate {}", node_id),
            Mutation::UpdateTemplate { .. } => "Update template settings".to_string(),
        }
    }
}

/// Outcome of a successful edit on a [`crate::Document`]
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_schema::default_template;
    use serde_json::json;

    #[test]
    fn test_mutation_json_round_trip() {
        let mutation = Mutation::UpdateNode {
            node_id: "text-123".to_string(),
            patch: json!({ "html": "Hello World" }),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_insert_deserializes_node_through_validator() {
        let mutation: Mutation = serde_json::from_value(json!({
            "InsertNode": {
                "parent_id": "col-cta",
                "node": { "type": "hr" }
            }
        }))
        .unwrap();

        match mutation {
            Mutation::InsertNode { node, index, .. } => {
                assert_eq!(node.kind(), NodeKind::Divider);
                assert_eq!(index, None);
            }
            other => panic!("Expected insert, got {:?}", other),
        }

        let invalid = serde_json::from_value::<Mutation>(json!({
            "InsertNode": {
                "parent_id": "col-cta",
                "node": { "type": "hr", "thickness": "thick" }
            }
        }));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_empty_id_is_not_found() {
        let template = default_template();

        let mutation = Mutation::RemoveNode {
            node_id: "".to_string(),
        };

        assert_eq!(
            mutation.validate(&template),
            Err(MutationError::NodeNotFound("".to_string()))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = MutationError::TypeConstraintViolation {
            parent: NodeKind::Column,
            child: NodeKind::Row,
        };
        assert_eq!(err.to_string(), "A column cannot contain a row");
    }
}
