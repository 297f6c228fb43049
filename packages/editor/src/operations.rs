//! # Tree operations
//!
//! Pure functions over an immutable [`Template`]. Each operation works on a
//! clone and either returns the complete new template or an error, leaving
//! the input untouched.
//!
//! Nodes are addressed by id and located depth first (container, row,
//! column, leaf). Parent/child typing is enforced at every level:
//!
//! | parent    | accepted children                     |
//! |-----------|---------------------------------------|
//! | container | row                                   |
//! | row       | column                                |
//! | column    | heading, text, image, button, hr      |

use crate::mutations::MutationError;
use mailcraft_schema::{
    describe, Column, Container, Element, FieldPath, Location, Node, NodeRef, NodeSchema, Row,
    Template, ValidationError,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Fields a patch may never touch
const IMMUTABLE_FIELDS: &[&str] = &["id", "type", "children"];

/// Owned copy of the node with `id`
pub fn find_node(template: &Template, id: &str) -> Result<Node, MutationError> {
    template
        .find(id)
        .map(|node| node.to_node())
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

/// Merge `patch` over the node's current attributes and re-validate it
/// through its own schema. Nested objects merge recursively; children are
/// kept.
#[instrument(skip(template, patch))]
pub fn update_node(template: &Template, id: &str, patch: &Value) -> Result<Template, MutationError> {
    let location = locate(template, id)?;
    let patch_object = patch_object(patch)?;
    if let Some(field) = IMMUTABLE_FIELDS.iter().find(|field| patch_object.contains_key(**field)) {
        return Err(MutationError::ImmutableField(field.to_string()));
    }

    let current = node_at(template, location)?;
    let mut merged = current.attributes();
    merge_json(&mut merged, patch);

    let path = location.path();
    let updated = match current {
        NodeRef::Container(_) => Node::Container(Container::validate_at(&merged, &path)?),
        NodeRef::Row(_) => Node::Row(Row::validate_at(&merged, &path)?),
        NodeRef::Column(_) => Node::Column(Column::validate_at(&merged, &path)?),
        NodeRef::Element(_) => Node::Element(Element::validate_at(&merged, &path)?),
    };

    let mut next = template.clone();
    replace_attrs(&mut next, location, updated)?;
    debug!(node_id = id, fields = patch_object.len(), "Updated node");
    Ok(next)
}

/// Insert `node` under `parent_id`. `index` defaults to append and clamps
/// to the end of the child list.
#[instrument(skip(template, node), fields(child = %node.id()))]
pub fn insert_node(
    template: &Template,
    parent_id: &str,
    node: Node,
    index: Option<usize>,
) -> Result<Template, MutationError> {
    let parent = template
        .locate(parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
    check_accepts(template, parent, &node)?;

    let existing = template.ids();
    let mut incoming = HashSet::new();
    for id in node.as_node_ref().subtree_ids() {
        if existing.contains(id) || !incoming.insert(id) {
            return Err(MutationError::DuplicateId(id.to_string()));
        }
    }

    let mut next = template.clone();
    let at = attach(&mut next, parent, node, index)?;
    debug!(parent_id, index = at, "Inserted node");
    Ok(next)
}

/// Remove a node and its whole subtree
#[instrument(skip(template))]
pub fn remove_node(template: &Template, id: &str) -> Result<Template, MutationError> {
    let location = locate(template, id)?;

    let mut next = template.clone();
    detach(&mut next, location)?;
    debug!(node_id = id, "Removed node");
    Ok(next)
}

/// Detach a node and re-insert it under `new_parent_id`, keeping its id.
/// `index` is read against the target child list after detaching.
#[instrument(skip(template))]
pub fn move_node(
    template: &Template,
    id: &str,
    new_parent_id: &str,
    index: Option<usize>,
) -> Result<Template, MutationError> {
    let location = locate(template, id)?;
    let parent = template
        .locate(new_parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.to_string()))?;

    let node_kind = node_at(template, location)?.kind();
    let parent_kind = node_at(template, parent)?.kind();
    if !parent_kind.accepts(node_kind) {
        return Err(MutationError::TypeConstraintViolation {
            parent: parent_kind,
            child: node_kind,
        });
    }

    let mut next = template.clone();
    let node = detach(&mut next, location)?;
    let parent = next
        .locate(new_parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.to_string()))?;
    let at = attach(&mut next, parent, node, index)?;

    debug!(node_id = id, new_parent_id, index = at, "Moved node");
    Ok(next)
}

/// Deep-copy a row, column or leaf with fresh ids, placed right after
/// the original
#[instrument(skip(template))]
pub fn duplicate_node(template: &Template, id: &str) -> Result<Template, MutationError> {
    let location = locate(template, id)?;
    let (parent, index) = match (location.parent(), location.index()) {
        (Some(parent), Some(index)) => (parent, index),
        _ => return Err(MutationError::CannotDuplicateContainer),
    };

    let mut copy = node_at(template, location)?.to_node();
    copy.regenerate_ids();
    let copy_id = copy.id().clone();

    let mut next = template.clone();
    attach(&mut next, parent, copy, Some(index + 1))?;
    debug!(node_id = id, copy_id = %copy_id, "Duplicated node");
    Ok(next)
}

/// Merge a patch over `title`, `preview` and `font`
#[instrument(skip(template, patch))]
pub fn update_template(template: &Template, patch: &Value) -> Result<Template, MutationError> {
    let patch_object = patch_object(patch)?;
    if patch_object.contains_key("container") {
        return Err(MutationError::ImmutableField("container".to_string()));
    }

    let mut merged = template.metadata();
    merge_json(&mut merged, patch);
    Ok(template.with_metadata(&merged)?)
}

/// Recursively overlay `patch` onto `target`. Objects merge key by key;
/// every other value replaces what was there.
pub fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

fn patch_object(patch: &Value) -> Result<&Map<String, Value>, MutationError> {
    patch.as_object().ok_or_else(|| {
        MutationError::Validation(ValidationError::new(FieldPath::root(), "object", describe(patch)))
    })
}

fn locate(template: &Template, id: &str) -> Result<Location, MutationError> {
    template
        .locate(id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

fn node_at(template: &Template, location: Location) -> Result<NodeRef<'_>, MutationError> {
    template
        .node_at(location)
        .ok_or_else(|| MutationError::NodeNotFound(location.path().to_string()))
}

fn check_accepts(template: &Template, parent: Location, node: &Node) -> Result<(), MutationError> {
    let parent_kind = node_at(template, parent)?.kind();
    if parent_kind.accepts(node.kind()) {
        Ok(())
    } else {
        Err(MutationError::TypeConstraintViolation {
            parent: parent_kind,
            child: node.kind(),
        })
    }
}

fn row_mut(template: &mut Template, row: usize) -> Option<&mut Row> {
    template.container.children.get_mut(row)
}

fn column_mut(template: &mut Template, row: usize, column: usize) -> Option<&mut Column> {
    row_mut(template, row)?.children.get_mut(column)
}

fn take<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

fn insert_clamped<T>(items: &mut Vec<T>, item: T, index: Option<usize>) -> usize {
    let at = index.unwrap_or(items.len()).min(items.len());
    items.insert(at, item);
    at
}

/// Remove the node at `location` from its parent's child list
fn detach(template: &mut Template, location: Location) -> Result<Node, MutationError> {
    let removed = match location {
        Location::Container => return Err(MutationError::CannotRemoveContainer),
        Location::Row { row } => take(&mut template.container.children, row).map(Node::Row),
        Location::Column { row, column } => {
            row_mut(template, row).and_then(|r| take(&mut r.children, column).map(Node::Column))
        }
        Location::Element {
            row,
            column,
            element,
        } => column_mut(template, row, column)
            .and_then(|c| take(&mut c.children, element).map(Node::Element)),
    };

    removed.ok_or_else(|| MutationError::NodeNotFound(location.path().to_string()))
}

/// Insert `node` into the child list at `parent`, returning the final index
fn attach(
    template: &mut Template,
    parent: Location,
    node: Node,
    index: Option<usize>,
) -> Result<usize, MutationError> {
    let parent_missing = || MutationError::ParentNotFound(parent.path().to_string());

    match (parent, node) {
        (Location::Container, Node::Row(row)) => {
            Ok(insert_clamped(&mut template.container.children, row, index))
        }
        (Location::Row { row }, Node::Column(column)) => {
            let parent_row = row_mut(template, row).ok_or_else(parent_missing)?;
            Ok(insert_clamped(&mut parent_row.children, column, index))
        }
        (Location::Column { row, column }, Node::Element(element)) => {
            let parent_column = column_mut(template, row, column).ok_or_else(parent_missing)?;
            Ok(insert_clamped(&mut parent_column.children, element, index))
        }
        (parent, node) => Err(MutationError::TypeConstraintViolation {
            parent: node_at(template, parent)?.kind(),
            child: node.kind(),
        }),
    }
}

/// Swap in the attributes of `updated`, keeping the existing children
fn replace_attrs(template: &mut Template, location: Location, updated: Node) -> Result<(), MutationError> {
    let missing = || MutationError::NodeNotFound(location.path().to_string());

    match (location, updated) {
        (Location::Container, Node::Container(container)) => {
            template.container.attrs = container.attrs;
        }
        (Location::Row { row }, Node::Row(updated)) => {
            row_mut(template, row).ok_or_else(missing)?.attrs = updated.attrs;
        }
        (Location::Column { row, column }, Node::Column(updated)) => {
            column_mut(template, row, column).ok_or_else(missing)?.attrs = updated.attrs;
        }
        (
            Location::Element {
                row,
                column,
                element,
            },
            Node::Element(updated),
        ) => {
            let slot = column_mut(template, row, column)
                .and_then(|c| c.children.get_mut(element))
                .ok_or_else(missing)?;
            *slot = updated;
        }
        (location, updated) => {
            return Err(MutationError::TypeConstraintViolation {
                parent: node_at(template, location)?.kind(),
                child: updated.kind(),
            })
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_schema::{default_template, NodeKind};
    use serde_json::json;

    #[test]
    fn test_merge_json_recurses_into_objects() {
        let mut target = json!({ "style": { "a": 1, "b": 2 }, "title": "x" });
        merge_json(&mut target, &json!({ "style": { "b": 3 }, "gap": 4 }));
        assert_eq!(target, json!({ "style": { "a": 1, "b": 3 }, "title": "x", "gap": 4 }));
    }

    #[test]
    fn test_merge_json_replaces_arrays() {
        let mut target = json!({ "weight": [400, 700] });
        merge_json(&mut target, &json!({ "weight": [300] }));
        assert_eq!(target["weight"], json!([300]));
    }

    #[test]
    fn test_update_keeps_children_and_id() {
        let template = default_template();
        let updated = update_node(&template, "row-cta", &json!({ "gap": 8 })).unwrap();

        let before = template.find("row-cta").unwrap();
        let after = updated.find("row-cta").unwrap();
        assert_eq!(after.child_count(), before.child_count());
        assert_eq!(after.attributes()["gap"], json!(8));
    }

    #[test]
    fn test_update_rejects_type_change() {
        let template = default_template();
        let err = update_node(&template, "logo", &json!({ "type": "text" })).unwrap_err();
        assert_eq!(err, MutationError::ImmutableField("type".to_string()));
    }

    #[test]
    fn test_update_error_path_is_absolute() {
        let template = default_template();
        let err = update_node(&template, "cta-text", &json!({ "fontSize": 16 })).unwrap_err();
        match err {
            MutationError::Validation(err) => {
                assert_eq!(err.path.as_str(), "container.children[5].children[0].children[0].fontSize")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_patch_must_be_object() {
        let template = default_template();
        let err = update_node(&template, "logo", &json!([1])).unwrap_err();
        assert!(matches!(err, MutationError::Validation(_)));
    }

    #[test]
    fn test_duplicate_container_rejected() {
        let template = default_template();
        assert_eq!(
            duplicate_node(&template, "container-1").unwrap_err(),
            MutationError::CannotDuplicateContainer
        );
    }

    #[test]
    fn test_attach_rejects_wrong_level() {
        let mut template = default_template();
        let err = attach(&mut template, Location::Container, Node::defaults(NodeKind::Text), None).unwrap_err();
        assert_eq!(
            err,
            MutationError::TypeConstraintViolation {
                parent: NodeKind::Container,
                child: NodeKind::Text
            }
        );
    }
}
