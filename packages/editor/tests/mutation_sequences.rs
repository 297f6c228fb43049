//! Tests for chains of mutations
//!
//! This tests:
//! - Move + update + delete chains
//! - Undo/redo sequences
//! - Batched mutations
//! - Template integrity after operations

use mailcraft_editor::schema::{default_template, Node, NodeKind, Row};
use mailcraft_editor::{Document, Mutation, UndoStack};
use serde_json::json;

fn document() -> Document {
    Document::from_template("digest.json", default_template())
}

#[test]
fn test_move_then_delete_sequence() {
    let mut doc = document();
    let mut stack = UndoStack::new();

    // Move the CTA button into the footer
    let move_mut = Mutation::MoveNode {
        node_id: "cta-button".to_string(),
        new_parent_id: "col-footer".to_string(),
        index: None,
    };
    stack.apply(&move_mut, &mut doc).unwrap();
    assert_eq!(doc.template().find("col-footer").unwrap().child_count(), 2);

    // Delete the footer row (takes the button with it)
    let delete_mut = Mutation::RemoveNode {
        node_id: "row-footer".to_string(),
    };
    stack.apply(&delete_mut, &mut doc).unwrap();
    assert!(doc.template().find("cta-button").is_none());
    assert!(doc.template().find("footer-text").is_none());

    // Undo delete restores both
    stack.undo(&mut doc);
    assert!(doc.template().find("cta-button").is_some());
    assert!(doc.template().find("footer-text").is_some());

    // Undo move puts the button back
    stack.undo(&mut doc);
    assert_eq!(doc.template(), &default_template());
}

#[test]
fn test_insert_update_move_chain_keeps_ids_unique() {
    let mut doc = document();

    let row = Row::with_layout("50-50");
    let row_id = row.id.to_string();
    let left = row.children[0].id.to_string();
    let right = row.children[1].id.to_string();

    doc.apply(&Mutation::InsertNode {
        parent_id: "container-1".to_string(),
        node: Node::Row(row),
        index: Some(1),
    })
    .unwrap();

    doc.apply(&Mutation::InsertNode {
        parent_id: left.clone(),
        node: Node::defaults(NodeKind::Heading),
        index: None,
    })
    .unwrap();

    doc.apply(&Mutation::MoveNode {
        node_id: "logo".to_string(),
        new_parent_id: right.clone(),
        index: None,
    })
    .unwrap();

    doc.apply(&Mutation::UpdateNode {
        node_id: row_id.clone(),
        patch: json!({ "gap": 16, "title": "Split" }),
    })
    .unwrap();

    doc.apply(&Mutation::DuplicateNode {
        node_id: row_id.clone(),
    })
    .unwrap();

    let template = doc.template();
    assert_eq!(doc.version, 5);
    assert!(template.check_unique_ids().is_ok());
    assert_eq!(template.container.children.len(), 9);
    assert_eq!(template.find("col-logo").unwrap().child_count(), 0);
    assert_eq!(template.find(&right).unwrap().child_count(), 1);

    // Copy sits right after the original and matches it apart from ids
    let original = &template.container.children[1];
    let copy = &template.container.children[2];
    assert_eq!(original.id, row_id.as_str());
    assert_eq!(copy.attrs, original.attrs);
    assert_eq!(copy.children.len(), 2);
}

#[test]
fn test_batch_undo_redo_round_trip() {
    let mut doc = document();
    let mut stack = UndoStack::new();

    stack.begin_batch();
    stack.set_batch_description("Rebrand");
    for (id, patch) in [
        ("cta-button", json!({ "backgroundColor": "#4f46e5" })),
        ("intro-heading", json!({ "color": "#4f46e5" })),
    ] {
        stack
            .apply(
                &Mutation::UpdateNode {
                    node_id: id.to_string(),
                    patch,
                },
                &mut doc,
            )
            .unwrap();
    }
    stack
        .apply(
            &Mutation::UpdateTemplate {
                patch: json!({ "title": "Rebranded" }),
            },
            &mut doc,
        )
        .unwrap();
    stack.end_batch(&doc);

    let edited = doc.template().clone();
    assert_eq!(stack.undo_levels(), 1);

    stack.undo(&mut doc);
    assert_eq!(doc.template(), &default_template());

    stack.redo(&mut doc);
    assert_eq!(doc.template(), &edited);
    assert_eq!(edited.title, "Rebranded");
}

#[test]
fn test_failure_mid_batch_can_roll_back() {
    let mut doc = document();
    let mut stack = UndoStack::new();

    stack.begin_batch();
    stack
        .apply(
            &Mutation::RemoveNode {
                node_id: "row-logo".to_string(),
            },
            &mut doc,
        )
        .unwrap();

    let bad = Mutation::MoveNode {
        node_id: "cta-text".to_string(),
        new_parent_id: "row-cta".to_string(),
        index: None,
    };
    assert!(stack.apply(&bad, &mut doc).is_err());

    stack.abort_batch(&mut doc);
    assert_eq!(doc.template(), &default_template());
}

#[test]
fn test_mutations_round_trip_as_json() {
    let mutations = vec![
        Mutation::DuplicateNode {
            node_id: "row-update-1".to_string(),
        },
        Mutation::UpdateNode {
            node_id: "update-1-heading".to_string(),
            patch: json!({ "as": "h3" }),
        },
    ];

    let encoded = serde_json::to_string(&mutations).unwrap();
    let decoded: Vec<Mutation> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, mutations);

    let mut template = default_template();
    for mutation in &decoded {
        template = mutation.apply(&template).unwrap();
    }
    assert_eq!(template.container.children.len(), 8);
}
