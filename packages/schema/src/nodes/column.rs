use crate::error::{FieldPath, ValidationResult};
use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::node::{node_serde, read_children, read_header, NodeSchema};
use crate::nodes::Element;
use serde_json::Value;

attrs! {
    pub struct ColumnAttrs / ColumnPartial {
        "title" => title: String = "Untitled column".to_string(),
        "width" => width: String = "100%".to_string(),
        "backgroundColor" => background_color: String = "#e9e9e9".to_string(),
        "horizontalPadding" => horizontal_padding: f64 = 0.0,
        "verticalPadding" => vertical_padding: f64 = 150.0,
        "borderRadius" => border_radius: String = "5px".to_string(),
    }
}

/// A column holds leaf content elements only
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: NodeId,
    pub attrs: ColumnAttrs,
    pub children: Vec<Element>,
}

impl NodeSchema for Column {
    const KIND: NodeKind = NodeKind::Column;
    type Partial = ColumnPartial;

    fn defaults(overrides: ColumnPartial) -> Self {
        Self {
            id: NodeId::generate(Self::KIND.as_str()),
            attrs: ColumnAttrs::resolve(overrides),
            children: Vec::new(),
        }
    }

    fn validate_at(input: &Value, path: &FieldPath) -> ValidationResult<Self> {
        let (object, id) = read_header(input, path, Self::KIND)?;
        let attrs = ColumnAttrs::read_from(object, path)?;
        let children = read_children(object, path, Element::validate_at)?;

        Ok(Self { id, attrs, children })
    }

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn regenerate_ids(&mut self) {
        self.id = NodeId::generate(Self::KIND.as_str());
        for element in &mut self.children {
            element.regenerate_ids();
        }
    }
}

node_serde!(Column, children);
