use crate::error::{FieldPath, ValidationResult};
use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::node::{node_serde, read_children, read_header, NodeSchema};
use crate::nodes::Row;
use crate::style::BorderStyle;
use serde_json::Value;

attrs! {
    /// Box styling of the email body
    pub struct ContainerStyle / ContainerStylePartial {
        "backgroundColor" => background_color: String = "#ffffff".to_string(),
        "maxWidth" => max_width: String = "600px".to_string(),
        "paddingTop" => padding_top: String = "32px".to_string(),
        "paddingRight" => padding_right: String = "32px".to_string(),
        "paddingBottom" => padding_bottom: String = "32px".to_string(),
        "paddingLeft" => padding_left: String = "32px".to_string(),
        "borderRadius" => border_radius: String = "0px".to_string(),
        "borderColor" => border_color: String = "#e5e7eb".to_string(),
        "borderWidth" => border_width: String = "1px".to_string(),
        "borderStyle" => border_style: BorderStyle = BorderStyle::Solid,
    }
}

attrs! {
    pub struct ContainerAttrs / ContainerPartial {
        "style" => style: ContainerStyle = ContainerStyle::default(),
    }
}

/// Root of the email body. A template holds exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: NodeId,
    pub attrs: ContainerAttrs,
    pub children: Vec<Row>,
}

impl NodeSchema for Container {
    const KIND: NodeKind = NodeKind::Container;
    type Partial = ContainerPartial;

    fn defaults(overrides: ContainerPartial) -> Self {
        Self {
            id: NodeId::generate(Self::KIND.as_str()),
            attrs: ContainerAttrs::resolve(overrides),
            children: Vec::new(),
        }
    }

    fn validate_at(input: &Value, path: &FieldPath) -> ValidationResult<Self> {
        let (object, id) = read_header(input, path, Self::KIND)?;
        let attrs = ContainerAttrs::read_from(object, path)?;
        let children = read_children(object, path, Row::validate_at)?;

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
        for row in &mut self.children {
            row.regenerate_ids();
        }
    }
}

node_serde!(Container, children);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_style_is_completed() {
        let container = Container::validate(&json!({
            "type": "container",
            "id": "c",
            "style": { "backgroundColor": "#000000" }
        }))
        .unwrap();

        assert_eq!(container.attrs.style.background_color, "#000000");
        assert_eq!(container.attrs.style.max_width, "600px");
        assert_eq!(container.attrs.style.border_style, BorderStyle::Solid);
        assert!(container.children.is_empty());
    }

    #[test]
    fn test_nested_style_error_path() {
        let err = Container::validate(&json!({
            "type": "container",
            "style": { "borderStyle": "wavy" }
        }))
        .unwrap_err();

        assert_eq!(err.path.as_str(), "style.borderStyle");
    }

    #[test]
    fn test_rejects_non_row_children() {
        let err = Container::validate(&json!({
            "type": "container",
            "children": [{ "type": "column" }]
        }))
        .unwrap_err();

        assert_eq!(err.path.as_str(), "children[0].type");
        assert_eq!(err.expected, "`row`");
    }
}
