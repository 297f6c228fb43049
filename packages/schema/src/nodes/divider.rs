use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::nodes::element::leaf_schema;

attrs! {
    pub struct DividerAttrs / DividerPartial {
        "color" => color: String = "#e5e7eb".to_string(),
        "thickness" => thickness: f64 = 1.0,
        "width" => width: String = "100%".to_string(),
        "verticalMargin" => vertical_margin: f64 = 16.0,
    }
}

/// Horizontal rule, tagged `hr`
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    pub id: NodeId,
    pub attrs: DividerAttrs,
}

leaf_schema!(Divider, DividerAttrs, DividerPartial, NodeKind::Divider);
