use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::nodes::element::leaf_schema;
use crate::style::Align;

attrs! {
    pub struct ButtonAttrs / ButtonPartial {
        "text" => text: String = "Button".to_string(),
        "fontFamily" => font_family: String = "Arial, Helvetica, sans-serif".to_string(),
        "href" => href: String = "#".to_string(),
        "align" => align: Align = Align::Left,
        "width" => width: String = "120px".to_string(),
        /// Vertical inner padding in pixels
        "height" => height: f64 = 10.0,
        "horizontalMargin" => horizontal_margin: f64 = 0.0,
        "verticalMargin" => vertical_margin: f64 = 0.0,
        "backgroundColor" => background_color: String = "#000000".to_string(),
        "color" => color: String = "#ffffff".to_string(),
        "fontSize" => font_size: String = "14px".to_string(),
        "borderRadius" => border_radius: f64 = 6.0,
    }
}

/// Call-to-action link rendered as a bulletproof button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub id: NodeId,
    pub attrs: ButtonAttrs,
}

leaf_schema!(Button, ButtonAttrs, ButtonPartial, NodeKind::Button);
