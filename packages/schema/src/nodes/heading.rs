use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::nodes::element::leaf_schema;
use crate::style::{HeadingLevel, TextAlign};

attrs! {
    pub struct HeadingAttrs / HeadingPartial {
        "as" => level: HeadingLevel = HeadingLevel::H2,
        "text" => text: String = "Heading".to_string(),
        "color" => color: String = "#000000".to_string(),
        "horizontalPadding" => horizontal_padding: f64 = 0.0,
        "verticalPadding" => vertical_padding: f64 = 0.0,
        "horizontalMargin" => horizontal_margin: f64 = 0.0,
        "verticalMargin" => vertical_margin: f64 = 16.0,
        "lineHeight" => line_height: f64 = 1.2,
        "fontWeight" => font_weight: String = "600".to_string(),
        "fontFamily" => font_family: String = "Arial, Helvetica, sans-serif".to_string(),
        "textAlign" => text_align: TextAlign = TextAlign::Left,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub id: NodeId,
    pub attrs: HeadingAttrs,
}

leaf_schema!(Heading, HeadingAttrs, HeadingPartial, NodeKind::Heading);
