use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::nodes::element::leaf_schema;
use crate::style::TextAlign;

attrs! {
    pub struct TextAttrs / TextPartial {
        /// Inline HTML content (links, line breaks)
        "html" => html: String = "Text".to_string(),
        "horizontalPadding" => horizontal_padding: f64 = 0.0,
        "verticalPadding" => vertical_padding: f64 = 0.0,
        "lineHeight" => line_height: f64 = 1.5,
        "fontWeight" => font_weight: String = "400".to_string(),
        "fontFamily" => font_family: String = "Arial, Helvetica, sans-serif".to_string(),
        "textAlign" => text_align: TextAlign = TextAlign::Left,
        "fontSize" => font_size: String = "15px".to_string(),
        "color" => color: String = "#000000".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub id: NodeId,
    pub attrs: TextAttrs,
}

leaf_schema!(Text, TextAttrs, TextPartial, NodeKind::Text);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeSchema;
    use serde_json::json;

    #[test]
    fn test_font_size_default() {
        let text = Text::validate(&json!({ "type": "text", "html": "Hello" })).unwrap();
        assert_eq!(text.attrs.font_size, "15px");
        assert_eq!(text.attrs.html, "Hello");
    }

    #[test]
    fn test_font_size_must_be_string() {
        let err = Text::validate(&json!({ "type": "text", "fontSize": 15 })).unwrap_err();
        assert_eq!(err.path.as_str(), "fontSize");
        assert_eq!(err.expected, "string");
    }
}
