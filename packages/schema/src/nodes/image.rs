use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::nodes::element::leaf_schema;
use crate::style::{Align, ImageShape};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=Image";

attrs! {
    pub struct ImageAttrs / ImagePartial {
        "src" => src: String = PLACEHOLDER_IMAGE.to_string(),
        /// Alternative text
        "title" => title: String = "Image".to_string(),
        "width" => width: String = "100%".to_string(),
        "height" => height: String = "auto".to_string(),
        "align" => align: Align = Align::Left,
        "shape" => shape: ImageShape = ImageShape::Square,
        /// Space below the image in pixels
        "spacing" => spacing: f64 = 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: NodeId,
    pub attrs: ImageAttrs,
}

leaf_schema!(Image, ImageAttrs, ImagePartial, NodeKind::Image);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeSchema;
    use serde_json::json;

    #[test]
    fn test_placeholder_source() {
        assert_eq!(Image::create().attrs.src, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_shape_enum() {
        let image = Image::validate(&json!({ "type": "image", "shape": "circle" })).unwrap();
        assert_eq!(image.attrs.shape, ImageShape::Circle);

        let err = Image::validate(&json!({ "type": "image", "shape": "oval" })).unwrap_err();
        assert_eq!(err.path.as_str(), "shape");
    }
}
