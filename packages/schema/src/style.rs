//! Closed enumerations shared by several node kinds.

use crate::field::string_enum;

string_enum! {
    /// Horizontal placement of a block element within its column
    pub enum Align {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

string_enum! {
    pub enum TextAlign {
        Left => "left",
        Center => "center",
        Right => "right",
        Justify => "justify",
    }
}

string_enum! {
    /// Semantic level of a heading
    pub enum HeadingLevel {
        H1 => "h1",
        H2 => "h2",
        H3 => "h3",
        H4 => "h4",
        H5 => "h5",
        H6 => "h6",
    }
}

string_enum! {
    pub enum ImageShape {
        Square => "square",
        Rounded => "rounded",
        Circle => "circle",
    }
}

string_enum! {
    pub enum BorderStyle {
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
        Double => "double",
        None => "none",
    }
}
