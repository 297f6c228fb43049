mod button;
mod column;
mod container;
mod divider;
mod element;
mod heading;
mod image;
mod row;
mod text;

pub use button::{Button, ButtonAttrs, ButtonPartial};
pub use column::{Column, ColumnAttrs, ColumnPartial};
pub use container::{Container, ContainerAttrs, ContainerPartial, ContainerStyle, ContainerStylePartial};
pub use divider::{Divider, DividerAttrs, DividerPartial};
pub use element::Element;
pub use heading::{Heading, HeadingAttrs, HeadingPartial};
pub use image::{Image, ImageAttrs, ImagePartial, PLACEHOLDER_IMAGE};
pub use row::{Row, RowAttrs, RowPartial};
pub use text::{Text, TextAttrs, TextPartial};
