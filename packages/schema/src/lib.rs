//! # Mailcraft Schema
//!
//! Typed data model for email templates built from nested layout
//! primitives and leaf content elements.
//!
//! ```text
//! Template { title, preview, font }
//!   └─ Container
//!       └─ Row*
//!           └─ Column*
//!               └─ heading | text | image | button | hr
//! ```
//!
//! Each node kind has a validator for untrusted JSON, a total default
//! table and a stable serialized form (`id`, `type`, attributes, then
//! `children`). Parent/child typing is carried by the Rust types, so a
//! `Template` value cannot hold a column directly under the container.
//!
//! ```rust,ignore
//! use mailcraft_schema::{Template, NodeKind, Node};
//!
//! let template = Template::validate(&input)?;
//! let button = template.find("cta-button");
//! let divider = Node::defaults(NodeKind::Divider);
//! ```

mod error;
mod field;
mod fixture;
mod id;
mod kind;
mod location;
mod node;
mod nodes;
mod style;
mod template;
pub mod visitor;

pub use error::{describe, FieldPath, ValidationError, ValidationResult};
pub use field::FieldValue;
pub use fixture::default_template;
pub use id::NodeId;
pub use kind::NodeKind;
pub use location::Location;
pub use node::{Node, NodeRef, NodeSchema};
pub use nodes::*;
pub use style::{Align, BorderStyle, HeadingLevel, ImageShape, TextAlign};
pub use template::{Font, FontPartial, Template};
