use crate::error::{FieldPath, ValidationResult};
use crate::field::expect_object;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::node::{read_kind, NodeSchema};
use crate::nodes::{Button, Divider, Heading, Image, Text};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Implements [`NodeSchema`] for a childless node `{ id, attrs }`
macro_rules! leaf_schema {
    ($node:ident, $attrs:ident, $partial:ident, $kind:expr) => {
        impl $crate::node::NodeSchema for $node {
            const KIND: $crate::kind::NodeKind = $kind;
            type Partial = $partial;

            fn defaults(overrides: $partial) -> Self {
                Self {
                    id: $crate::id::NodeId::generate(Self::KIND.as_str()),
                    attrs: $attrs::resolve(overrides),
                }
            }

            fn validate_at(
                input: &serde_json::Value,
                path: &$crate::error::FieldPath,
            ) -> $crate::error::ValidationResult<Self> {
                let (object, id) = $crate::node::read_header(input, path, Self::KIND)?;
                let attrs = $attrs::read_from(object, path)?;
                Ok(Self { id, attrs })
            }

            fn id(&self) -> &$crate::id::NodeId {
                &self.id
            }

            fn set_id(&mut self, id: $crate::id::NodeId) {
                self.id = id;
            }

            fn regenerate_ids(&mut self) {
                self.id = $crate::id::NodeId::generate(Self::KIND.as_str());
            }
        }

        $crate::node::node_serde!($node, leaf);
    };
}

pub(crate) use leaf_schema;

/// Leaf content element, discriminated on `type`
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Heading(Heading),
    Text(Text),
    Image(Image),
    Button(Button),
    Divider(Divider),
}

impl Element {
    pub fn kind(&self) -> NodeKind {
        match self {
            Element::Heading(_) => NodeKind::Heading,
            Element::Text(_) => NodeKind::Text,
            Element::Image(_) => NodeKind::Image,
            Element::Button(_) => NodeKind::Button,
            Element::Divider(_) => NodeKind::Divider,
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Element::Heading(node) => &node.id,
            Element::Text(node) => &node.id,
            Element::Image(node) => &node.id,
            Element::Button(node) => &node.id,
            Element::Divider(node) => &node.id,
        }
    }

    /// Default element of a leaf kind, `None` for layout kinds
    pub fn defaults(kind: NodeKind) -> Option<Element> {
        match kind {
            NodeKind::Heading => Some(Element::Heading(Heading::create())),
            NodeKind::Text => Some(Element::Text(Text::create())),
            NodeKind::Image => Some(Element::Image(Image::create())),
            NodeKind::Button => Some(Element::Button(Button::create())),
            NodeKind::Divider => Some(Element::Divider(Divider::create())),
            NodeKind::Container | NodeKind::Row | NodeKind::Column => None,
        }
    }

    pub fn validate(input: &Value) -> ValidationResult<Element> {
        Self::validate_at(input, &FieldPath::root())
    }

    /// Validate a leaf element. The `type` tag must name one of the leaf
    /// kinds; anything else is rejected rather than coerced.
    pub fn validate_at(input: &Value, path: &FieldPath) -> ValidationResult<Element> {
        let object = expect_object(input, path)?;

        Ok(match read_kind(object, path, NodeKind::LEAVES)? {
            NodeKind::Heading => Element::Heading(Heading::validate_at(input, path)?),
            NodeKind::Text => Element::Text(Text::validate_at(input, path)?),
            NodeKind::Image => Element::Image(Image::validate_at(input, path)?),
            NodeKind::Button => Element::Button(Button::validate_at(input, path)?),
            NodeKind::Divider => Element::Divider(Divider::validate_at(input, path)?),
            NodeKind::Container | NodeKind::Row | NodeKind::Column => {
                unreachable!("read_kind only yields leaf kinds")
            }
        })
    }

    pub fn set_id(&mut self, id: NodeId) {
        match self {
            Element::Heading(node) => node.set_id(id),
            Element::Text(node) => node.set_id(id),
            Element::Image(node) => node.set_id(id),
            Element::Button(node) => node.set_id(id),
            Element::Divider(node) => node.set_id(id),
        }
    }

    pub fn regenerate_ids(&mut self) {
        match self {
            Element::Heading(node) => node.regenerate_ids(),
            Element::Text(node) => node.regenerate_ids(),
            Element::Image(node) => node.regenerate_ids(),
            Element::Button(node) => node.regenerate_ids(),
            Element::Divider(node) => node.regenerate_ids(),
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Heading(node) => node.serialize(serializer),
            Element::Text(node) => node.serialize(serializer),
            Element::Image(node) => node.serialize(serializer),
            Element::Button(node) => node.serialize(serializer),
            Element::Divider(node) => node.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Element::validate(&value).map_err(serde::de::Error::custom)
    }
}

impl From<Heading> for Element {
    fn from(node: Heading) -> Self {
        Element::Heading(node)
    }
}

impl From<Text> for Element {
    fn from(node: Text) -> Self {
        Element::Text(node)
    }
}

impl From<Image> for Element {
    fn from(node: Image) -> Self {
        Element::Image(node)
    }
}

impl From<Button> for Element {
    fn from(node: Button) -> Self {
        Element::Button(node)
    }
}

impl From<Divider> for Element {
    fn from(node: Divider) -> Self {
        Element::Divider(node)
    }
}
