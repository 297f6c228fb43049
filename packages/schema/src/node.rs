//! # Nodes
//!
//! Every node kind is a plain struct holding its `id`, a typed attribute
//! struct and (for layout kinds) a statically typed child list:
//!
//! ```text
//! Container ─┬─ Row ─┬─ Column ─┬─ Element (heading | text | image | button | hr)
//!            │       │          └─ ...
//!            │       └─ Column
//!            └─ Row
//! ```
//!
//! Serialization always emits `id`, `type`, the attributes in declaration
//! order and finally `children`. Deserialization goes through the validator,
//! so a decoded node honours the same defaults and constraints as
//! [`NodeSchema::validate`].

use crate::error::{FieldPath, ValidationError, ValidationResult};
use crate::field::expect_object;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::nodes::{Button, Column, Container, Divider, Element, Heading, Image, Row, Text};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Validation and default construction for one node kind
pub trait NodeSchema: Sized {
    const KIND: NodeKind;

    /// Partial attributes accepted by [`NodeSchema::defaults`]
    type Partial: Default;

    /// Build a node from the default table with `overrides` applied on top.
    /// The node always receives a freshly generated id.
    fn defaults(overrides: Self::Partial) -> Self;

    /// Validate untrusted input, reporting errors relative to `path`
    fn validate_at(input: &Value, path: &FieldPath) -> ValidationResult<Self>;

    fn id(&self) -> &NodeId;

    fn set_id(&mut self, id: NodeId);

    /// Give every node in this subtree a fresh id
    fn regenerate_ids(&mut self);

    /// Default node with no overrides
    fn create() -> Self {
        Self::defaults(Self::Partial::default())
    }

    fn validate(input: &Value) -> ValidationResult<Self> {
        Self::validate_at(input, &FieldPath::root())
    }

    /// Replace the generated id with an explicit one
    fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.set_id(id.into());
        self
    }
}

/// Check the `type` tag and read (or generate) the `id` of a node object
pub(crate) fn read_header<'a>(
    input: &'a Value,
    path: &FieldPath,
    kind: NodeKind,
) -> ValidationResult<(&'a Map<String, Value>, NodeId)> {
    let object = expect_object(input, path)?;

    let tag_path = path.field("type");
    let expected_tag = format!("`{}`", kind);
    match object.get("type") {
        Some(Value::String(tag)) if tag == kind.as_str() => {}
        Some(other) => return Err(ValidationError::mismatch(&tag_path, expected_tag, other)),
        None => return Err(ValidationError::missing(&tag_path, expected_tag)),
    }

    let id = match object.get("id") {
        None => NodeId::generate(kind.as_str()),
        Some(Value::String(id)) if !id.is_empty() => NodeId::from(id.as_str()),
        Some(other) => {
            return Err(ValidationError::mismatch(&path.field("id"), "non-empty string", other))
        }
    };

    Ok((object, id))
}

/// Read the `children` array, validating each item with `read`
pub(crate) fn read_children<T>(
    object: &Map<String, Value>,
    path: &FieldPath,
    read: impl Fn(&Value, &FieldPath) -> ValidationResult<T>,
) -> ValidationResult<Vec<T>> {
    let children_path = path.field("children");
    match object.get("children") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| read(item, &children_path.index(i)))
            .collect(),
        Some(other) => Err(ValidationError::mismatch(&children_path, "array of nodes", other)),
    }
}

/// Wire shape shared by every node kind
#[derive(Serialize)]
pub(crate) struct NodeRepr<'a, A, C> {
    pub id: &'a NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(flatten)]
    pub attrs: &'a A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<&'a [C]>,
}

/// Serialize through [`NodeRepr`] and deserialize through the validator
macro_rules! node_serde {
    ($node:ty, leaf) => {
        impl serde::Serialize for $node {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let repr = $crate::node::NodeRepr::<_, ()> {
                    id: &self.id,
                    kind: <$node as $crate::node::NodeSchema>::KIND,
                    attrs: &self.attrs,
                    children: None,
                };
                serde::Serialize::serialize(&repr, serializer)
            }
        }

        $crate::node::node_serde!(@de $node);
    };
    ($node:ty, children) => {
        impl serde::Serialize for $node {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let repr = $crate::node::NodeRepr {
                    id: &self.id,
                    kind: <$node as $crate::node::NodeSchema>::KIND,
                    attrs: &self.attrs,
                    children: Some(self.children.as_slice()),
                };
                serde::Serialize::serialize(&repr, serializer)
            }
        }

        $crate::node::node_serde!(@de $node);
    };
    (@de $node:ty) => {
        impl<'de> serde::Deserialize<'de> for $node {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$node as $crate::node::NodeSchema>::validate(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use node_serde;

/// Any node of a template, owned
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Container(Container),
    Row(Row),
    Column(Column),
    Element(Element),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.as_node_ref().kind()
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Node::Container(container) => &container.id,
            Node::Row(row) => &row.id,
            Node::Column(column) => &column.id,
            Node::Element(element) => element.id(),
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Container(container) => NodeRef::Container(container),
            Node::Row(row) => NodeRef::Row(row),
            Node::Column(column) => NodeRef::Column(column),
            Node::Element(element) => NodeRef::Element(element),
        }
    }

    /// Default node of the given kind with a fresh id
    pub fn defaults(kind: NodeKind) -> Node {
        match kind {
            NodeKind::Container => Node::Container(Container::create()),
            NodeKind::Row => Node::Row(Row::create()),
            NodeKind::Column => Node::Column(Column::create()),
            NodeKind::Heading => Node::Element(Element::Heading(Heading::create())),
            NodeKind::Text => Node::Element(Element::Text(Text::create())),
            NodeKind::Image => Node::Element(Element::Image(Image::create())),
            NodeKind::Button => Node::Element(Element::Button(Button::create())),
            NodeKind::Divider => Node::Element(Element::Divider(Divider::create())),
        }
    }

    /// Default node of `kind` with a JSON object of attribute overrides.
    /// Overrides are validated against the kind's attribute types.
    pub fn defaults_with(kind: NodeKind, overrides: &Value) -> ValidationResult<Node> {
        let mut input = expect_object(overrides, &FieldPath::root())?.clone();
        input.remove("id");
        input.remove("children");
        input.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        Node::validate(&Value::Object(input))
    }

    pub fn validate(input: &Value) -> ValidationResult<Node> {
        Self::validate_at(input, &FieldPath::root())
    }

    /// Validate a node of any kind, dispatching on its `type` tag
    pub fn validate_at(input: &Value, path: &FieldPath) -> ValidationResult<Node> {
        let object = expect_object(input, path)?;
        let kind = read_kind(object, path, NodeKind::ALL)?;

        Ok(match kind {
            NodeKind::Container => Node::Container(Container::validate_at(input, path)?),
            NodeKind::Row => Node::Row(Row::validate_at(input, path)?),
            NodeKind::Column => Node::Column(Column::validate_at(input, path)?),
            NodeKind::Heading
            | NodeKind::Text
            | NodeKind::Image
            | NodeKind::Button
            | NodeKind::Divider => Node::Element(Element::validate_at(input, path)?),
        })
    }

    pub fn regenerate_ids(&mut self) {
        match self {
            Node::Container(container) => container.regenerate_ids(),
            Node::Row(row) => row.regenerate_ids(),
            Node::Column(column) => column.regenerate_ids(),
            Node::Element(element) => element.regenerate_ids(),
        }
    }
}

/// Resolve the `type` tag of a node object against a set of allowed kinds
pub(crate) fn read_kind(
    object: &Map<String, Value>,
    path: &FieldPath,
    allowed: &[NodeKind],
) -> ValidationResult<NodeKind> {
    let tag_path = path.field("type");
    let expected = crate::field::one_of(allowed.iter().map(|kind| kind.as_str()));

    match object.get("type") {
        Some(value) => value
            .as_str()
            .and_then(|tag| tag.parse::<NodeKind>().ok())
            .filter(|kind| allowed.contains(kind))
            .ok_or_else(|| ValidationError::mismatch(&tag_path, expected, value)),
        None => Err(ValidationError::missing(&tag_path, expected)),
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_node_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Node::validate(&value).map_err(serde::de::Error::custom)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Container(container)
    }
}

impl From<Row> for Node {
    fn from(row: Row) -> Self {
        Node::Row(row)
    }
}

impl From<Column> for Node {
    fn from(column: Column) -> Self {
        Node::Column(column)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Borrowed view of a node inside a template
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Container(&'a Container),
    Row(&'a Row),
    Column(&'a Column),
    Element(&'a Element),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Container(_) => NodeKind::Container,
            NodeRef::Row(_) => NodeKind::Row,
            NodeRef::Column(_) => NodeKind::Column,
            NodeRef::Element(element) => element.kind(),
        }
    }

    pub fn id(&self) -> &'a NodeId {
        match self {
            NodeRef::Container(container) => &container.id,
            NodeRef::Row(row) => &row.id,
            NodeRef::Column(column) => &column.id,
            NodeRef::Element(element) => element.id(),
        }
    }

    pub fn to_node(&self) -> Node {
        match *self {
            NodeRef::Container(container) => Node::Container(container.clone()),
            NodeRef::Row(row) => Node::Row(row.clone()),
            NodeRef::Column(column) => Node::Column(column.clone()),
            NodeRef::Element(element) => Node::Element(element.clone()),
        }
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        match self {
            NodeRef::Container(container) => container.children.len(),
            NodeRef::Row(row) => row.children.len(),
            NodeRef::Column(column) => column.children.len(),
            NodeRef::Element(_) => 0,
        }
    }

    /// Ids of this node and all its descendants, in pre-order
    pub fn subtree_ids(&self) -> Vec<&'a NodeId> {
        let mut ids = vec![self.id()];
        match *self {
            NodeRef::Container(container) => {
                for row in &container.children {
                    ids.extend(NodeRef::Row(row).subtree_ids());
                }
            }
            NodeRef::Row(row) => {
                for column in &row.children {
                    ids.extend(NodeRef::Column(column).subtree_ids());
                }
            }
            NodeRef::Column(column) => ids.extend(column.children.iter().map(Element::id)),
            NodeRef::Element(_) => {}
        }
        ids
    }

    /// JSON object of the node's own fields, without `children`
    pub fn attributes(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(object) = &mut value {
            object.remove("children");
        }
        value
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeRef::Container(container) => container.serialize(serializer),
            NodeRef::Row(row) => row.serialize(serializer),
            NodeRef::Column(column) => column.serialize(serializer),
            NodeRef::Element(element) => element.serialize(serializer),
        }
    }
}
