use crate::error::{FieldPath, ValidationError, ValidationResult};
use crate::field::{attrs, expect_object, read_field, require_field};
use crate::id::NodeId;
use crate::location::Location;
use crate::node::{NodeRef, NodeSchema};
use crate::nodes::Container;
use crate::visitor::{NodeCollector, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, instrument};

attrs! {
    /// Font stack shared by the whole email
    pub struct Font / FontPartial {
        "family" => family: String = "Arial".to_string(),
        "fallback" => fallback: Vec<String> = vec!["Helvetica".to_string(), "sans-serif".to_string()],
        "weight" => weight: Vec<u16> = vec![400, 700],
    }
}

impl Font {
    /// CSS `font-family` value, primary family first
    pub fn stack(&self) -> String {
        std::iter::once(self.family.as_str())
            .chain(self.fallback.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn check_weights(&self, path: &FieldPath) -> ValidationResult<()> {
        let weights = path.field("weight");
        for (i, weight) in self.weight.iter().enumerate() {
            if !(1..=1000).contains(weight) {
                return Err(ValidationError::new(
                    weights.index(i),
                    "integer between 1 and 1000",
                    format!("number `{}`", weight),
                ));
            }
        }
        Ok(())
    }
}

/// A complete email template: metadata plus exactly one container tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub title: String,
    pub preview: String,
    pub font: Font,
    pub container: Container,
}

impl Template {
    /// Empty template with the default font and an empty container
    pub fn new(title: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            preview: preview.into(),
            font: Font::default(),
            container: Container::create(),
        }
    }

    /// Validate untrusted input into a template.
    ///
    /// Fails fast on the first invalid field with its full path, e.g.
    /// `container.children[2].children[0].children[1].fontSize`. After the
    /// structural pass every node id must be unique across the tree.
    #[instrument(skip(input))]
    pub fn validate(input: &Value) -> ValidationResult<Template> {
        let root = FieldPath::root();
        let object = expect_object(input, &root)?;
        let (title, preview, font) = read_metadata(object, &root)?;

        let container_path = root.field("container");
        let container = match object.get("container") {
            Some(value) => Container::validate_at(value, &container_path)?,
            None => return Err(ValidationError::missing(&container_path, "object")),
        };

        let template = Template {
            title,
            preview,
            font,
            container,
        };
        template.check_unique_ids()?;

        debug!(title = %template.title, nodes = template.node_count(), "Validated template");
        Ok(template)
    }

    /// The `title`, `preview` and `font` fields as a JSON object
    pub fn metadata(&self) -> Value {
        let mut object = Map::new();
        object.insert("title".to_string(), Value::String(self.title.clone()));
        object.insert("preview".to_string(), Value::String(self.preview.clone()));
        object.insert(
            "font".to_string(),
            serde_json::to_value(&self.font).unwrap_or(Value::Null),
        );
        Value::Object(object)
    }

    /// Copy of this template with its metadata replaced by validated `input`.
    /// The container tree is kept as is.
    pub fn with_metadata(&self, input: &Value) -> ValidationResult<Template> {
        let root = FieldPath::root();
        let object = expect_object(input, &root)?;
        let (title, preview, font) = read_metadata(object, &root)?;

        Ok(Template {
            title,
            preview,
            font,
            container: self.container.clone(),
        })
    }

    /// Reject the second occurrence of any id, reported at `<node path>.id`
    pub fn check_unique_ids(&self) -> ValidationResult<()> {
        let mut seen = HashSet::new();
        for (location, node) in self.nodes() {
            if !seen.insert(node.id().as_str()) {
                return Err(ValidationError::duplicate_id(
                    location.path().field("id"),
                    node.id().as_str(),
                ));
            }
        }
        Ok(())
    }

    /// Every node in depth-first pre-order (container, row, column, leaf)
    pub fn nodes(&self) -> Vec<(Location, NodeRef<'_>)> {
        let mut collector = NodeCollector::default();
        collector.visit_template(self);
        collector.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// All ids currently in use
    pub fn ids(&self) -> HashSet<NodeId> {
        self.nodes().into_iter().map(|(_, node)| node.id().clone()).collect()
    }

    /// Location of the node with `id`, searching depth first
    pub fn locate(&self, id: &str) -> Option<Location> {
        if self.container.id == id {
            return Some(Location::Container);
        }

        for (r, row) in self.container.children.iter().enumerate() {
            if row.id == id {
                return Some(Location::Row { row: r });
            }
            for (c, column) in row.children.iter().enumerate() {
                if column.id == id {
                    return Some(Location::Column { row: r, column: c });
                }
                if let Some(e) = column.children.iter().position(|element| element.id() == id) {
                    return Some(Location::Element {
                        row: r,
                        column: c,
                        element: e,
                    });
                }
            }
        }

        None
    }

    pub fn node_at(&self, location: Location) -> Option<NodeRef<'_>> {
        let container = &self.container;
        Some(match location {
            Location::Container => NodeRef::Container(container),
            Location::Row { row } => NodeRef::Row(container.children.get(row)?),
            Location::Column { row, column } => {
                NodeRef::Column(container.children.get(row)?.children.get(column)?)
            }
            Location::Element {
                row,
                column,
                element,
            } => NodeRef::Element(
                container
                    .children
                    .get(row)?
                    .children
                    .get(column)?
                    .children
                    .get(element)?,
            ),
        })
    }

    pub fn find(&self, id: &str) -> Option<NodeRef<'_>> {
        self.locate(id).and_then(|location| self.node_at(location))
    }
}

fn read_metadata(object: &Map<String, Value>, path: &FieldPath) -> ValidationResult<(String, String, Font)> {
    let title = require_field(object, "title", path)?;
    let preview = require_field(object, "preview", path)?;
    let font: Font = read_field(object, "font", path, Font::default)?;
    font.check_weights(&path.field("font"))?;
    Ok((title, preview, font))
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Template::validate(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "title": "Hello",
            "preview": "Preview",
            "container": { "type": "container", "id": "c" }
        })
    }

    #[test]
    fn test_font_defaulted() {
        let template = Template::validate(&minimal()).unwrap();
        assert_eq!(template.font, Font::default());
        assert_eq!(template.font.stack(), "Arial, Helvetica, sans-serif");
    }

    #[test]
    fn test_title_required() {
        let mut input = minimal();
        input.as_object_mut().unwrap().remove("title");
        let err = Template::validate(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "title");
        assert_eq!(err.expected, "string");
    }

    #[test]
    fn test_container_required() {
        let err = Template::validate(&json!({ "title": "a", "preview": "b" })).unwrap_err();
        assert_eq!(err.path.as_str(), "container");
        assert_eq!(err.found, "nothing");
    }

    #[test]
    fn test_font_weight_range() {
        let mut input = minimal();
        input["font"] = json!({ "weight": [400, 0] });
        let err = Template::validate(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "font.weight[1]");
    }

    #[test]
    fn test_deep_error_path() {
        let input = json!({
            "title": "t",
            "preview": "p",
            "container": {
                "type": "container",
                "children": [{
                    "type": "row",
                    "children": [{
                        "type": "column",
                        "children": [{ "type": "text" }, { "type": "text", "fontSize": 15 }]
                    }]
                }]
            }
        });

        let err = Template::validate(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "container.children[0].children[0].children[1].fontSize");
        assert_eq!(err.expected, "string");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let input = json!({
            "title": "t",
            "preview": "p",
            "container": {
                "type": "container",
                "id": "c",
                "children": [
                    { "type": "row", "id": "same" },
                    { "type": "row", "id": "same" }
                ]
            }
        });

        let err = Template::validate(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "container.children[1].id");
    }

    #[test]
    fn test_locate_and_node_at() {
        let template = crate::fixture::default_template();
        let location = template.locate("cta-button").unwrap();
        assert_eq!(
            location,
            Location::Element {
                row: 5,
                column: 0,
                element: 1
            }
        );
        assert_eq!(template.node_at(location).unwrap().kind(), NodeKind::Button);
        assert!(template.locate("missing").is_none());
        assert!(template.node_at(Location::Row { row: 99 }).is_none());
    }

    #[test]
    fn test_with_metadata_keeps_container() {
        let template = crate::fixture::default_template();
        let mut metadata = template.metadata();
        metadata["title"] = json!("Renamed");

        let updated = template.with_metadata(&metadata).unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.font, template.font);
        assert_eq!(updated.container, template.container);

        metadata["font"]["weight"] = json!([2000]);
        let err = template.with_metadata(&metadata).unwrap_err();
        assert_eq!(err.path.as_str(), "font.weight[0]");
    }

    #[test]
    fn test_deserialize_goes_through_validator() {
        let err = serde_json::from_value::<Template>(json!({ "title": 1 })).unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
