use crate::error::{FieldPath, ValidationResult};
use crate::field::attrs;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::node::{node_serde, read_children, read_header, NodeSchema};
use crate::nodes::{Column, ColumnPartial};
use serde_json::Value;

attrs! {
    pub struct RowAttrs / RowPartial {
        "title" => title: String = "Untitled row".to_string(),
        /// Layout preset: column percentages joined by `-`, e.g. `50-50`
        "columns" => columns: String = "100".to_string(),
        "gap" => gap: f64 = 0.0,
        "backgroundColor" => background_color: String = "transparent".to_string(),
        "horizontalPadding" => horizontal_padding: f64 = 0.0,
        "verticalPadding" => vertical_padding: f64 = 0.0,
    }
}

impl RowAttrs {
    /// Column widths described by the layout preset. Malformed presets fall
    /// back to a single full-width column.
    pub fn column_widths(&self) -> Vec<String> {
        let parts: Option<Vec<u32>> = self
            .columns
            .split('-')
            .map(|part| part.trim().parse::<u32>().ok().filter(|n| *n > 0 && *n <= 100))
            .collect();

        match parts {
            Some(parts) if !parts.is_empty() => parts.iter().map(|n| format!("{}%", n)).collect(),
            _ => vec!["100%".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: NodeId,
    pub attrs: RowAttrs,
    pub children: Vec<Column>,
}

impl Row {
    /// Default row pre-populated with one default column per layout slot
    pub fn with_layout(preset: &str) -> Self {
        let mut row = Self::defaults(RowPartial {
            columns: Some(preset.to_string()),
            ..Default::default()
        });

        row.children = row
            .attrs
            .column_widths()
            .into_iter()
            .map(|width| {
                Column::defaults(ColumnPartial {
                    width: Some(width),
                    ..Default::default()
                })
            })
            .collect();

        row
    }
}

impl NodeSchema for Row {
    const KIND: NodeKind = NodeKind::Row;
    type Partial = RowPartial;

    fn defaults(overrides: RowPartial) -> Self {
        Self {
            id: NodeId::generate(Self::KIND.as_str()),
            attrs: RowAttrs::resolve(overrides),
            children: Vec::new(),
        }
    }

    fn validate_at(input: &Value, path: &FieldPath) -> ValidationResult<Self> {
        let (object, id) = read_header(input, path, Self::KIND)?;
        let attrs = RowAttrs::read_from(object, path)?;
        let children = read_children(object, path, Column::validate_at)?;

        Ok(Self { id, attrs, children })
    }

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn regenerate_ids(&mut self) {
        self.id = NodeId::generate(Self::KIND.as_str());
        for column in &mut self.children {
            column.regenerate_ids();
        }
    }
}

node_serde!(Row, children);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_widths() {
        let row = Row::with_layout("33-67");
        assert_eq!(row.attrs.columns, "33-67");
        assert_eq!(row.children.len(), 2);
        assert_eq!(row.children[0].attrs.width, "33%");
        assert_eq!(row.children[1].attrs.width, "67%");
        assert_ne!(row.children[0].id, row.children[1].id);
    }

    #[test]
    fn test_malformed_layout_is_full_width() {
        let attrs = RowAttrs::resolve(RowPartial {
            columns: Some("half-half".to_string()),
            ..Default::default()
        });
        assert_eq!(attrs.column_widths(), vec!["100%"]);
    }
}
