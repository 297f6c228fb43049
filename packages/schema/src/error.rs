use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Location of a field inside an input document, rendered as
/// `container.children[2].children[0].fontSize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Input does not match the declared schema.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid value at {path}: expected {expected}, found {found}")]
pub struct ValidationError {
    pub path: FieldPath,
    pub expected: String,
    pub found: String,
}

impl ValidationError {
    pub fn new(path: FieldPath, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            path,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Type mismatch against an actual input value
    pub fn mismatch(path: &FieldPath, expected: impl Into<String>, value: &Value) -> Self {
        Self::new(path.clone(), expected, describe(value))
    }

    pub fn missing(path: &FieldPath, expected: impl Into<String>) -> Self {
        Self::new(path.clone(), expected, "nothing")
    }

    pub fn duplicate_id(path: FieldPath, id: &str) -> Self {
        Self::new(path, "unique id", format!("duplicate `{}`", id))
    }
}

/// Short human description of a JSON value for error messages
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean `{}`", b),
        Value::Number(n) => format!("number `{}`", n),
        Value::String(s) if s.chars().count() > 32 => {
            let head: String = s.chars().take(32).collect();
            format!("string \"{}...\"", head)
        }
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_rendering() {
        let path = FieldPath::root()
            .field("container")
            .field("children")
            .index(2)
            .field("children")
            .index(0)
            .field("fontSize");

        assert_eq!(path.as_str(), "container.children[2].children[0].fontSize");
        assert_eq!(FieldPath::root().field("width").as_str(), "width");
        assert_eq!(FieldPath::root().to_string(), "<root>");
    }

    #[test]
    fn test_error_message() {
        let err = ValidationError::mismatch(&FieldPath::root().field("width"), "string", &json!(42));
        assert_eq!(
            err.to_string(),
            "Invalid value at width: expected string, found number `42`"
        );
    }
}
