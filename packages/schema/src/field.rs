//! # Field readers
//!
//! Typed extraction of attribute values from untrusted JSON. Each attribute
//! type implements [`FieldValue`]; the `attrs!` macro builds a struct, its
//! partial counterpart and a field-by-field default table on top of it.

use crate::error::{FieldPath, ValidationError, ValidationResult};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A value that can be read from JSON with a typed error on mismatch
pub trait FieldValue: Sized {
    /// Human readable type name used in validation errors
    fn expected() -> String;

    fn read(value: &Value, path: &FieldPath) -> ValidationResult<Self>;

    /// Serialized form of an attribute. Plain `Serialize` unless overridden
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        Self: Serialize,
    {
        self.serialize(serializer)
    }
}

impl FieldValue for String {
    fn expected() -> String {
        "string".to_string()
    }

    fn read(value: &Value, path: &FieldPath) -> ValidationResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ValidationError::mismatch(path, Self::expected(), value))
    }
}

impl FieldValue for f64 {
    fn expected() -> String {
        "number".to_string()
    }

    fn read(value: &Value, path: &FieldPath) -> ValidationResult<Self> {
        value
            .as_f64()
            .ok_or_else(|| ValidationError::mismatch(path, Self::expected(), value))
    }

    /// Whole numbers are written without a fraction, so `24` stays `24`
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        Self: Serialize,
    {
        if self.fract() == 0.0 && self.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(*self as i64)
        } else {
            serializer.serialize_f64(*self)
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl FieldValue for u16 {
    fn expected() -> String {
        "integer".to_string()
    }

    fn read(value: &Value, path: &FieldPath) -> ValidationResult<Self> {
        let integral = match value.as_u64() {
            Some(n) => Some(n),
            None => value
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0)
                .map(|n| n as u64),
        };

        integral
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| ValidationError::mismatch(path, Self::expected(), value))
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn expected() -> String {
        format!("array of {} values", T::expected())
    }

    fn read(value: &Value, path: &FieldPath) -> ValidationResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| ValidationError::mismatch(path, Self::expected(), value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::read(item, &path.index(i)))
            .collect()
    }
}

pub fn expect_object<'a>(value: &'a Value, path: &FieldPath) -> ValidationResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::mismatch(path, "object", value))
}

/// Read an optional field, falling back to `default` when absent
pub fn read_field<T: FieldValue>(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    default: impl FnOnce() -> T,
) -> ValidationResult<T> {
    match object.get(key) {
        Some(value) => T::read(value, &path.field(key)),
        None => Ok(default()),
    }
}

/// Read a field that has no default
pub fn require_field<T: FieldValue>(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> ValidationResult<T> {
    let field_path = path.field(key);
    match object.get(key) {
        Some(value) => T::read(value, &field_path),
        None => Err(ValidationError::missing(&field_path, T::expected())),
    }
}

pub fn one_of<'a>(options: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = options.into_iter().map(|o| format!("`{}`", o)).collect();
    format!("one of {}", quoted.join(", "))
}

/// Declares an attribute struct, its `Partial` twin, and the default table.
///
/// ```rust,ignore
/// attrs! {
///     pub struct ColumnAttrs / ColumnPartial {
///         "width" => width: String = "100%".to_string(),
///     }
/// }
/// ```
macro_rules! attrs {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $partial:ident {
            $(
                $(#[$field_meta:meta])*
                $key:literal => $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $key, serialize_with = "crate::field::FieldValue::serialize_value")]
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Partial [`", stringify!($name), "`]. Unset fields are left to the default table or the current value.")]
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $partial {
            $(
                #[serde(rename = $key, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// Resolve every field, falling back to its declared default
            pub fn resolve(partial: $partial) -> Self {
                Self {
                    $( $field: partial.$field.unwrap_or_else(|| $default), )*
                }
            }

            /// Overlay the set fields of `partial` onto the current values
            pub fn merge(&mut self, partial: $partial) {
                $(
                    if let Some(value) = partial.$field {
                        self.$field = value;
                    }
                )*
            }

            pub(crate) fn read_from(
                object: &serde_json::Map<String, serde_json::Value>,
                path: &$crate::error::FieldPath,
            ) -> $crate::error::ValidationResult<Self> {
                Ok(Self {
                    $( $field: $crate::field::read_field(object, $key, path, || $default)?, )*
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::resolve($partial::default())
            }
        }

        impl $crate::field::FieldValue for $name {
            fn expected() -> String {
                "object".to_string()
            }

            fn read(
                value: &serde_json::Value,
                path: &$crate::error::FieldPath,
            ) -> $crate::error::ValidationResult<Self> {
                let object = $crate::field::expect_object(value, path)?;
                Self::read_from(object, path)
            }
        }
    };
}

/// Declares a closed set of string tags.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $tag, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $tag => Ok($name::$variant), )+
                    other => Err(format!(
                        "expected {}, found `{}`",
                        <$name as $crate::field::FieldValue>::expected(),
                        other
                    )),
                }
            }
        }

        impl $crate::field::FieldValue for $name {
            fn expected() -> String {
                $crate::field::one_of(Self::ALL.iter().map(|v| v.as_str()))
            }

            fn read(
                value: &serde_json::Value,
                path: &$crate::error::FieldPath,
            ) -> $crate::error::ValidationResult<Self> {
                value
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| {
                        $crate::error::ValidationError::mismatch(path, Self::expected(), value)
                    })
            }
        }
    };
}

pub(crate) use attrs;
pub(crate) use string_enum;
