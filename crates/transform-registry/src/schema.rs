use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Expected JSON shape of a single config field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldKind {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        };
        write!(f, "{word}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

/// Declarative shape of a transform's configuration: which fields must be
/// present and what kind each declared field has.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigSchema {
    pub required_fields: Vec<String>,
    pub fields: BTreeMap<String, FieldSpec>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &str, kind: FieldKind) -> Self {
        self.required_fields.push(name.to_string());
        self.fields.insert(
            name.to_string(),
            FieldSpec {
                kind,
                enum_values: None,
            },
        );
        self
    }

    pub fn optional(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.insert(
            name.to_string(),
            FieldSpec {
                kind,
                enum_values: None,
            },
        );
        self
    }

    /// Restrict an already-declared field to a fixed set of values.
    pub fn one_of(mut self, name: &str, values: &[&str]) -> Self {
        if let Some(spec) = self.fields.get_mut(name) {
            spec.enum_values = Some(values.iter().map(|v| v.to_string()).collect());
        }
        self
    }

    /// Check `config` against this schema, accumulating every problem into
    /// the returned list. Never panics; an empty list means the config is
    /// well formed.
    pub fn check(&self, transform: &str, config: &Value) -> Vec<String> {
        let Some(object) = config.as_object() else {
            return vec![format!("{transform} config must be an object")];
        };

        let mut errors = Vec::new();

        for field in &self.required_fields {
            if !object.contains_key(field) {
                errors.push(format!("{transform} missing required field: {field}"));
            }
        }

        for (field, spec) in &self.fields {
            let Some(value) = object.get(field) else {
                continue;
            };
            if !spec.kind.matches(value) {
                errors.push(format!("{transform}.{field} must be a {}", spec.kind));
                continue;
            }
            if let Some(allowed) = &spec.enum_values {
                let permitted = value
                    .as_str()
                    .is_some_and(|v| allowed.iter().any(|a| a == v));
                if !permitted {
                    errors.push(format!(
                        "{transform}.{field} must be one of: {}",
                        allowed.join(", ")
                    ));
                }
            }
        }

        errors
    }
}
